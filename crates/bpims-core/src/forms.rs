//! # Stock Forms
//!
//! The records that keypad sessions commit into, one per stock screen, and
//! the rules that enable their SAVE button.
//!
//! ## Forms and Ceilings
//! ```text
//! ┌──────────────────────────┬───────────────────────┬──────────────────────┐
//! │ Form                     │ Keypad fields         │ Ceiling              │
//! ├──────────────────────────┼───────────────────────┼──────────────────────┤
//! │ StockInputForm           │ qty, moq,             │ none (delivery in);  │
//! │                          │ actual/expected total │ warehouse stock for  │
//! │                          │                       │ HQ → branch          │
//! │ StockTransferForm        │ quantity              │ branch stock         │
//! │ ReturnToWarehouseForm    │ quantity              │ branch stock         │
//! │ ReturnToSupplierForm     │ quantity              │ warehouse stock      │
//! └──────────────────────────┴───────────────────────┴──────────────────────┘
//! ```
//!
//! ## Delivery Rules
//! ```text
//! ┌──────────────┬────────────────────────────┬─────┬─────────────┐
//! │ Target       │ qty, actual/expected total │ moq │ deliveredBy │
//! ├──────────────┼────────────────────────────┼─────┼─────────────┤
//! │ Branch       │ required                   │ yes │ yes         │
//! │ Headquarters │ required                   │ no  │ yes         │
//! │ Warehouse    │ required                   │ no  │ no          │
//! └──────────────┴────────────────────────────┴─────┴─────────────┘
//! ```

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::controller::Commit;
use crate::quantity::Quantity;
use crate::validation::{
    validate_nonzero_quantity, validate_required, validate_selected_id, ValidationResult,
};

// =============================================================================
// Traits
// =============================================================================

/// A form field that can be edited on the keypad.
pub trait EntryField: Copy + PartialEq + Debug {
    /// Label shown on the form and above the keypad.
    fn label(&self) -> &'static str;

    /// Heading of the keypad screen ("Enter Quantity").
    fn prompt(&self) -> String {
        format!("Enter {}", self.label())
    }
}

/// A form whose numeric fields are filled through the keypad.
pub trait QuantityForm {
    type Field: EntryField;

    /// Current committed value of a field.
    fn quantity(&self, field: Self::Field) -> Quantity;

    /// Overwrites a field.
    fn set_quantity(&mut self, field: Self::Field, value: Quantity);

    /// Checks the form's rules; the first failing rule is returned.
    fn validate(&self) -> ValidationResult<()>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Writes a finished keypad session back into the form.
    fn apply(&mut self, commit: Commit<Self::Field>) {
        self.set_quantity(commit.field, commit.value);
    }
}

// =============================================================================
// Single Quantity Field
// =============================================================================

/// The one keypad field of transfer and return forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum QuantityField {
    Quantity,
}

impl EntryField for QuantityField {
    fn label(&self) -> &'static str {
        "Quantity"
    }
}

// =============================================================================
// Stock Input (delivery received)
// =============================================================================

/// Keypad fields of a delivery record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum StockInputField {
    Qty,
    Moq,
    ActualTotalQty,
    ExpectedTotalQty,
}

impl StockInputField {
    pub const ALL: [StockInputField; 4] = [
        StockInputField::Qty,
        StockInputField::Moq,
        StockInputField::ActualTotalQty,
        StockInputField::ExpectedTotalQty,
    ];

    fn key(&self) -> &'static str {
        match self {
            StockInputField::Qty => "qty",
            StockInputField::Moq => "moq",
            StockInputField::ActualTotalQty => "actualTotalQty",
            StockInputField::ExpectedTotalQty => "expectedTotalQty",
        }
    }
}

impl EntryField for StockInputField {
    fn label(&self) -> &'static str {
        match self {
            StockInputField::Qty => "Quantity",
            StockInputField::Moq => "MOQ",
            StockInputField::ActualTotalQty => "Actual Total Quantity",
            StockInputField::ExpectedTotalQty => "Expected Total Quantity",
        }
    }
}

/// The screen a delivery is recorded from. It decides which fields SAVE
/// requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryTarget {
    /// Branch stock screen.
    #[default]
    Branch,
    /// Headquarters stock monitor, delivering to a branch or the warehouse.
    Headquarters,
    /// Warehouse stock screen.
    Warehouse,
}

impl DeliveryTarget {
    fn requires_moq(&self) -> bool {
        matches!(self, DeliveryTarget::Branch)
    }

    fn requires_delivered_by(&self) -> bool {
        !matches!(self, DeliveryTarget::Warehouse)
    }
}

/// A delivery received at a branch (`branch_item_id` set) or at the
/// warehouse (`branch_item_id` empty).
///
/// `target` is local to the client and never sent to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockInputForm {
    pub id: i64,
    #[ts(type = "number")]
    pub qty: Quantity,
    #[ts(type = "number")]
    pub moq: Quantity,
    #[ts(type = "number")]
    pub actual_total_qty: Quantity,
    #[ts(type = "number")]
    pub expected_total_qty: Quantity,
    pub delivered_by: String,
    #[ts(as = "Option<String>")]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_item_id: Option<i64>,
    #[serde(skip)]
    #[ts(skip)]
    pub target: DeliveryTarget,
}

impl StockInputForm {
    /// Blank delivery for a branch item, dated now.
    pub fn for_branch_item(branch_item_id: i64) -> Self {
        StockInputForm {
            branch_item_id: Some(branch_item_id),
            target: DeliveryTarget::Branch,
            ..Self::for_warehouse()
        }
    }

    /// Blank delivery recorded from the headquarters stock monitor, to a
    /// branch item or (with `None`) to the warehouse.
    pub fn for_headquarters(branch_item_id: Option<i64>) -> Self {
        StockInputForm {
            branch_item_id,
            target: DeliveryTarget::Headquarters,
            ..Self::for_warehouse()
        }
    }

    /// Blank warehouse delivery, dated now.
    pub fn for_warehouse() -> Self {
        StockInputForm {
            id: 0,
            qty: Quantity::ZERO,
            moq: Quantity::ZERO,
            actual_total_qty: Quantity::ZERO,
            expected_total_qty: Quantity::ZERO,
            delivered_by: String::new(),
            delivery_date: Some(Utc::now()),
            branch_item_id: None,
            target: DeliveryTarget::Warehouse,
        }
    }

    /// A blank form for the same target and item.
    pub fn renewed(&self) -> Self {
        match self.target {
            DeliveryTarget::Branch => match self.branch_item_id {
                Some(id) => Self::for_branch_item(id),
                None => Self::for_warehouse(),
            },
            DeliveryTarget::Headquarters => Self::for_headquarters(self.branch_item_id),
            DeliveryTarget::Warehouse => Self::for_warehouse(),
        }
    }
}

impl QuantityForm for StockInputForm {
    type Field = StockInputField;

    fn quantity(&self, field: StockInputField) -> Quantity {
        match field {
            StockInputField::Qty => self.qty,
            StockInputField::Moq => self.moq,
            StockInputField::ActualTotalQty => self.actual_total_qty,
            StockInputField::ExpectedTotalQty => self.expected_total_qty,
        }
    }

    fn set_quantity(&mut self, field: StockInputField, value: Quantity) {
        match field {
            StockInputField::Qty => self.qty = value,
            StockInputField::Moq => self.moq = value,
            StockInputField::ActualTotalQty => self.actual_total_qty = value,
            StockInputField::ExpectedTotalQty => self.expected_total_qty = value,
        }
    }

    fn validate(&self) -> ValidationResult<()> {
        for field in StockInputField::ALL {
            if field == StockInputField::Moq && !self.target.requires_moq() {
                continue;
            }
            validate_nonzero_quantity(field.key(), self.quantity(field))?;
        }
        if self.target.requires_delivered_by() {
            validate_required("deliveredBy", &self.delivered_by)?;
        }
        if self.delivery_date.is_none() {
            return Err(crate::error::ValidationError::Required {
                field: "deliveryDate".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Stock Transfer (branch → branch)
// =============================================================================

/// Stock moved from the cashier's branch to another branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockTransferForm {
    pub id: i64,
    #[ts(type = "number")]
    pub quantity: Quantity,
    pub branch_from: String,
    pub branch_to: String,
    /// Branch item the stock leaves from.
    pub branch_from_id: i64,
    pub branch_to_id: i64,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl StockTransferForm {
    /// Blank transfer out of `branch_from`.
    pub fn new(branch_from_id: i64, branch_from: impl Into<String>) -> Self {
        StockTransferForm {
            id: 0,
            quantity: Quantity::ZERO,
            branch_from: branch_from.into(),
            branch_to: String::new(),
            branch_from_id,
            branch_to_id: 0,
            date: Utc::now(),
        }
    }

    /// Records the destination picked from the branch list.
    pub fn select_destination(&mut self, branch_to_id: i64, branch_to: impl Into<String>) {
        self.branch_to_id = branch_to_id;
        self.branch_to = branch_to.into();
    }
}

impl QuantityForm for StockTransferForm {
    type Field = QuantityField;

    fn quantity(&self, _field: QuantityField) -> Quantity {
        self.quantity
    }

    fn set_quantity(&mut self, _field: QuantityField, value: Quantity) {
        self.quantity = value;
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_nonzero_quantity("quantity", self.quantity)?;
        validate_selected_id("branchToId", self.branch_to_id)
    }
}

// =============================================================================
// Return to Warehouse (branch → warehouse)
// =============================================================================

/// Branch stock sent back to the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReturnToWarehouseForm {
    pub id: i64,
    pub branch_item_id: i64,
    pub reason: String,
    #[ts(type = "number")]
    pub quantity: Quantity,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl ReturnToWarehouseForm {
    pub fn new(branch_item_id: i64) -> Self {
        ReturnToWarehouseForm {
            id: 0,
            branch_item_id,
            reason: String::new(),
            quantity: Quantity::ZERO,
            date: Utc::now(),
        }
    }
}

impl QuantityForm for ReturnToWarehouseForm {
    type Field = QuantityField;

    fn quantity(&self, _field: QuantityField) -> Quantity {
        self.quantity
    }

    fn set_quantity(&mut self, _field: QuantityField, value: Quantity) {
        self.quantity = value;
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_nonzero_quantity("quantity", self.quantity)?;
        validate_required("reason", &self.reason)
    }
}

// =============================================================================
// Return to Supplier (warehouse → supplier)
// =============================================================================

/// Warehouse stock sent back to its supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReturnToSupplierForm {
    pub id: i64,
    pub supplier_id: i64,
    pub supplier_name: String,
    pub wh_item_id: i64,
    pub reason: String,
    #[ts(type = "number")]
    pub quantity: Quantity,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl ReturnToSupplierForm {
    pub fn new(wh_item_id: i64) -> Self {
        ReturnToSupplierForm {
            id: 0,
            supplier_id: 0,
            supplier_name: String::new(),
            wh_item_id,
            reason: String::new(),
            quantity: Quantity::ZERO,
            date: Utc::now(),
        }
    }

    /// Records the supplier picked from the supplier list.
    pub fn select_supplier(&mut self, supplier_id: i64, supplier_name: impl Into<String>) {
        self.supplier_id = supplier_id;
        self.supplier_name = supplier_name.into();
    }
}

impl QuantityForm for ReturnToSupplierForm {
    type Field = QuantityField;

    fn quantity(&self, _field: QuantityField) -> Quantity {
        self.quantity
    }

    fn set_quantity(&mut self, _field: QuantityField, value: Quantity) {
        self.quantity = value;
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_nonzero_quantity("quantity", self.quantity)?;
        validate_selected_id("supplierId", self.supplier_id)?;
        validate_required("reason", &self.reason)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
