//! # Domain Types
//!
//! Stock figures received from the BPIMS API. They are the only source of an
//! entry's mode (`sellByUnit`) and of its ceiling (available stock).
//!
//! ## Where Ceilings Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Stock DTOs                                      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ BranchStockDto  │   │   WhStockDto    │   │   ItemStock     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  quantity       │   │  quantity       │   │  ppQty snQty    │       │
//! │  │  whQty          │   │  sellByUnit     │   │  lQty  whQty    │       │
//! │  │  sellByUnit     │   │                 │   │  sellByUnit     │       │
//! │  └────────┬────────┘   └─────────────────┘   └────────┬────────┘       │
//! │           │                                           │                 │
//! │   transfer / return to WH                     return to supplier       │
//! │   ceiling = quantity (Branch)                 ceiling = whQty          │
//! │                                               (Warehouse)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names follow the API's camelCase JSON.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::entry::Ceiling;
use crate::quantity::{EntryMode, Quantity};

// =============================================================================
// Stock Scope
// =============================================================================

/// Where an available-stock figure was counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockScope {
    /// Stock on hand at a branch.
    Branch,
    /// Stock held in the central warehouse.
    Warehouse,
}

impl StockScope {
    /// The noun used in the over-ceiling warning.
    pub fn noun(&self) -> &'static str {
        match self {
            StockScope::Branch => "stock",
            StockScope::Warehouse => "warehouse stock",
        }
    }
}

// =============================================================================
// Branch Stock
// =============================================================================

/// An item as stocked at the cashier's branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BranchStockDto {
    /// Branch item id.
    pub id: i64,
    pub name: String,
    /// Quantity on hand at the branch.
    #[ts(type = "number")]
    pub quantity: Quantity,
    pub unit_of_measure: String,
    /// Below this, the item is flagged as critical.
    #[ts(type = "number")]
    pub critical_value: Quantity,
    pub sell_by_unit: bool,
    #[ts(type = "number | null")]
    #[serde(default)]
    pub moq: Option<Quantity>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Quantity held in the warehouse for the same item.
    #[ts(type = "number")]
    #[serde(default)]
    pub wh_qty: Quantity,
}

impl BranchStockDto {
    #[inline]
    pub fn entry_mode(&self) -> EntryMode {
        EntryMode::from_sell_by_unit(self.sell_by_unit)
    }

    /// Ceiling for moving stock out of the branch (transfer, return).
    pub fn outbound_ceiling(&self) -> Ceiling {
        Ceiling::new(self.quantity, StockScope::Branch)
    }

    /// Checks if stock is at or below the critical value.
    pub fn is_critical(&self) -> bool {
        self.quantity <= self.critical_value
    }
}

// =============================================================================
// Warehouse Stock
// =============================================================================

/// An item as stocked in the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WhStockDto {
    pub id: i64,
    pub name: String,
    #[ts(type = "number")]
    pub quantity: Quantity,
    pub unit_of_measure: String,
    #[ts(type = "number")]
    pub critical_value: Quantity,
    pub sell_by_unit: bool,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[ts(type = "number | null")]
    #[serde(default)]
    pub moq: Option<Quantity>,
}

impl WhStockDto {
    #[inline]
    pub fn entry_mode(&self) -> EntryMode {
        EntryMode::from_sell_by_unit(self.sell_by_unit)
    }

    pub fn outbound_ceiling(&self) -> Ceiling {
        Ceiling::new(self.quantity, StockScope::Warehouse)
    }
}

// =============================================================================
// Item Stock (headquarters monitor)
// =============================================================================

/// One item across all branches and the warehouse, as shown on the
/// headquarters stock monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemStock {
    pub id: i64,
    pub name: String,
    #[ts(type = "number")]
    pub pp_qty: Quantity,
    pub pp_name: String,
    pub pp_id: i64,
    #[ts(type = "number")]
    pub sn_qty: Quantity,
    pub sn_name: String,
    pub sn_id: i64,
    #[ts(type = "number")]
    pub l_qty: Quantity,
    pub l_name: String,
    pub l_id: i64,
    #[ts(type = "number")]
    pub wh_qty: Quantity,
    pub wh_name: String,
    pub wh_id: i64,
    #[ts(type = "number")]
    pub critical_value: Quantity,
    pub sell_by_unit: bool,
    #[ts(type = "number | null")]
    #[serde(default)]
    pub moq: Option<Quantity>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ItemStock {
    #[inline]
    pub fn entry_mode(&self) -> EntryMode {
        EntryMode::from_sell_by_unit(self.sell_by_unit)
    }

    /// Ceiling for returning warehouse stock to a supplier.
    pub fn warehouse_ceiling(&self) -> Ceiling {
        Ceiling::new(self.wh_qty, StockScope::Warehouse)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the central cart; editing its quantity is bounded by the
/// branch stock it will be drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub id: i64,
    pub item_id: i64,
    /// Unit price in pesos.
    pub price: f64,
    #[ts(type = "number")]
    pub quantity: Quantity,
    pub name: String,
    pub sell_by_unit: bool,
    #[ts(type = "number")]
    pub branch_qty: Quantity,
}

impl CartItemDto {
    #[inline]
    pub fn entry_mode(&self) -> EntryMode {
        EntryMode::from_sell_by_unit(self.sell_by_unit)
    }

    pub fn branch_ceiling(&self) -> Ceiling {
        Ceiling::new(self.branch_qty, StockScope::Branch)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
