//! # Stock Entry Screens
//!
//! Host-side wiring of one keypad screen: the stock DTO picks the entry mode
//! and ceiling, the controller runs the edit session, the form collects the
//! committed values, and the service receives the finished form.
//!
//! ## Screen Events
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tap field ──► open_field(f)      controller.begin(f, form[f])          │
//! │  tap key   ──► key(k)             controller.press(k)                   │
//! │  DONE      ──► done()             form[f] = buffer                      │
//! │  BACK      ──► back()             form[f] = value before editing        │
//! │  SAVE      ──► submit(service)    validate → send → fresh form          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Debug;
use std::future::Future;

use bpims_core::forms::{
    QuantityField, ReturnToSupplierForm, ReturnToWarehouseForm, StockInputForm, StockTransferForm,
};
use bpims_core::{
    BranchStockDto, CartItemDto, Ceiling, CoreError, EntryField, EntryLimits, EntryMode,
    ItemStock, KeyFeedback, KeypadKey, Quantity, QuantityEntryController, QuantityForm,
    WhStockDto,
};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::service::StockService;

// =============================================================================
// Submittable Forms
// =============================================================================

/// A form a screen can send to the stock service.
pub trait SubmitForm: QuantityForm + Clone + Debug + Send + Sync {
    /// Sends a copy of the form to its endpoint.
    fn send<S: StockService>(&self, service: &S) -> impl Future<Output = ClientResult<()>> + Send;

    /// A blank form for the same item, dated now.
    fn renewed(&self) -> Self;
}

impl SubmitForm for StockInputForm {
    async fn send<S: StockService>(&self, service: &S) -> ClientResult<()> {
        service.save_stock_input(self.clone()).await
    }

    fn renewed(&self) -> Self {
        StockInputForm::renewed(self)
    }
}

impl SubmitForm for StockTransferForm {
    async fn send<S: StockService>(&self, service: &S) -> ClientResult<()> {
        service.save_transfer(self.clone()).await
    }

    fn renewed(&self) -> Self {
        StockTransferForm::new(self.branch_from_id, self.branch_from.clone())
    }
}

impl SubmitForm for ReturnToWarehouseForm {
    async fn send<S: StockService>(&self, service: &S) -> ClientResult<()> {
        service.return_to_warehouse(self.clone()).await
    }

    fn renewed(&self) -> Self {
        ReturnToWarehouseForm::new(self.branch_item_id)
    }
}

impl SubmitForm for ReturnToSupplierForm {
    async fn send<S: StockService>(&self, service: &S) -> ClientResult<()> {
        service.return_to_supplier(self.clone()).await
    }

    fn renewed(&self) -> Self {
        ReturnToSupplierForm::new(self.wh_item_id)
    }
}

// =============================================================================
// Stock Entry Screen
// =============================================================================

/// One stock screen: a form plus the keypad session that fills it.
///
/// ## Usage
/// ```rust,ignore
/// let mut screen = StockEntryScreen::transfer(&item, "Poblacion", config.entry_limits());
/// screen.open_field(QuantityField::Quantity)?;
/// screen.key(KeypadKey::Digit(5))?;
/// screen.done()?;
/// screen.form_mut().select_destination(2, "San Nicolas");
/// screen.submit(&service).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StockEntryScreen<F: SubmitForm> {
    form: F,
    entry: QuantityEntryController<F::Field>,
}

impl<F: SubmitForm> StockEntryScreen<F> {
    pub fn new(form: F, mode: EntryMode, ceiling: Option<Ceiling>, limits: EntryLimits) -> Self {
        StockEntryScreen {
            form,
            entry: QuantityEntryController::with_limits(mode, ceiling, limits),
        }
    }

    #[inline]
    pub fn form(&self) -> &F {
        &self.form
    }

    /// Text fields and pickers (reason, delivered by, destination).
    #[inline]
    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    #[inline]
    pub fn mode(&self) -> EntryMode {
        self.entry.mode()
    }

    #[inline]
    pub fn ceiling(&self) -> Option<&Ceiling> {
        self.entry.ceiling()
    }

    /// The field whose keypad is open, if any.
    pub fn editing_field(&self) -> Option<F::Field> {
        self.entry.editing_field()
    }

    /// Keypad heading, e.g. "Enter Quantity".
    pub fn heading(&self) -> Option<String> {
        self.entry.editing_field().map(|field| field.prompt())
    }

    pub fn display(&self) -> String {
        self.entry.display()
    }

    pub fn message(&self) -> Option<&str> {
        self.entry.message()
    }

    /// A committed field value as the form shows it.
    pub fn field_display(&self, field: F::Field) -> String {
        self.form.quantity(field).format(self.entry.mode())
    }

    pub fn open_field(&mut self, field: F::Field) -> ClientResult<()> {
        self.entry.begin(field, self.form.quantity(field))?;
        Ok(())
    }

    pub fn key(&mut self, key: KeypadKey) -> ClientResult<KeyFeedback> {
        Ok(self.entry.press(key)?)
    }

    /// Applies a keypad label. The blank key does nothing and yields `None`.
    pub fn key_label(&mut self, label: &str) -> ClientResult<Option<KeyFeedback>> {
        match KeypadKey::parse_label(label)? {
            Some(key) => self.key(key).map(Some),
            None => Ok(None),
        }
    }

    /// DONE: keeps the typed value.
    pub fn done(&mut self) -> ClientResult<Quantity> {
        let commit = self.entry.done()?;
        self.form.apply(commit);
        Ok(commit.value)
    }

    /// BACK: restores the value from before the keypad opened.
    pub fn back(&mut self) -> ClientResult<Quantity> {
        let commit = self.entry.cancel()?;
        self.form.apply(commit);
        Ok(commit.value)
    }

    /// Whether SAVE is enabled.
    pub fn can_submit(&self) -> bool {
        !self.entry.is_editing() && self.form.is_valid()
    }

    /// SAVE: sends the form and starts a fresh one. Returns what was sent.
    ///
    /// ## Errors
    /// - `AlreadyEditing` while a keypad is still open
    /// - `Validation` when a form rule fails; nothing is sent
    /// - whatever the service reports; the form is kept for a retry
    pub async fn submit<S: StockService>(&mut self, service: &S) -> ClientResult<F> {
        if let Some(field) = self.entry.editing_field() {
            return Err(CoreError::AlreadyEditing {
                field: format!("{:?}", field),
            }
            .into());
        }
        self.form.validate()?;

        self.form.send(service).await?;
        debug!(form = ?self.form, "Stock form submitted");

        let next = self.form.renewed();
        Ok(std::mem::replace(&mut self.form, next))
    }
}

// =============================================================================
// Screen Constructors
// =============================================================================

impl StockEntryScreen<StockInputForm> {
    /// Delivery received at a branch. No ceiling applies.
    pub fn branch_delivery(item: &BranchStockDto, limits: EntryLimits) -> Self {
        Self::new(
            StockInputForm::for_branch_item(item.id),
            item.entry_mode(),
            None,
            limits,
        )
    }

    /// Delivery received at the warehouse.
    pub fn warehouse_delivery(item: &WhStockDto, limits: EntryLimits) -> Self {
        Self::new(StockInputForm::for_warehouse(), item.entry_mode(), None, limits)
    }

    /// Delivery from the headquarters stock monitor to a branch item. The
    /// stock comes out of the warehouse, so warehouse stock bounds it.
    pub fn headquarters_branch_delivery(
        item: &ItemStock,
        branch_item_id: i64,
        limits: EntryLimits,
    ) -> Self {
        Self::new(
            StockInputForm::for_headquarters(Some(branch_item_id)),
            item.entry_mode(),
            Some(item.warehouse_ceiling()),
            limits,
        )
    }

    /// Delivery from the headquarters stock monitor into the warehouse.
    pub fn headquarters_warehouse_delivery(item: &ItemStock, limits: EntryLimits) -> Self {
        Self::new(
            StockInputForm::for_headquarters(None),
            item.entry_mode(),
            None,
            limits,
        )
    }
}

impl StockEntryScreen<StockTransferForm> {
    /// Transfer out of the cashier's branch, bounded by branch stock.
    pub fn transfer(item: &BranchStockDto, branch_name: &str, limits: EntryLimits) -> Self {
        Self::new(
            StockTransferForm::new(item.id, branch_name),
            item.entry_mode(),
            Some(item.outbound_ceiling()),
            limits,
        )
    }

    pub async fn load_transfer<S: StockService>(
        service: &S,
        item_id: i64,
        branch_name: &str,
        config: &ClientConfig,
    ) -> ClientResult<Self> {
        let item = service.branch_stock(item_id).await?;
        Ok(Self::transfer(&item, branch_name, config.entry_limits()))
    }
}

impl StockEntryScreen<ReturnToWarehouseForm> {
    /// Return to the warehouse, bounded by branch stock.
    pub fn return_to_warehouse(item: &BranchStockDto, limits: EntryLimits) -> Self {
        Self::new(
            ReturnToWarehouseForm::new(item.id),
            item.entry_mode(),
            Some(item.outbound_ceiling()),
            limits,
        )
    }

    pub async fn load_return_to_warehouse<S: StockService>(
        service: &S,
        item_id: i64,
        config: &ClientConfig,
    ) -> ClientResult<Self> {
        let item = service.branch_stock(item_id).await?;
        Ok(Self::return_to_warehouse(&item, config.entry_limits()))
    }
}

impl StockEntryScreen<ReturnToSupplierForm> {
    /// Return to a supplier from the headquarters stock monitor, bounded by
    /// warehouse stock.
    pub fn return_to_supplier(item: &ItemStock, limits: EntryLimits) -> Self {
        Self::new(
            ReturnToSupplierForm::new(item.wh_id),
            item.entry_mode(),
            Some(item.warehouse_ceiling()),
            limits,
        )
    }

    pub async fn load_return_to_supplier<S: StockService>(
        service: &S,
        wh_item_id: i64,
        config: &ClientConfig,
    ) -> ClientResult<Self> {
        let item = service.warehouse_stock(wh_item_id).await?;
        Ok(Self::new(
            ReturnToSupplierForm::new(item.id),
            item.entry_mode(),
            Some(item.outbound_ceiling()),
            config.entry_limits(),
        ))
    }
}

// =============================================================================
// Cart Quantity
// =============================================================================

/// Quantity editor for one cart line, bounded by branch stock.
#[derive(Debug, Clone)]
pub struct CartQuantityScreen {
    item: CartItemDto,
    entry: QuantityEntryController<QuantityField>,
}

impl CartQuantityScreen {
    pub fn new(item: CartItemDto, config: &ClientConfig) -> Self {
        let entry = QuantityEntryController::with_limits(
            item.entry_mode(),
            Some(item.branch_ceiling()),
            config.entry_limits(),
        );
        CartQuantityScreen { item, entry }
    }

    #[inline]
    pub fn item(&self) -> &CartItemDto {
        &self.item
    }

    pub fn display(&self) -> String {
        self.entry.display()
    }

    pub fn message(&self) -> Option<&str> {
        self.entry.message()
    }

    pub fn open(&mut self) -> ClientResult<()> {
        self.entry.begin(QuantityField::Quantity, self.item.quantity)?;
        Ok(())
    }

    pub fn key(&mut self, key: KeypadKey) -> ClientResult<KeyFeedback> {
        Ok(self.entry.press(key)?)
    }

    /// Keeps the typed quantity on the cart line.
    pub fn done(&mut self) -> ClientResult<Quantity> {
        let commit = self.entry.done()?;
        self.item.quantity = commit.value;
        Ok(commit.value)
    }

    pub fn back(&mut self) -> ClientResult<Quantity> {
        let commit = self.entry.cancel()?;
        self.item.quantity = commit.value;
        Ok(commit.value)
    }

    /// Line total in pesos at the current quantity.
    pub fn line_total(&self) -> bpims_core::Money {
        bpims_core::Money::from_f64(self.item.price * self.item.quantity.as_f64())
    }
}

// =============================================================================
// Item Quantity
// =============================================================================

/// Quantity typed on the sales item grid before an item is added to the
/// cart. Always decimal, capped at the item digit limit (99.99 by default),
/// with no stock ceiling.
#[derive(Debug, Clone)]
pub struct ItemQuantityScreen {
    quantity: Quantity,
    entry: QuantityEntryController<QuantityField>,
}

impl ItemQuantityScreen {
    pub fn new(config: &ClientConfig) -> Self {
        ItemQuantityScreen {
            quantity: Quantity::ZERO,
            entry: QuantityEntryController::with_limits(
                EntryMode::Decimal,
                None,
                config.item_limits(),
            ),
        }
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn display(&self) -> String {
        self.entry.display()
    }

    pub fn open(&mut self) -> ClientResult<()> {
        self.entry.begin(QuantityField::Quantity, self.quantity)?;
        Ok(())
    }

    pub fn key(&mut self, key: KeypadKey) -> ClientResult<KeyFeedback> {
        Ok(self.entry.press(key)?)
    }

    pub fn done(&mut self) -> ClientResult<Quantity> {
        self.quantity = self.entry.done()?.value;
        Ok(self.quantity)
    }

    pub fn back(&mut self) -> ClientResult<Quantity> {
        self.quantity = self.entry.cancel()?.value;
        Ok(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bpims_core::forms::StockInputField;
    use bpims_core::ValidationError;

    use crate::error::ClientError;
    use crate::service::InMemoryStockService;

    fn cement(quantity: Quantity, sell_by_unit: bool) -> BranchStockDto {
        BranchStockDto {
            id: 7,
            name: "Portland Cement 40kg".to_string(),
            quantity,
            unit_of_measure: "bag".to_string(),
            critical_value: Quantity::from_units(10),
            sell_by_unit,
            moq: None,
            image_path: None,
            image_url: None,
            wh_qty: Quantity::from_units(200),
        }
    }

    fn press_all<F: SubmitForm>(screen: &mut StockEntryScreen<F>, digits: &[u8]) {
        for &d in digits {
            screen.key(KeypadKey::Digit(d)).unwrap();
        }
    }

    #[test]
    fn test_mode_and_ceiling_from_item() {
        let screen = StockEntryScreen::transfer(
            &cement(Quantity::from_hundredths(1250), false),
            "Poblacion",
            EntryLimits::default(),
        );
        assert_eq!(screen.mode(), EntryMode::Decimal);
        assert_eq!(screen.ceiling().map(|c| c.limit), Some(Quantity::from_hundredths(1250)));
        assert_eq!(screen.field_display(QuantityField::Quantity), "0.00");
    }

    #[test]
    fn test_back_restores_previous_value() {
        let mut screen = StockEntryScreen::return_to_warehouse(
            &cement(Quantity::from_units(40), true),
            EntryLimits::default(),
        );
        screen.open_field(QuantityField::Quantity).unwrap();
        press_all(&mut screen, &[3]);
        assert_eq!(screen.done().unwrap(), Quantity::from_units(3));

        screen.open_field(QuantityField::Quantity).unwrap();
        assert_eq!(screen.heading().as_deref(), Some("Enter Quantity"));
        press_all(&mut screen, &[0]);
        assert_eq!(screen.display(), "30");
        assert_eq!(screen.back().unwrap(), Quantity::from_units(3));
        assert_eq!(screen.form().quantity, Quantity::from_units(3));
    }

    #[test]
    fn test_ceiling_message_surfaces() {
        let mut screen = StockEntryScreen::transfer(
            &cement(Quantity::from_units(12), true),
            "Poblacion",
            EntryLimits::default(),
        );
        screen.open_field(QuantityField::Quantity).unwrap();
        press_all(&mut screen, &[1, 5]);
        assert_eq!(screen.display(), "1");
        assert_eq!(
            screen.message(),
            Some("Quantity exceeds available stock. Available stock: 12")
        );
    }

    #[test]
    fn test_key_labels() {
        let mut screen = StockEntryScreen::branch_delivery(
            &cement(Quantity::ZERO, true),
            EntryLimits::default(),
        );
        screen.open_field(StockInputField::Moq).unwrap();
        assert!(screen.key_label("").unwrap().is_none());
        let feedback = screen.key_label("8").unwrap().unwrap();
        assert_eq!(feedback.display, "8");
        assert!(screen.key_label("x").is_err());
    }

    #[test]
    fn test_supplier_return_uses_warehouse_scope() {
        let item = ItemStock {
            id: 1,
            name: "GI Wire #16".to_string(),
            pp_qty: Quantity::ZERO,
            pp_name: "Poblacion".to_string(),
            pp_id: 1,
            sn_qty: Quantity::ZERO,
            sn_name: "San Nicolas".to_string(),
            sn_id: 2,
            l_qty: Quantity::ZERO,
            l_name: "Lapasan".to_string(),
            l_id: 3,
            wh_qty: Quantity::from_hundredths(550),
            wh_name: "Main Warehouse".to_string(),
            wh_id: 31,
            critical_value: Quantity::ZERO,
            sell_by_unit: false,
            moq: None,
            image_path: None,
            image_url: None,
        };
        let mut screen = StockEntryScreen::return_to_supplier(&item, EntryLimits::default());
        assert_eq!(screen.form().wh_item_id, 31);

        screen.open_field(QuantityField::Quantity).unwrap();
        press_all(&mut screen, &[6, 0, 0]);
        assert_eq!(screen.display(), "0.60");
        assert_eq!(
            screen.message(),
            Some("Quantity exceeds available warehouse stock. Available stock: 5.50")
        );
    }

    fn cart_line(sell_by_unit: bool, branch_qty: Quantity) -> CartItemDto {
        CartItemDto {
            id: 1,
            item_id: 7,
            price: 285.0,
            quantity: Quantity::from_units(1),
            name: "Portland Cement 40kg".to_string(),
            sell_by_unit,
            branch_qty,
        }
    }

    #[test]
    fn test_cart_quantity_is_bounded_by_stock_only() {
        let mut cart = CartQuantityScreen::new(
            cart_line(true, Quantity::from_units(100_000)),
            &ClientConfig::default(),
        );
        cart.open().unwrap();
        for d in [2, 3, 4, 5] {
            assert!(cart.key(KeypadKey::Digit(d)).unwrap().accepted);
        }
        assert_eq!(cart.display(), "12345");

        let feedback = cart.key(KeypadKey::Digit(6)).unwrap();
        assert!(!feedback.accepted);
        assert_eq!(
            feedback.message.as_deref(),
            Some("Quantity exceeds available stock. Available stock: 100000")
        );

        assert_eq!(cart.done().unwrap(), Quantity::from_units(12_345));
        assert_eq!(cart.line_total().to_fixed(), "3518325.00");
    }

    #[test]
    fn test_item_quantity_caps_at_four_digits() {
        let mut screen = ItemQuantityScreen::new(&ClientConfig::default());
        screen.open().unwrap();
        for d in [1, 2, 3, 4] {
            assert!(screen.key(KeypadKey::Digit(d)).unwrap().accepted);
        }
        assert_eq!(screen.display(), "12.34");

        let feedback = screen.key(KeypadKey::Digit(5)).unwrap();
        assert!(!feedback.accepted);
        assert_eq!(feedback.message, None);
        assert_eq!(screen.done().unwrap(), Quantity::from_hundredths(1234));

        screen.open().unwrap();
        screen.key(KeypadKey::Backspace).unwrap();
        assert_eq!(screen.display(), "1.23");
        assert_eq!(screen.back().unwrap(), Quantity::from_hundredths(1234));
    }

    fn hq_item(wh_hundredths: i64, sell_by_unit: bool) -> ItemStock {
        ItemStock {
            id: 1,
            name: "Marine Plywood 1/2".to_string(),
            pp_qty: Quantity::ZERO,
            pp_name: "Poblacion".to_string(),
            pp_id: 1,
            sn_qty: Quantity::ZERO,
            sn_name: "San Nicolas".to_string(),
            sn_id: 2,
            l_qty: Quantity::ZERO,
            l_name: "Lapasan".to_string(),
            l_id: 3,
            wh_qty: Quantity::from_hundredths(wh_hundredths),
            wh_name: "Main Warehouse".to_string(),
            wh_id: 31,
            critical_value: Quantity::ZERO,
            sell_by_unit,
            moq: None,
            image_path: None,
            image_url: None,
        }
    }

    #[test]
    fn test_headquarters_branch_delivery_bounded_by_warehouse() {
        let item = hq_item(2000, true);
        let mut screen =
            StockEntryScreen::headquarters_branch_delivery(&item, 44, EntryLimits::default());
        assert_eq!(screen.form().branch_item_id, Some(44));

        screen.open_field(StockInputField::Qty).unwrap();
        press_all(&mut screen, &[2, 5]);
        assert_eq!(screen.display(), "2");
        assert_eq!(
            screen.message(),
            Some("Quantity exceeds available warehouse stock. Available stock: 20")
        );
        press_all(&mut screen, &[0]);
        assert_eq!(screen.done().unwrap(), Quantity::from_units(20));
    }

    #[test]
    fn test_headquarters_warehouse_delivery_has_no_ceiling() {
        let item = hq_item(0, false);
        let mut screen =
            StockEntryScreen::headquarters_warehouse_delivery(&item, EntryLimits::default());
        assert!(screen.ceiling().is_none());
        assert_eq!(screen.form().branch_item_id, None);

        screen.open_field(StockInputField::Qty).unwrap();
        press_all(&mut screen, &[9, 0, 0]);
        assert_eq!(screen.display(), "9.00");
        assert_eq!(screen.message(), None);
    }

    #[tokio::test]
    async fn test_invalid_form_is_never_sent() {
        let service = InMemoryStockService::new();
        let item = cement(Quantity::from_units(40), true);
        service.put_branch_item(item.clone()).await;

        let mut screen = StockEntryScreen::return_to_warehouse(&item, EntryLimits::default());
        screen.open_field(QuantityField::Quantity).unwrap();
        press_all(&mut screen, &[2]);

        let err = screen.submit(&service).await.unwrap_err();
        assert!(matches!(err, ClientError::Core(CoreError::AlreadyEditing { .. })));

        screen.done().unwrap();
        assert!(!screen.can_submit());
        let err = screen.submit(&service).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Core(CoreError::Validation(ValidationError::Required { ref field })) if field == "reason"
        ));
        assert!(service.submissions().await.is_empty());
    }
}
