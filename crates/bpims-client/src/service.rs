//! # Stock Service
//!
//! The backend collaborators the keypad screens read ceilings from and
//! submit finished forms to.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen opens                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  branch_stock(id) / warehouse_stock(id)  ──► mode + ceiling             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  keypad sessions fill the form                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  save_stock_input / save_transfer /                                     │
//! │  return_to_warehouse / return_to_supplier                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use bpims_core::forms::{
    ReturnToSupplierForm, ReturnToWarehouseForm, StockInputForm, StockTransferForm,
};
use bpims_core::{BranchStockDto, Quantity, WhStockDto};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Service Trait
// =============================================================================

/// Stock endpoints of the BPIMS API.
pub trait StockService: Send + Sync {
    /// Branch item with its on-hand quantity.
    fn branch_stock(&self, item_id: i64) -> impl Future<Output = ClientResult<BranchStockDto>> + Send;

    /// Warehouse item with its on-hand quantity.
    fn warehouse_stock(&self, item_id: i64) -> impl Future<Output = ClientResult<WhStockDto>> + Send;

    fn save_stock_input(&self, form: StockInputForm) -> impl Future<Output = ClientResult<()>> + Send;

    fn save_transfer(&self, form: StockTransferForm) -> impl Future<Output = ClientResult<()>> + Send;

    fn return_to_warehouse(
        &self,
        form: ReturnToWarehouseForm,
    ) -> impl Future<Output = ClientResult<()>> + Send;

    fn return_to_supplier(
        &self,
        form: ReturnToSupplierForm,
    ) -> impl Future<Output = ClientResult<()>> + Send;
}

// =============================================================================
// In-Memory Service
// =============================================================================

/// A submission recorded by [`InMemoryStockService`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Submission {
    StockInput(StockInputForm),
    Transfer(StockTransferForm),
    ReturnToWarehouse(ReturnToWarehouseForm),
    ReturnToSupplier(ReturnToSupplierForm),
}

#[derive(Debug, Default)]
struct Inventory {
    branch: HashMap<i64, BranchStockDto>,
    warehouse: HashMap<i64, WhStockDto>,
    submissions: Vec<Submission>,
    offline: bool,
}

/// Stock service backed by in-process maps.
///
/// Movements adjust the stored quantities the way the backend does, so the
/// next screen opened sees the new ceiling.
///
/// ## Usage
/// ```rust,ignore
/// let service = InMemoryStockService::new();
/// service.put_branch_item(item).await;
///
/// let mut screen = StockEntryScreen::load_transfer(&service, 7, "Poblacion", &config).await?;
/// // ... keypad ...
/// screen.submit(&service).await?;
///
/// assert_eq!(service.submissions().await.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockService {
    inner: Arc<Mutex<Inventory>>,
}

impl InMemoryStockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_branch_item(&self, item: BranchStockDto) {
        self.inner.lock().await.branch.insert(item.id, item);
    }

    pub async fn put_warehouse_item(&self, item: WhStockDto) {
        self.inner.lock().await.warehouse.insert(item.id, item);
    }

    /// Makes every call fail with `ServiceUnavailable` until switched back.
    pub async fn set_offline(&self, offline: bool) {
        self.inner.lock().await.offline = offline;
    }

    /// Everything submitted so far, oldest first.
    pub async fn submissions(&self) -> Vec<Submission> {
        self.inner.lock().await.submissions.clone()
    }
}

impl Inventory {
    fn ensure_online(&self) -> ClientResult<()> {
        if self.offline {
            return Err(ClientError::ServiceUnavailable("stock service is offline".into()));
        }
        Ok(())
    }

    fn branch_mut(&mut self, item_id: i64) -> ClientResult<&mut BranchStockDto> {
        self.branch.get_mut(&item_id).ok_or(ClientError::ItemNotFound(item_id))
    }

    fn warehouse_mut(&mut self, item_id: i64) -> ClientResult<&mut WhStockDto> {
        self.warehouse.get_mut(&item_id).ok_or(ClientError::ItemNotFound(item_id))
    }
}

/// Subtracts `amount` from `stock`, refusing to go negative.
fn draw_down(item_id: i64, stock: &mut Quantity, amount: Quantity) -> ClientResult<()> {
    if amount > *stock {
        warn!(item_id, requested = %amount, available = %stock, "Rejected movement above stock");
        return Err(ClientError::InsufficientStock {
            item_id,
            available: *stock,
        });
    }
    *stock = Quantity::from_hundredths(stock.hundredths() - amount.hundredths());
    Ok(())
}

fn add_to(stock: &mut Quantity, amount: Quantity) {
    *stock = Quantity::from_hundredths(stock.hundredths() + amount.hundredths());
}

impl StockService for InMemoryStockService {
    async fn branch_stock(&self, item_id: i64) -> ClientResult<BranchStockDto> {
        let inv = self.inner.lock().await;
        inv.ensure_online()?;
        inv.branch.get(&item_id).cloned().ok_or(ClientError::ItemNotFound(item_id))
    }

    async fn warehouse_stock(&self, item_id: i64) -> ClientResult<WhStockDto> {
        let inv = self.inner.lock().await;
        inv.ensure_online()?;
        inv.warehouse.get(&item_id).cloned().ok_or(ClientError::ItemNotFound(item_id))
    }

    async fn save_stock_input(&self, form: StockInputForm) -> ClientResult<()> {
        let mut inv = self.inner.lock().await;
        inv.ensure_online()?;
        match form.branch_item_id {
            Some(id) => add_to(&mut inv.branch_mut(id)?.quantity, form.qty),
            None => debug!("Warehouse delivery recorded without a target item"),
        }
        debug!(qty = %form.qty, delivered_by = %form.delivered_by, "Stock input saved");
        inv.submissions.push(Submission::StockInput(form));
        Ok(())
    }

    async fn save_transfer(&self, form: StockTransferForm) -> ClientResult<()> {
        let mut inv = self.inner.lock().await;
        inv.ensure_online()?;
        let item = inv.branch_mut(form.branch_from_id)?;
        draw_down(item.id, &mut item.quantity, form.quantity)?;
        debug!(from = %form.branch_from, to = %form.branch_to, qty = %form.quantity, "Transfer saved");
        inv.submissions.push(Submission::Transfer(form));
        Ok(())
    }

    async fn return_to_warehouse(&self, form: ReturnToWarehouseForm) -> ClientResult<()> {
        let mut inv = self.inner.lock().await;
        inv.ensure_online()?;
        let item = inv.branch_mut(form.branch_item_id)?;
        draw_down(item.id, &mut item.quantity, form.quantity)?;
        add_to(&mut item.wh_qty, form.quantity);
        debug!(item_id = form.branch_item_id, qty = %form.quantity, "Return to warehouse saved");
        inv.submissions.push(Submission::ReturnToWarehouse(form));
        Ok(())
    }

    async fn return_to_supplier(&self, form: ReturnToSupplierForm) -> ClientResult<()> {
        let mut inv = self.inner.lock().await;
        inv.ensure_online()?;
        let item = inv.warehouse_mut(form.wh_item_id)?;
        draw_down(item.id, &mut item.quantity, form.quantity)?;
        debug!(supplier = %form.supplier_name, qty = %form.quantity, "Return to supplier saved");
        inv.submissions.push(Submission::ReturnToSupplier(form));
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn branch_item(id: i64, hundredths: i64) -> BranchStockDto {
        BranchStockDto {
            id,
            name: "Deformed Bar 10mm".to_string(),
            quantity: Quantity::from_hundredths(hundredths),
            unit_of_measure: "pcs".to_string(),
            critical_value: Quantity::from_units(5),
            sell_by_unit: true,
            moq: None,
            image_path: None,
            image_url: None,
            wh_qty: Quantity::ZERO,
        }
    }

    #[tokio::test]
    async fn test_missing_item() {
        let service = InMemoryStockService::new();
        assert!(matches!(
            service.branch_stock(3).await,
            Err(ClientError::ItemNotFound(3))
        ));
    }

    #[tokio::test]
    async fn test_transfer_draws_down_branch_stock() {
        let service = InMemoryStockService::new();
        service.put_branch_item(branch_item(1, 1200)).await;

        let mut form = StockTransferForm::new(1, "Poblacion");
        form.quantity = Quantity::from_units(5);
        form.select_destination(2, "San Nicolas");
        service.save_transfer(form).await.unwrap();

        let item = service.branch_stock(1).await.unwrap();
        assert_eq!(item.quantity, Quantity::from_units(7));
        assert_eq!(service.submissions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_movement_above_stock_is_refused() {
        let service = InMemoryStockService::new();
        service.put_branch_item(branch_item(1, 300)).await;

        let mut form = ReturnToWarehouseForm::new(1);
        form.quantity = Quantity::from_units(4);
        form.reason = "Damaged".to_string();
        let err = service.return_to_warehouse(form).await.unwrap_err();
        assert!(matches!(err, ClientError::InsufficientStock { item_id: 1, .. }));
        assert!(service.submissions().await.is_empty());
    }

    #[tokio::test]
    async fn test_offline_is_retryable() {
        let service = InMemoryStockService::new();
        service.put_branch_item(branch_item(1, 300)).await;
        service.set_offline(true).await;
        assert!(service.branch_stock(1).await.unwrap_err().is_retryable());

        service.set_offline(false).await;
        assert!(service.branch_stock(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_stock_input_adds_to_branch() {
        let service = InMemoryStockService::new();
        service.put_branch_item(branch_item(4, 100)).await;

        let mut form = StockInputForm::for_branch_item(4);
        form.qty = Quantity::from_units(10);
        service.save_stock_input(form).await.unwrap();

        assert_eq!(service.branch_stock(4).await.unwrap().quantity, Quantity::from_units(11));
        assert!(matches!(service.submissions().await[0], Submission::StockInput(_)));
    }
}
