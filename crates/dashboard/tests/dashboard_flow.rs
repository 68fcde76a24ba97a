//! Behavior tests for the dashboard mutators against in-memory fakes.

#![allow(clippy::unwrap_used)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use clementine_core::{
    AssetRef, Order, OrderId, OrderStatus, Product, ProductId, StatusFilter,
};
use clementine_dashboard::prompt::{ConfirmPrompt, Notice, NoticeTone, OperatorPrompt, PromptTone};
use clementine_dashboard::store::{ContentStore, ImageUpload, StoreError};
use clementine_dashboard::{Dashboard, DashboardError, Outcome, Session};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
enum StoreCall {
    FetchProducts,
    FetchOrders,
    Patch {
        document_id: String,
        set: serde_json::Value,
    },
    Delete {
        document_id: String,
    },
    UploadImage {
        filename: String,
    },
}

struct FakeStoreInner {
    products: Vec<Product>,
    orders: Vec<Order>,
    asset: AssetRef,
    calls: RefCell<Vec<StoreCall>>,
    fail_patch: Cell<bool>,
    fail_delete: Cell<bool>,
    fail_upload: Cell<bool>,
}

#[derive(Clone)]
struct FakeStore(Rc<FakeStoreInner>);

impl FakeStore {
    fn new(products: Vec<Product>, orders: Vec<Order>) -> Self {
        Self(Rc::new(FakeStoreInner {
            products,
            orders,
            asset: AssetRef::new("image-fake01-800x600-png"),
            calls: RefCell::new(Vec::new()),
            fail_patch: Cell::new(false),
            fail_delete: Cell::new(false),
            fail_upload: Cell::new(false),
        }))
    }

    fn calls(&self) -> Vec<StoreCall> {
        self.0.calls.borrow().clone()
    }

    fn calls_after_load(&self) -> Vec<StoreCall> {
        self.calls()
            .into_iter()
            .filter(|call| {
                !matches!(call, StoreCall::FetchProducts | StoreCall::FetchOrders)
            })
            .collect()
    }
}

impl ContentStore for FakeStore {
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        self.0.calls.borrow_mut().push(StoreCall::FetchProducts);
        Ok(self.0.products.clone())
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.0.calls.borrow_mut().push(StoreCall::FetchOrders);
        Ok(self.0.orders.clone())
    }

    async fn patch(&self, document_id: &str, set: serde_json::Value) -> Result<(), StoreError> {
        self.0.calls.borrow_mut().push(StoreCall::Patch {
            document_id: document_id.to_string(),
            set,
        });
        if self.0.fail_patch.get() {
            return Err(StoreError::Api("write failed".to_string()));
        }
        Ok(())
    }

    async fn delete(&self, document_id: &str) -> Result<(), StoreError> {
        self.0.calls.borrow_mut().push(StoreCall::Delete {
            document_id: document_id.to_string(),
        });
        if self.0.fail_delete.get() {
            return Err(StoreError::Api("delete failed".to_string()));
        }
        Ok(())
    }

    async fn upload_image(&self, upload: &ImageUpload) -> Result<AssetRef, StoreError> {
        self.0.calls.borrow_mut().push(StoreCall::UploadImage {
            filename: upload.filename.clone(),
        });
        if self.0.fail_upload.get() {
            return Err(StoreError::Api("upload failed".to_string()));
        }
        Ok(self.0.asset.clone())
    }
}

#[derive(Default)]
struct PromptInner {
    answers: RefCell<VecDeque<bool>>,
    confirms: RefCell<Vec<ConfirmPrompt>>,
    notices: RefCell<Vec<Notice>>,
}

#[derive(Clone, Default)]
struct ScriptedPrompt(Rc<PromptInner>);

impl ScriptedPrompt {
    fn answering(answers: &[bool]) -> Self {
        let prompt = Self::default();
        prompt.0.answers.borrow_mut().extend(answers.iter().copied());
        prompt
    }

    fn confirms(&self) -> Vec<ConfirmPrompt> {
        self.0.confirms.borrow().clone()
    }

    fn notices(&self) -> Vec<Notice> {
        self.0.notices.borrow().clone()
    }
}

impl OperatorPrompt for ScriptedPrompt {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.0.confirms.borrow_mut().push(prompt.clone());
        self.0.answers.borrow_mut().pop_front().unwrap_or(false)
    }

    fn notify(&self, notice: &Notice) {
        self.0.notices.borrow_mut().push(notice.clone());
    }
}

fn order(id: &str, email: &str, total: i64, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        first_name: "Alva".to_string(),
        last_name: "Berg".to_string(),
        phone: "555-0100".to_string(),
        email: email.to_string(),
        address: "1 Orchard Way".to_string(),
        city: "Portland".to_string(),
        zip_code: "97201".to_string(),
        total: Decimal::from(total),
        discount: Decimal::ZERO,
        order_date: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        status,
        cart_items: Vec::new(),
    }
}

fn product(id: &str, name: &str, price: i64, stock: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Decimal::from(price),
        stock_quantity: stock,
        description: None,
        image: None,
        tags: String::new(),
    }
}

fn sample_orders() -> Vec<Order> {
    vec![
        order("o1", "a@example.com", 100, OrderStatus::Pending),
        order("o2", "a@example.com", 50, OrderStatus::Pending),
        order("o3", "b@example.com", 25, OrderStatus::Success),
    ]
}

async fn loaded_dashboard(
    store: &FakeStore,
    prompt: &ScriptedPrompt,
) -> Dashboard<FakeStore, ScriptedPrompt> {
    let mut dashboard =
        Dashboard::new(store.clone(), prompt.clone(), &Session::authenticated()).unwrap();
    dashboard.refresh().await.unwrap();
    dashboard
}

#[tokio::test]
async fn test_anonymous_session_is_refused() {
    let store = FakeStore::new(Vec::new(), Vec::new());
    let result = Dashboard::new(store, ScriptedPrompt::default(), &Session::anonymous());
    assert!(matches!(result, Err(DashboardError::NotAuthenticated)));
}

#[tokio::test]
async fn test_refresh_loads_collections_and_metrics() {
    let store = FakeStore::new(vec![product("p1", "Oak Stool", 40, 3)], sample_orders());
    let prompt = ScriptedPrompt::default();
    let dashboard = loaded_dashboard(&store, &prompt).await;

    assert_eq!(dashboard.products().len(), 1);
    assert_eq!(dashboard.orders().len(), 3);

    let metrics = dashboard.metrics();
    assert_eq!(metrics.total_revenue, Decimal::from(175));
    assert_eq!(metrics.total_orders, 3);
    assert_eq!(metrics.total_customers, 2);
    assert_eq!(metrics.pending_deliveries, 2);
}

#[tokio::test]
async fn test_status_filter_preserves_order() {
    let store = FakeStore::new(Vec::new(), sample_orders());
    let prompt = ScriptedPrompt::default();
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    dashboard.set_status_filter(StatusFilter::Pending);
    let ids: Vec<&str> = dashboard
        .filtered_orders()
        .iter()
        .map(|o| o.id.as_str())
        .collect();
    assert_eq!(ids, ["o1", "o2"]);

    dashboard.set_status_filter(StatusFilter::All);
    assert_eq!(dashboard.filtered_orders().len(), 3);
}

#[tokio::test]
async fn test_declined_status_change_writes_nothing() {
    let store = FakeStore::new(Vec::new(), sample_orders());
    let prompt = ScriptedPrompt::answering(&[false]);
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let outcome = dashboard
        .set_order_status(&OrderId::new("o1"), OrderStatus::Dispatch)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    assert!(store.calls_after_load().is_empty());
    assert_eq!(dashboard.orders()[0].status, OrderStatus::Pending);
    assert!(prompt.notices().is_empty());
}

#[tokio::test]
async fn test_confirmed_status_change_patches_and_updates_locally() {
    let store = FakeStore::new(Vec::new(), sample_orders());
    let prompt = ScriptedPrompt::answering(&[true]);
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let outcome = dashboard
        .set_order_status(&OrderId::new("o1"), OrderStatus::Dispatch)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(
        store.calls_after_load(),
        [StoreCall::Patch {
            document_id: "o1".to_string(),
            set: serde_json::json!({ "status": "dispatch" }),
        }]
    );
    assert_eq!(dashboard.orders()[0].status, OrderStatus::Dispatch);
    // Metrics follow the local change without a re-fetch.
    assert_eq!(dashboard.metrics().pending_deliveries, 1);

    let confirms = prompt.confirms();
    assert_eq!(confirms.len(), 1);
    assert_eq!(confirms[0].title, "Confirm Status Change?");
    assert_eq!(confirms[0].tone, PromptTone::Question);

    let notices = prompt.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].tone, NoticeTone::Success);
    assert_eq!(notices[0].title, "Updated!");
}

#[tokio::test]
async fn test_non_selectable_status_is_refused_before_prompting() {
    let store = FakeStore::new(Vec::new(), sample_orders());
    let prompt = ScriptedPrompt::answering(&[true]);
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let result = dashboard
        .set_order_status(&OrderId::new("o1"), OrderStatus::Unset)
        .await;
    assert!(matches!(result, Err(DashboardError::StatusNotSelectable(_))));

    let result = dashboard
        .set_order_status(&OrderId::new("o1"), OrderStatus::Unknown("refunded".to_string()))
        .await;
    assert!(matches!(result, Err(DashboardError::StatusNotSelectable(_))));

    assert!(prompt.confirms().is_empty());
    assert!(store.calls_after_load().is_empty());
}

#[tokio::test]
async fn test_failed_status_write_reports_error_and_keeps_local_state() {
    let store = FakeStore::new(Vec::new(), sample_orders());
    store.0.fail_patch.set(true);
    let prompt = ScriptedPrompt::answering(&[true]);
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let result = dashboard
        .set_order_status(&OrderId::new("o1"), OrderStatus::Success)
        .await;

    assert!(matches!(result, Err(DashboardError::Store(_))));
    assert_eq!(dashboard.orders()[0].status, OrderStatus::Pending);
    assert_eq!(dashboard.metrics().pending_deliveries, 2);

    let notices = prompt.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].tone, NoticeTone::Error);
    assert_eq!(notices[0].title, "Error!");
}

#[tokio::test]
async fn test_confirmed_order_delete_removes_locally_without_refetch() {
    let store = FakeStore::new(Vec::new(), sample_orders());
    let prompt = ScriptedPrompt::answering(&[true]);
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let outcome = dashboard.delete_order(&OrderId::new("o2")).await.unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(
        store.calls_after_load(),
        [StoreCall::Delete {
            document_id: "o2".to_string(),
        }]
    );
    let ids: Vec<&str> = dashboard.orders().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["o1", "o3"]);
    assert_eq!(dashboard.metrics().total_orders, 2);
    assert_eq!(dashboard.metrics().total_revenue, Decimal::from(125));

    let confirms = prompt.confirms();
    assert_eq!(confirms[0].title, "Are you sure?");
    assert_eq!(confirms[0].body, "You won't be able to revert this!");
    assert_eq!(confirms[0].tone, PromptTone::Warning);
}

#[tokio::test]
async fn test_failed_order_delete_keeps_collection_intact() {
    let store = FakeStore::new(Vec::new(), sample_orders());
    store.0.fail_delete.set(true);
    let prompt = ScriptedPrompt::answering(&[true]);
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let result = dashboard.delete_order(&OrderId::new("o2")).await;

    assert!(matches!(result, Err(DashboardError::Store(_))));
    assert_eq!(dashboard.orders().len(), 3);
    assert_eq!(dashboard.metrics().total_orders, 3);

    let notices = prompt.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].tone, NoticeTone::Error);
    assert_eq!(notices[0].body, "Something went wrong while deleting.");
}

#[tokio::test]
async fn test_delete_unknown_order_never_prompts() {
    let store = FakeStore::new(Vec::new(), sample_orders());
    let prompt = ScriptedPrompt::answering(&[true]);
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let result = dashboard.delete_order(&OrderId::new("missing")).await;

    assert!(matches!(result, Err(DashboardError::OrderNotFound(_))));
    assert!(prompt.confirms().is_empty());
    assert!(store.calls_after_load().is_empty());
}

#[tokio::test]
async fn test_save_product_sends_one_patch_and_updates_locally() {
    let store = FakeStore::new(vec![product("p1", "Oak Stool", 40, 3)], Vec::new());
    let prompt = ScriptedPrompt::default();
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let id = ProductId::new("p1");
    dashboard.begin_product_edit(&id).unwrap();
    dashboard.edit_price(Decimal::from(55)).unwrap();
    dashboard.edit_stock_quantity(10).unwrap();
    dashboard.save_product().await.unwrap();

    let calls = store.calls_after_load();
    assert_eq!(calls.len(), 1);
    let StoreCall::Patch { document_id, set } = &calls[0] else {
        panic!("expected a patch, got {calls:?}");
    };
    assert_eq!(document_id, "p1");
    assert_eq!(set["name"], "Oak Stool");
    assert_eq!(set["price"], 55.0);
    assert_eq!(set["stock_quantity"], 10);
    assert!(set.get("image").is_none());

    let saved = &dashboard.products()[0];
    assert_eq!(saved.price, Decimal::from(55));
    assert_eq!(saved.stock_quantity, 10);
    assert!(dashboard.product_edit().is_none());

    let notices = prompt.notices();
    assert_eq!(notices[0].tone, NoticeTone::Success);
    assert_eq!(notices[0].body, "Product details have been updated.");
}

#[tokio::test]
async fn test_staged_image_uploads_before_patch_and_lands_in_payload() {
    let store = FakeStore::new(vec![product("p1", "Oak Stool", 40, 3)], Vec::new());
    let prompt = ScriptedPrompt::default();
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let id = ProductId::new("p1");
    dashboard.begin_product_edit(&id).unwrap();
    dashboard
        .stage_image(ImageUpload {
            filename: "stool.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        })
        .unwrap();
    dashboard.save_product().await.unwrap();

    let calls = store.calls_after_load();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        StoreCall::UploadImage {
            filename: "stool.png".to_string(),
        }
    );
    let StoreCall::Patch { set, .. } = &calls[1] else {
        panic!("expected a patch after the upload, got {calls:?}");
    };
    assert_eq!(set["image"], "image-fake01-800x600-png");

    assert_eq!(
        dashboard.products()[0].image,
        Some(AssetRef::new("image-fake01-800x600-png"))
    );
}

#[tokio::test]
async fn test_failed_upload_keeps_draft_and_skips_patch() {
    let store = FakeStore::new(vec![product("p1", "Oak Stool", 40, 3)], Vec::new());
    store.0.fail_upload.set(true);
    let prompt = ScriptedPrompt::default();
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let id = ProductId::new("p1");
    dashboard.begin_product_edit(&id).unwrap();
    dashboard.edit_name("Walnut Stool").unwrap();
    dashboard
        .stage_image(ImageUpload {
            filename: "stool.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        })
        .unwrap();

    let result = dashboard.save_product().await;

    assert!(matches!(result, Err(DashboardError::Store(_))));
    let calls = store.calls_after_load();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], StoreCall::UploadImage { .. }));

    // Draft survives so the operator can retry.
    let (edit_id, draft) = dashboard.product_edit().unwrap();
    assert_eq!(edit_id, &id);
    assert_eq!(draft.name.as_deref(), Some("Walnut Stool"));
    assert_eq!(dashboard.products()[0].name, "Oak Stool");

    let notices = prompt.notices();
    assert_eq!(notices[0].tone, NoticeTone::Error);
}

#[tokio::test]
async fn test_failed_save_keeps_draft_and_local_product() {
    let store = FakeStore::new(vec![product("p1", "Oak Stool", 40, 3)], Vec::new());
    store.0.fail_patch.set(true);
    let prompt = ScriptedPrompt::default();
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let id = ProductId::new("p1");
    dashboard.begin_product_edit(&id).unwrap();
    dashboard.edit_price(Decimal::from(99)).unwrap();

    let result = dashboard.save_product().await;

    assert!(matches!(result, Err(DashboardError::Store(_))));
    assert_eq!(dashboard.products()[0].price, Decimal::from(40));
    assert!(dashboard.product_edit().is_some());
}

#[tokio::test]
async fn test_edit_operations_require_an_edit_in_progress() {
    let store = FakeStore::new(vec![product("p1", "Oak Stool", 40, 3)], Vec::new());
    let prompt = ScriptedPrompt::default();
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    assert!(matches!(
        dashboard.edit_name("x"),
        Err(DashboardError::NoEditInProgress)
    ));
    assert!(matches!(
        dashboard.save_product().await,
        Err(DashboardError::NoEditInProgress)
    ));

    dashboard.begin_product_edit(&ProductId::new("p1")).unwrap();
    dashboard.cancel_product_edit();
    assert!(matches!(
        dashboard.edit_price(Decimal::ONE),
        Err(DashboardError::NoEditInProgress)
    ));
    assert!(store.calls_after_load().is_empty());
}

#[tokio::test]
async fn test_confirmed_product_delete_clears_selection_and_edit() {
    let store = FakeStore::new(
        vec![product("p1", "Oak Stool", 40, 3), product("p2", "Pine Desk", 120, 1)],
        Vec::new(),
    );
    let prompt = ScriptedPrompt::answering(&[true]);
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let id = ProductId::new("p1");
    dashboard.select_product(&id).unwrap();
    dashboard.begin_product_edit(&id).unwrap();

    let outcome = dashboard.delete_product(&id).await.unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(dashboard.products().len(), 1);
    assert_eq!(dashboard.products()[0].id.as_str(), "p2");
    assert!(dashboard.selected_product().is_none());
    assert!(dashboard.product_edit().is_none());

    let confirms = prompt.confirms();
    assert_eq!(confirms[0].title, "Delete Product?");
    assert_eq!(confirms[0].tone, PromptTone::Warning);

    let notices = prompt.notices();
    assert_eq!(notices[0].body, "Product removed successfully");
}

#[tokio::test]
async fn test_declined_product_delete_is_a_noop() {
    let store = FakeStore::new(vec![product("p1", "Oak Stool", 40, 3)], Vec::new());
    let prompt = ScriptedPrompt::answering(&[false]);
    let mut dashboard = loaded_dashboard(&store, &prompt).await;

    let outcome = dashboard
        .delete_product(&ProductId::new("p1"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(dashboard.products().len(), 1);
    assert!(store.calls_after_load().is_empty());
    assert!(prompt.notices().is_empty());
}
