//! Back-office inventory scenarios.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use gimco_admin::config::DEFAULT_PLACEHOLDER_IMAGE;
use gimco_admin::inventory::{self, UNCHANGED_NOTE};
use gimco_admin::{InventoryService, ItemForm};
use gimco_core::{CatalogEntryId, CatalogFilter, Category, ITEM_CREATED, Kes, OrderId};
use gimco_genai::ImageGenerator;
use gimco_integration_tests::{StubBehaviour, StubImages, TestContext};
use gimco_storefront::services::catalog;

fn service_with(stub: &Arc<StubImages>) -> InventoryService {
    InventoryService::new(
        Some(Arc::clone(stub) as Arc<dyn ImageGenerator>),
        DEFAULT_PLACEHOLDER_IMAGE,
    )
}

fn test_shirt() -> ItemForm {
    ItemForm {
        name: "Test Shirt".to_string(),
        price: Kes::new(4_500),
        ..ItemForm::default()
    }
}

#[tokio::test]
async fn test_new_item_without_image_gets_one_and_a_created_note() {
    for behaviour in [StubBehaviour::Image, StubBehaviour::NoImage, StubBehaviour::Fail] {
        let mut ctx = TestContext::new();
        let stub = Arc::new(StubImages::new(behaviour));

        let id = service_with(&stub)
            .create(&mut ctx.shop, test_shirt(), Utc::now())
            .await
            .unwrap();

        let shirt = ctx.shop.catalog_entry(&id).unwrap();
        assert!(!shirt.image.is_empty(), "{behaviour:?}");
        let notes: Vec<&str> = shirt.history.iter().map(|h| h.change.as_str()).collect();
        assert_eq!(notes, [ITEM_CREATED]);
        assert_eq!(stub.calls(), 1);

        if behaviour == StubBehaviour::Image {
            assert!(shirt.image.starts_with("data:image/png;base64,"));
        } else {
            assert_eq!(shirt.image, DEFAULT_PLACEHOLDER_IMAGE);
        }
    }
}

#[tokio::test]
async fn test_new_item_shows_up_in_the_storefront() {
    let mut ctx = TestContext::new();
    let offline = InventoryService::new(None, DEFAULT_PLACEHOLDER_IMAGE);
    let id = offline
        .create(&mut ctx.shop, test_shirt(), Utc::now())
        .await
        .unwrap();

    let accessories = CatalogFilter {
        category: Some(Category::Accessories),
        ..catalog::default_filter(&ctx.shop)
    };
    let listed = catalog::browse(&ctx.shop, &accessories);
    assert_eq!(listed.last().unwrap().id, id);
}

#[tokio::test]
async fn test_history_only_grows() {
    let mut ctx = TestContext::new();
    let offline = InventoryService::new(None, DEFAULT_PLACEHOLDER_IMAGE);
    let id = CatalogEntryId::new("m-5");
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).single().unwrap();
    let initial = ctx.shop.catalog_entry(&id).unwrap().history.clone();

    for n in 1..=4_i64 {
        let mut form = ItemForm::from_entry(ctx.shop.catalog_entry(&id).unwrap());
        if n % 2 == 0 {
            form.description = format!("Revision {n}");
        }
        offline
            .update(&mut ctx.shop, &id, form, start + Duration::days(n))
            .await
            .unwrap();
    }

    let history = &ctx.shop.catalog_entry(&id).unwrap().history;
    assert_eq!(history.len(), initial.len() + 4);
    assert_eq!(&history[..initial.len()], initial.as_slice());
    let notes: Vec<&str> = history[initial.len()..]
        .iter()
        .map(|h| h.change.as_str())
        .collect();
    assert_eq!(
        notes,
        [
            UNCHANGED_NOTE,
            "Description updated",
            UNCHANGED_NOTE,
            "Description updated"
        ]
    );
    assert!(history.windows(2).all(|w| w[0].date <= w[1].date));
}

#[test]
fn test_deleting_an_item_leaves_orders_intact() {
    let mut ctx = TestContext::new();
    let order_id = OrderId::new("ord-5501");
    let before = ctx.shop.order(&order_id).unwrap().clone();

    inventory::delete(&mut ctx.shop, &CatalogEntryId::new("m-1")).unwrap();

    assert!(ctx.shop.catalog_entry(&CatalogEntryId::new("m-1")).is_none());
    assert_eq!(ctx.shop.order(&order_id).unwrap(), &before);
}
