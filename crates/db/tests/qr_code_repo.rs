//! Integration tests for the QR code repository and the PostgreSQL record
//! store. They need a live database (`DATABASE_URL`), so they are ignored by
//! default; run with `cargo test -p qrcodes-db -- --ignored`.

use qrcodes_core::destination::Destination;
use qrcodes_core::listing::SortOrder;
use qrcodes_core::store::{NewQrCode, RecordStore};
use qrcodes_db::repositories::QrCodeRepo;
use qrcodes_db::PgRecordStore;
use sqlx::PgPool;

const SHOP: &str = "demo.myshopify.com";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_qr_code(title: &str) -> NewQrCode {
    NewQrCode {
        title: title.to_string(),
        product_id: "gid://shopify/Product/1".to_string(),
        product_handle: "red-hat".to_string(),
        product_variant_id: "gid://shopify/ProductVariant/2".to_string(),
        destination: Destination::Product,
    }
}

async fn seed(pool: &PgPool, shop: &str, titles: &[&str]) {
    for title in titles {
        QrCodeRepo::create(pool, shop, &new_qr_code(title))
            .await
            .unwrap();
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_pages_by_offset(pool: PgPool) {
    seed(&pool, SHOP, &["A", "B", "C", "D", "E", "F", "G"]).await;

    let first = QrCodeRepo::list(&pool, SHOP, 5, 0, None, SortOrder::TitleAsc)
        .await
        .unwrap();
    let second = QrCodeRepo::list(&pool, SHOP, 5, 5, None, SortOrder::TitleAsc)
        .await
        .unwrap();

    let titles: Vec<_> = first.iter().chain(&second).map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["A", "B", "C", "D", "E", "F", "G"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn search_filters_list_and_count(pool: PgPool) {
    seed(&pool, SHOP, &["Spring poster", "Summer flyer", "SPRING window"]).await;

    let rows = QrCodeRepo::list(&pool, SHOP, 5, 0, Some("spring"), SortOrder::TitleAsc)
        .await
        .unwrap();
    let count = QrCodeRepo::count(&pool, SHOP, Some("spring")).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(count, 2);
    assert_eq!(QrCodeRepo::count(&pool, SHOP, None).await.unwrap(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn search_wildcards_match_literally(pool: PgPool) {
    seed(&pool, SHOP, &["50% off", "500 off"]).await;

    let count = QrCodeRepo::count(&pool, SHOP, Some("50%")).await.unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn shops_are_isolated(pool: PgPool) {
    seed(&pool, SHOP, &["Mine"]).await;
    seed(&pool, "other.myshopify.com", &["Theirs"]).await;

    let rows = QrCodeRepo::list(&pool, SHOP, 5, 0, None, SortOrder::CreatedDesc)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Mine");
}

// ---------------------------------------------------------------------------
// Record store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn record_scan_increments_counter(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    let created = store.create(SHOP, &new_qr_code("Poster")).await.unwrap();
    assert_eq!(created.scans, 0);

    store.record_scan(created.id).await.unwrap();
    let scanned = store.record_scan(created.id).await.unwrap().unwrap();
    assert_eq!(scanned.scans, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn record_scan_of_missing_code_is_none(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    assert!(store.record_scan(999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn destination_round_trips(pool: PgPool) {
    let store = PgRecordStore::new(pool);
    let input = NewQrCode {
        destination: Destination::Cart,
        ..new_qr_code("Cart code")
    };
    let created = store.create(SHOP, &input).await.unwrap();
    let found = store.find(created.id).await.unwrap().unwrap();
    assert_eq!(found.destination, Destination::Cart);
}
