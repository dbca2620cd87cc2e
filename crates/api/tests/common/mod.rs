//! Shared fixtures for API integration tests.
//!
//! The router runs against an in-memory record store and a canned catalog,
//! so these tests need neither PostgreSQL nor the Admin API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use qrcodes_core::destination::Destination;
use qrcodes_core::error::{CatalogError, CoreError};
use qrcodes_core::listing::SortOrder;
use qrcodes_core::search::title_matches;
use qrcodes_core::store::{CatalogLookup, NewQrCode, ProductSummary, QrCodeRecord, RecordStore};
use qrcodes_core::types::DbId;
use serde_json::Value;
use tower::ServiceExt;

use qrcodes_api::config::ServerConfig;
use qrcodes_api::middleware::session::{SessionClaims, SessionConfig};
use qrcodes_api::router::build_app_router;
use qrcodes_api::state::AppState;

pub const SHOP: &str = "demo.myshopify.com";
pub const OTHER_SHOP: &str = "other.myshopify.com";
pub const API_KEY: &str = "test-api-key";
pub const API_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Product id the fake catalog knows about.
pub const KNOWN_PRODUCT: &str = "gid://shopify/Product/1";
/// Product id the fake catalog fails on.
pub const FAILING_PRODUCT: &str = "gid://shopify/Product/500";

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// In-memory [`RecordStore`] honouring shop, search, sort, limit and offset.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<QrCodeRecord>>,
    fail: AtomicBool,
}

impl InMemoryStore {
    /// Insert a record directly, bypassing validation.
    pub fn seed(&self, shop: &str, title: &str, product_id: &str) -> DbId {
        let mut records = self.records.lock().unwrap();
        let id = records.len() as DbId + 1;
        records.push(QrCodeRecord {
            id,
            shop: shop.to_string(),
            title: title.to_string(),
            product_id: product_id.to_string(),
            product_handle: "red-hat".to_string(),
            product_variant_id: "gid://shopify/ProductVariant/7".to_string(),
            destination: Destination::Product,
            scans: 0,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(id),
        });
        id
    }

    pub fn set_destination(&self, id: DbId, destination: Destination) {
        let mut records = self.records.lock().unwrap();
        if let Some(r) = records.iter_mut().find(|r| r.id == id) {
            r.destination = destination;
        }
    }

    /// Overwrite a stored handle, bypassing validation.
    pub fn set_handle(&self, id: DbId, handle: &str) {
        let mut records = self.records.lock().unwrap();
        if let Some(r) = records.iter_mut().find(|r| r.id == id) {
            r.product_handle = handle.to_string();
        }
    }

    pub fn record(&self, id: DbId) -> Option<QrCodeRecord> {
        self.records.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    /// Make every subsequent call fail as if the database were down.
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CoreError::Store("store offline".into()));
        }
        Ok(())
    }

    fn matching(&self, shop: &str, search: Option<&str>) -> Vec<QrCodeRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.shop == shop)
            .filter(|r| search.map_or(true, |s| title_matches(&r.title, s)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list(
        &self,
        shop: &str,
        limit: i64,
        offset: i64,
        search: Option<&str>,
        sort: SortOrder,
    ) -> Result<Vec<QrCodeRecord>, CoreError> {
        self.check()?;
        let mut rows = self.matching(shop, search);
        match sort {
            SortOrder::CreatedDesc => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::CreatedAsc => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::TitleAsc => rows.sort_by_key(|r| r.title.to_lowercase()),
            SortOrder::TitleDesc => {
                rows.sort_by_key(|r| std::cmp::Reverse(r.title.to_lowercase()))
            }
            SortOrder::ScansDesc => rows.sort_by(|a, b| b.scans.cmp(&a.scans)),
        }
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, shop: &str, search: Option<&str>) -> Result<i64, CoreError> {
        self.check()?;
        Ok(self.matching(shop, search).len() as i64)
    }

    async fn find(&self, id: DbId) -> Result<Option<QrCodeRecord>, CoreError> {
        self.check()?;
        Ok(self.record(id))
    }

    async fn create(&self, shop: &str, input: &NewQrCode) -> Result<QrCodeRecord, CoreError> {
        self.check()?;
        let id = self.seed(shop, &input.title, &input.product_id);
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .expect("record was just seeded");
        record.product_handle = input.product_handle.clone();
        record.product_variant_id = input.product_variant_id.clone();
        record.destination = input.destination;
        Ok(record.clone())
    }

    async fn record_scan(&self, id: DbId) -> Result<Option<QrCodeRecord>, CoreError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        Ok(records.iter_mut().find(|r| r.id == id).map(|r| {
            r.scans += 1;
            r.clone()
        }))
    }
}

/// Catalog that knows [`KNOWN_PRODUCT`], fails on [`FAILING_PRODUCT`] and
/// reports everything else as deleted.
pub struct FakeCatalog {
    products: HashMap<String, ProductSummary>,
}

impl Default for FakeCatalog {
    fn default() -> Self {
        let mut products = HashMap::new();
        products.insert(
            KNOWN_PRODUCT.to_string(),
            ProductSummary {
                title: "Red hat".to_string(),
                image_url: Some("https://cdn.example/hat.png".to_string()),
                image_alt: Some("A red hat".to_string()),
            },
        );
        Self { products }
    }
}

#[async_trait]
impl CatalogLookup for FakeCatalog {
    async fn resolve_product(
        &self,
        _shop: &str,
        product_id: &str,
    ) -> Result<Option<ProductSummary>, CatalogError> {
        if product_id == FAILING_PRODUCT {
            return Err(CatalogError::Api {
                status: 502,
                body: "bad gateway".into(),
            });
        }
        Ok(self.products.get(product_id).cloned())
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            api_key: API_KEY.to_string(),
            api_secret: API_SECRET.to_string(),
            leeway_secs: 0,
        },
    }
}

/// Build the full application router over the given store.
pub fn build_test_app(store: Arc<InMemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        records: store,
        catalog: Arc::new(FakeCatalog::default()),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A signed session token for `shop`.
pub fn session_token(shop: &str) -> String {
    let now = Utc::now().timestamp();
    let dest = format!("https://{shop}");
    let claims = SessionClaims {
        iss: format!("{dest}/admin"),
        dest,
        aud: API_KEY.to_string(),
        sub: Some("1".to_string()),
        exp: now + 60,
        nbf: now - 5,
        iat: now - 5,
        jti: uuid::Uuid::new_v4().to_string(),
        sid: Some("session".to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(API_SECRET.as_bytes()),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET with a session token for `shop`.
pub async fn get_as(app: Router, uri: &str, shop: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {}", session_token(shop)))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body with a session token for `shop`.
pub async fn post_json_as(app: Router, uri: &str, body: Value, shop: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", session_token(shop)))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
