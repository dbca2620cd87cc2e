/// Default Admin API version.
pub const DEFAULT_API_VERSION: &str = "2024-10";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for Admin GraphQL access.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Admin API access token sent as `X-Shopify-Access-Token`.
    pub access_token: String,
    /// Admin API version segment of the endpoint path, e.g. `2024-10`.
    pub api_version: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Fixed endpoint URL used instead of the per-shop one. Intended for
    /// local proxies and tests.
    pub endpoint_override: Option<String>,
}

impl CatalogConfig {
    /// Configuration with default version and timeout.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            endpoint_override: None,
        }
    }

    /// Load catalog configuration from environment variables.
    ///
    /// | Env Var                       | Required | Default   |
    /// |-------------------------------|----------|-----------|
    /// | `SHOPIFY_ADMIN_ACCESS_TOKEN`  | **yes**  | --        |
    /// | `SHOPIFY_API_VERSION`         | no       | `2024-10` |
    /// | `CATALOG_TIMEOUT_SECS`        | no       | `10`      |
    /// | `CATALOG_ENDPOINT`            | no       | per shop  |
    ///
    /// # Panics
    ///
    /// Panics if the access token is missing or empty, or the timeout is not
    /// a valid `u64`.
    pub fn from_env() -> Self {
        let access_token = std::env::var("SHOPIFY_ADMIN_ACCESS_TOKEN")
            .expect("SHOPIFY_ADMIN_ACCESS_TOKEN must be set in the environment");
        assert!(
            !access_token.is_empty(),
            "SHOPIFY_ADMIN_ACCESS_TOKEN must not be empty"
        );

        let api_version = std::env::var("SHOPIFY_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        let timeout_secs: u64 = std::env::var("CATALOG_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("CATALOG_TIMEOUT_SECS must be a valid u64");

        let endpoint_override = std::env::var("CATALOG_ENDPOINT")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            access_token,
            api_version,
            timeout_secs,
            endpoint_override,
        }
    }

    /// GraphQL endpoint for `shop`.
    pub fn endpoint(&self, shop: &str) -> String {
        match &self.endpoint_override {
            Some(url) => url.clone(),
            None => format!("https://{shop}/admin/api/{}/graphql.json", self.api_version),
        }
    }
}
