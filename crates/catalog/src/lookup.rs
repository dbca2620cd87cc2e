//! [`CatalogLookup`] over the Admin GraphQL `product` query.

use async_trait::async_trait;
use qrcodes_core::error::CatalogError;
use qrcodes_core::store::{CatalogLookup, ProductSummary};
use serde::Deserialize;

use crate::client::{AdminGraphqlClient, GraphqlError};

const PRODUCT_QUERY: &str = r#"
query QrCodeProduct($id: ID!) {
  product(id: $id) {
    title
    images(first: 1) {
      nodes {
        altText
        url
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct ProductData {
    product: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
struct ProductNode {
    title: String,
    #[serde(default)]
    images: Option<ImageConnection>,
}

#[derive(Debug, Deserialize)]
struct ImageConnection {
    #[serde(default)]
    nodes: Vec<ImageNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageNode {
    url: String,
    alt_text: Option<String>,
}

impl From<ProductNode> for ProductSummary {
    fn from(node: ProductNode) -> Self {
        let image = node.images.and_then(|c| c.nodes.into_iter().next());
        ProductSummary {
            title: node.title,
            image_url: image.as_ref().map(|i| i.url.clone()),
            image_alt: image.and_then(|i| i.alt_text),
        }
    }
}

impl From<GraphqlError> for CatalogError {
    fn from(err: GraphqlError) -> Self {
        match err {
            GraphqlError::Request(e) => CatalogError::Transport(e.to_string()),
            GraphqlError::ApiError { status, body } => CatalogError::Api { status, body },
            GraphqlError::Errors(msg) => CatalogError::Query(msg),
            GraphqlError::MissingData => {
                CatalogError::Query("GraphQL response has no data".to_string())
            }
        }
    }
}

/// Product lookups through the Admin GraphQL API.
pub struct GraphqlCatalog {
    client: AdminGraphqlClient,
}

impl GraphqlCatalog {
    pub fn new(client: AdminGraphqlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogLookup for GraphqlCatalog {
    async fn resolve_product(
        &self,
        shop: &str,
        product_id: &str,
    ) -> Result<Option<ProductSummary>, CatalogError> {
        let data: ProductData = self
            .client
            .query(shop, PRODUCT_QUERY, serde_json::json!({ "id": product_id }))
            .await?;

        if data.product.is_none() {
            tracing::debug!(shop, product_id, "Product not found in catalog");
        }
        Ok(data.product.map(ProductSummary::from))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
