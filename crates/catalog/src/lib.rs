//! Product catalog access through the platform's Admin GraphQL API.
//!
//! - [`client::AdminGraphqlClient`] -- Raw GraphQL transport with the
//!   access-token header.
//! - [`lookup::GraphqlCatalog`] -- [`qrcodes_core::store::CatalogLookup`]
//!   implementation used by the listing resolver.

pub mod client;
pub mod config;
pub mod lookup;

pub use client::AdminGraphqlClient;
pub use config::CatalogConfig;
pub use lookup::GraphqlCatalog;
