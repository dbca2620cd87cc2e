use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The record store could not complete a read or write.
    #[error("Record store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure modes of a product catalog lookup.
///
/// A lookup that completes but finds no product is not an error; it is
/// reported as `Ok(None)` by [`crate::store::CatalogLookup`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// The catalog answered with a non-2xx status.
    #[error("Catalog API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The catalog answered 2xx but the payload carried query errors or was
    /// not shaped as expected.
    #[error("Catalog query error: {0}")]
    Query(String),
}
