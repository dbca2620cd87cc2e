//! Listing query resolution: one page of view rows plus the filtered total.
//!
//! The resolver only reads. Record store failures fail the whole request;
//! a catalog failure only marks the affected row's product as deleted.

use futures::future::join_all;

use crate::error::CoreError;
use crate::listing::{ListingPage, ListingQuery, ViewRow};
use crate::store::{CatalogLookup, QrCodeRecord, RecordStore};

/// Resolve one listing page for `shop`.
pub async fn resolve_listing(
    records: &dyn RecordStore,
    catalog: &dyn CatalogLookup,
    shop: &str,
    query: &ListingQuery,
) -> Result<ListingPage, CoreError> {
    let search = query.search.as_deref();
    let offset = query.offset();

    tracing::debug!(
        shop,
        page = query.page,
        offset,
        search = search.unwrap_or(""),
        sort = %query.sort,
        "Resolving QR code listing",
    );

    let (found, total_count) = futures::try_join!(
        records.list(shop, query.page_size(), offset, search, query.sort),
        records.count(shop, search),
    )?;

    let rows = join_products(catalog, shop, found).await;
    Ok(ListingPage::new(query, rows, total_count))
}

/// Join every record with its product metadata, looking products up
/// concurrently. Output order matches input order.
pub async fn join_products(
    catalog: &dyn CatalogLookup,
    shop: &str,
    records: Vec<QrCodeRecord>,
) -> Vec<ViewRow> {
    join_all(records.into_iter().map(|record| to_view_row(catalog, shop, record))).await
}

/// Join a single record with its product metadata.
///
/// A product that cannot be resolved, whether missing, returned without a
/// title, or because the lookup failed, yields `product_deleted = true` with no title or image.
pub async fn to_view_row(catalog: &dyn CatalogLookup, shop: &str, record: QrCodeRecord) -> ViewRow {
    let product = match catalog.resolve_product(shop, &record.product_id).await {
        Ok(product) => product,
        Err(e) => {
            tracing::warn!(
                qr_code_id = record.id,
                product_id = %record.product_id,
                error = %e,
                "Product lookup failed, marking product as deleted",
            );
            None
        }
    };

    // A product without a title is as good as gone.
    let product = product.filter(|p| !p.title.trim().is_empty());

    let (product_title, product_image, product_alt, product_deleted) = match product {
        Some(p) => (Some(p.title), p.image_url, p.image_alt, false),
        None => (None, None, None, true),
    };

    ViewRow {
        id: record.id,
        title: record.title,
        product_title,
        product_image,
        product_alt,
        product_deleted,
        created_at: record.created_at,
        scans: record.scans,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
