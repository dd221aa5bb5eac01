//! Pure derivation logic for denormalized fields.
//!
//! Everything here is a function of its inputs only. The services re-read
//! persisted state and feed it through these functions before every write, so
//! concurrent writers converge on the same derived values regardless of which
//! hook runs last.

use uuid::Uuid;

use super::entities::ProductItemRecord;

/// Separator between levels of a category's composed display name.
pub const FULL_NAME_SEPARATOR: &str = " / ";

/// Select the cheapest qualifying item for a product.
///
/// An item qualifies when it has stock, is visible, and is available. Ties on
/// price break on id so the choice is deterministic. Returns `None` when no
/// item qualifies, which clears the product's cheapest-item reference.
pub fn cheapest_item(items: &[ProductItemRecord]) -> Option<Uuid> {
    items
        .iter()
        .filter(|item| item.inventory > 0 && item.is_visible && item.is_available)
        .min_by_key(|item| (item.selling_price, item.id))
        .map(|item| item.id)
}

/// Compose a category's display name from its parent chain.
pub fn compose_full_name(parent_full_name: Option<&str>, name: &str) -> String {
    match parent_full_name {
        Some(parent) => format!("{parent}{FULL_NAME_SEPARATOR}{name}"),
        None => name.to_string(),
    }
}

/// Default a missing selling price to the original price.
pub fn default_selling_price(selling_price: i64, original_price: i64) -> i64 {
    if selling_price == 0 {
        original_price
    } else {
        selling_price
    }
}

/// An item with no inventory can never be available.
pub fn availability_for_inventory(inventory: i64, requested: bool) -> bool {
    if inventory == 0 { false } else { requested }
}

/// Default missing metadata fields from the entity's primary text.
pub fn default_meta(meta: &str, fallback: &str) -> String {
    if meta.is_empty() {
        fallback.to_string()
    } else {
        meta.to_string()
    }
}
