//! Shared enums and value types for the catalog domain.

use serde::{Deserialize, Serialize};
use time::Date;

/// Scope under which product collections are listed and cached.
///
/// Staff callers see every product; public callers only the visible subset.
/// The scope is part of the cache key, so the two views never share entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListScope {
    All,
    Visible,
}

impl ListScope {
    pub fn for_staff(is_staff: bool) -> Self {
        if is_staff { Self::All } else { Self::Visible }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Visible => "visible",
        }
    }
}

/// Scope for a product's comment listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentScope {
    All,
    Published,
}

impl CommentScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Published => "published",
        }
    }
}

/// Kind of file attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// Lifecycle of a customer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Failed,
    Successful,
    Processing,
    Sent,
    Delivered,
}

/// A typed attribute payload.
///
/// One value per row, discriminated by kind, so readers never have to scan a
/// set of nullable columns to find the populated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    /// Monetary or fractional values, in minor units.
    Decimal(i64),
    Date(Date),
}

impl AttributeValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Date(_) => "date",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_from_staff_flag() {
        assert_eq!(ListScope::for_staff(true), ListScope::All);
        assert_eq!(ListScope::for_staff(false), ListScope::Visible);
    }

    #[test]
    fn attribute_value_reports_kind() {
        assert_eq!(AttributeValue::Text("4k".into()).kind(), "text");
        assert_eq!(AttributeValue::Integer(8).kind(), "integer");
        assert_eq!(AttributeValue::Decimal(12_500).kind(), "decimal");
    }
}
