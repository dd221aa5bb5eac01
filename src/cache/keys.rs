//! Cache key schema.
//!
//! Maps (resource kind, optional identifier) pairs to deterministic key
//! strings. Keys are colon-delimited; every variant pins a fixed discriminator
//! segment (`list`, `detail`, `products`, `comments`) so that user-supplied
//! identifiers can never collide with another variant's rendering. Slugs are
//! produced by `domain::slug` and usernames are validated at the service
//! boundary, so no identifier segment ever contains a colon.

use std::fmt;

use uuid::Uuid;

use crate::domain::types::{CommentScope, ListScope};

/// Placeholder segment for products without a brand.
///
/// `slugify` never yields a bare hyphen, so this cannot collide with a real
/// brand slug. Products missing a brand still get consistent brand-scoped
/// collection keys, and those keys are evicted like any other.
pub const NO_BRAND_SEGMENT: &str = "-";

/// Identifies one cacheable view of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    // Brand views
    Brands,
    Brand(String),
    BrandProducts {
        brand_url: Option<String>,
        scope: ListScope,
    },

    // Category views
    Categories,
    Category(Uuid),
    CategoryProducts {
        category_id: Uuid,
        scope: ListScope,
    },
    CategoryAttributes(Uuid),

    // Product views
    Products(ListScope),
    Product(String),
    ProductItems,
    ProductItem(Uuid),

    // Comment views
    Comments,
    Comment(Uuid),
    ProductComments {
        product_id: Uuid,
        scope: CommentScope,
    },

    // User views
    Users,
    User(String),
}

impl CacheKey {
    /// Render the key to its canonical store string.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brands => write!(f, "brands:list"),
            Self::Brand(url) => write!(f, "brands:detail:{url}"),
            Self::BrandProducts { brand_url, scope } => {
                let segment = brand_url.as_deref().unwrap_or(NO_BRAND_SEGMENT);
                write!(f, "brands:{segment}:products:{}", scope.as_str())
            }
            Self::Categories => write!(f, "categories:list"),
            Self::Category(id) => write!(f, "categories:detail:{id}"),
            Self::CategoryProducts { category_id, scope } => {
                write!(f, "categories:{category_id}:products:{}", scope.as_str())
            }
            Self::CategoryAttributes(id) => write!(f, "categories:{id}:attributes"),
            Self::Products(scope) => write!(f, "products:list:{}", scope.as_str()),
            Self::Product(url) => write!(f, "products:detail:{url}"),
            Self::ProductItems => write!(f, "product-items:list"),
            Self::ProductItem(id) => write!(f, "product-items:detail:{id}"),
            Self::Comments => write!(f, "comments:list"),
            Self::Comment(id) => write!(f, "comments:detail:{id}"),
            Self::ProductComments { product_id, scope } => {
                write!(f, "products:{product_id}:comments:{}", scope.as_str())
            }
            Self::Users => write!(f, "users:list"),
            Self::User(username) => write!(f, "users:detail:{username}"),
        }
    }
}

/// A prefix pattern for bulk eviction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    prefix: String,
}

impl KeyPattern {
    /// Every key in the category namespace: the category list, every category
    /// singleton, and every category-scoped product list. Category writes are
    /// rare relative to reads, so coarse eviction here keeps the hooks simple.
    pub fn categories() -> Self {
        Self {
            prefix: "categories:".to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn matches(&self, key: &str) -> bool {
        key.starts_with(&self.prefix)
    }
}
