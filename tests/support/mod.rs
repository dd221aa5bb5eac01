//! In-memory repository fakes shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use rasteh::application::repos::{
    AttributesRepo, BrandsRepo, CategoriesRepo, CommentsRepo, LikesRepo, ProductItemsRepo,
    ProductMediaRepo, ProductsRepo, RepoError, UsersRepo,
};
use rasteh::cache::{CacheConfig, CacheKey, CacheReader, CacheStore, CacheStoreError, Invalidator, MemoryStore};
use rasteh::domain::entities::{
    AttributeRecord, AttributeValueRecord, BrandRecord, CategoryRecord, CommentRecord, LikeRecord,
    ProductItemRecord, ProductMediaRecord, ProductRecord, UserRecord,
};
use rasteh::domain::types::{CommentScope, ListScope, MediaType};

#[derive(Default)]
struct CatalogState {
    brands: Vec<BrandRecord>,
    categories: Vec<CategoryRecord>,
    products: Vec<ProductRecord>,
    items: Vec<ProductItemRecord>,
    media: Vec<ProductMediaRecord>,
    comments: Vec<CommentRecord>,
    likes: Vec<LikeRecord>,
    users: Vec<UserRecord>,
    purchased: HashSet<(Uuid, Uuid)>,
    attributes: Vec<AttributeRecord>,
    attribute_values: Vec<AttributeValueRecord>,
}

/// One in-memory backing store implementing every repository trait, with
/// read-call counters so tests can assert which reads hit the database.
#[derive(Default)]
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
    pub brand_reads: AtomicUsize,
    pub category_reads: AtomicUsize,
    pub product_reads: AtomicUsize,
    pub comment_reads: AtomicUsize,
    pub user_reads: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_brand(&self, brand: BrandRecord) {
        self.state.lock().unwrap().brands.push(brand);
    }

    pub fn seed_category(&self, category: CategoryRecord) {
        self.state.lock().unwrap().categories.push(category);
    }

    pub fn seed_product(&self, product: ProductRecord) {
        self.state.lock().unwrap().products.push(product);
    }

    pub fn seed_item(&self, item: ProductItemRecord) {
        self.state.lock().unwrap().items.push(item);
    }

    pub fn seed_user(&self, user: UserRecord) {
        self.state.lock().unwrap().users.push(user);
    }

    pub fn seed_comment(&self, comment: CommentRecord) {
        self.state.lock().unwrap().comments.push(comment);
    }

    pub fn seed_purchase(&self, user_id: Uuid, product_id: Uuid) {
        self.state.lock().unwrap().purchased.insert((user_id, product_id));
    }

    pub fn seed_attribute(&self, attribute: AttributeRecord) {
        self.state.lock().unwrap().attributes.push(attribute);
    }

    pub fn seed_attribute_value(&self, value: AttributeValueRecord) {
        self.state.lock().unwrap().attribute_values.push(value);
    }

    pub fn product(&self, id: Uuid) -> Option<ProductRecord> {
        self.state
            .lock()
            .unwrap()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn comment(&self, id: Uuid) -> Option<CommentRecord> {
        self.state
            .lock()
            .unwrap()
            .comments
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn category(&self, id: Uuid) -> Option<CategoryRecord> {
        self.state
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Mutate a stored product directly, bypassing services and invalidation.
    pub fn mutate_product(&self, id: Uuid, mutate: impl FnOnce(&mut ProductRecord)) {
        let mut state = self.state.lock().unwrap();
        if let Some(product) = state.products.iter_mut().find(|p| p.id == id) {
            mutate(product);
        }
    }
}

#[async_trait]
impl BrandsRepo for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<BrandRecord>, RepoError> {
        self.brand_reads.fetch_add(1, Ordering::SeqCst);
        let mut brands = self.state.lock().unwrap().brands.clone();
        brands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(brands)
    }

    async fn get_by_url(&self, url: &str) -> Result<BrandRecord, RepoError> {
        self.brand_reads.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .unwrap()
            .brands
            .iter()
            .find(|b| b.url == url)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn url_exists(&self, url: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .brands
            .iter()
            .any(|b| b.url == url && Some(b.id) != exclude))
    }

    async fn insert(&self, brand: &BrandRecord) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        if state.brands.iter().any(|b| b.url == brand.url) {
            return Err(RepoError::Duplicate {
                constraint: "brands_url_key".to_string(),
            });
        }
        state.brands.push(brand.clone());
        Ok(())
    }

    async fn update(&self, brand: &BrandRecord) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .brands
            .iter_mut()
            .find(|b| b.id == brand.id)
            .ok_or(RepoError::NotFound)?;
        *stored = brand.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.brands.len();
        state.brands.retain(|b| b.id != id);
        if state.brands.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CategoriesRepo for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        self.category_reads.fetch_add(1, Ordering::SeqCst);
        let mut categories = self.state.lock().unwrap().categories.clone();
        categories.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(categories)
    }

    async fn get(&self, id: Uuid) -> Result<CategoryRecord, RepoError> {
        self.category_reads.fetch_add(1, Ordering::SeqCst);
        self.category(id).ok_or(RepoError::NotFound)
    }

    async fn children(&self, parent_id: Uuid) -> Result<Vec<CategoryRecord>, RepoError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .categories
            .iter()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn top_level_url_exists(
        &self,
        url: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, RepoError> {
        Ok(self.state.lock().unwrap().categories.iter().any(|c| {
            c.parent_id.is_none() && c.url == url && Some(c.id) != exclude
        }))
    }

    async fn insert(&self, category: &CategoryRecord) -> Result<(), RepoError> {
        self.state.lock().unwrap().categories.push(category.clone());
        Ok(())
    }

    async fn update(&self, category: &CategoryRecord) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or(RepoError::NotFound)?;
        *stored = category.clone();
        Ok(())
    }

    async fn set_full_name(&self, id: Uuid, full_name: &str) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepoError::NotFound)?;
        stored.full_name = full_name.to_string();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        if state.categories.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl AttributesRepo for InMemoryCatalog {
    async fn list_for_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<AttributeRecord>, RepoError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .attributes
            .iter()
            .filter(|a| a.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn list_values_for_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<AttributeValueRecord>, RepoError> {
        let state = self.state.lock().unwrap();
        let owned: HashSet<Uuid> = state
            .attributes
            .iter()
            .filter(|a| a.category_id == category_id)
            .map(|a| a.id)
            .collect();
        Ok(state
            .attribute_values
            .iter()
            .filter(|v| owned.contains(&v.attribute_id))
            .cloned()
            .collect())
    }
}

fn scope_keeps(scope: ListScope, product: &ProductRecord) -> bool {
    scope == ListScope::All || product.is_visible
}

#[async_trait]
impl ProductsRepo for InMemoryCatalog {
    async fn list(&self, scope: ListScope) -> Result<Vec<ProductRecord>, RepoError> {
        self.product_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .state
            .lock()
            .unwrap()
            .products
            .iter()
            .filter(|p| scope_keeps(scope, p))
            .cloned()
            .collect())
    }

    async fn list_by_category(
        &self,
        category_id: Uuid,
        scope: ListScope,
    ) -> Result<Vec<ProductRecord>, RepoError> {
        self.product_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .state
            .lock()
            .unwrap()
            .products
            .iter()
            .filter(|p| p.category_id == category_id && scope_keeps(scope, p))
            .cloned()
            .collect())
    }

    async fn list_by_brand(
        &self,
        brand_url: &str,
        scope: ListScope,
    ) -> Result<Vec<ProductRecord>, RepoError> {
        self.product_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .state
            .lock()
            .unwrap()
            .products
            .iter()
            .filter(|p| p.brand_url.as_deref() == Some(brand_url) && scope_keeps(scope, p))
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<ProductRecord, RepoError> {
        self.product_reads.fetch_add(1, Ordering::SeqCst);
        self.product(id).ok_or(RepoError::NotFound)
    }

    async fn get_by_url(&self, url: &str) -> Result<ProductRecord, RepoError> {
        self.product_reads.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .unwrap()
            .products
            .iter()
            .find(|p| p.url == url)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn url_exists(&self, url: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .products
            .iter()
            .any(|p| p.url == url && Some(p.id) != exclude))
    }

    async fn insert(&self, product: &ProductRecord) -> Result<(), RepoError> {
        self.state.lock().unwrap().products.push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &ProductRecord) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(RepoError::NotFound)?;
        *stored = product.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        if state.products.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn set_cheapest_item(
        &self,
        product_id: Uuid,
        item_id: Option<Uuid>,
    ) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or(RepoError::NotFound)?;
        stored.cheapest_item_id = item_id;
        stored.is_available = item_id.is_some();
        Ok(())
    }

    async fn adjust_comments_count(&self, product_id: Uuid, delta: i64) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or(RepoError::NotFound)?;
        stored.comments_count = (stored.comments_count + delta).max(0);
        Ok(())
    }
}

#[async_trait]
impl ProductItemsRepo for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<ProductItemRecord>, RepoError> {
        Ok(self.state.lock().unwrap().items.clone())
    }

    async fn get(&self, id: Uuid) -> Result<ProductItemRecord, RepoError> {
        self.state
            .lock()
            .unwrap()
            .items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn list_for_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductItemRecord>, RepoError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|i| i.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, item: &ProductItemRecord) -> Result<(), RepoError> {
        self.state.lock().unwrap().items.push(item.clone());
        Ok(())
    }

    async fn update(&self, item: &ProductItemRecord) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .items
            .iter_mut()
            .find(|i| i.id == item.id)
            .ok_or(RepoError::NotFound)?;
        *stored = item.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.items.len();
        state.items.retain(|i| i.id != id);
        if state.items.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ProductMediaRepo for InMemoryCatalog {
    async fn get(&self, id: Uuid) -> Result<ProductMediaRecord, RepoError> {
        self.state
            .lock()
            .unwrap()
            .media
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn list_for_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductMediaRecord>, RepoError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .media
            .iter()
            .filter(|m| m.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, media: &ProductMediaRecord) -> Result<(), RepoError> {
        self.state.lock().unwrap().media.push(media.clone());
        Ok(())
    }

    async fn update(&self, media: &ProductMediaRecord) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .media
            .iter_mut()
            .find(|m| m.id == media.id)
            .ok_or(RepoError::NotFound)?;
        *stored = media.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.media.len();
        state.media.retain(|m| m.id != id);
        if state.media.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentsRepo for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<CommentRecord>, RepoError> {
        self.comment_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.lock().unwrap().comments.clone())
    }

    async fn get(&self, id: Uuid) -> Result<CommentRecord, RepoError> {
        self.comment_reads.fetch_add(1, Ordering::SeqCst);
        self.comment(id).ok_or(RepoError::NotFound)
    }

    async fn list_for_product(
        &self,
        product_id: Uuid,
        scope: CommentScope,
        viewer: Option<Uuid>,
    ) -> Result<Vec<CommentRecord>, RepoError> {
        self.comment_reads.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        Ok(state
            .comments
            .iter()
            .filter(|c| {
                c.product_id == product_id && (scope == CommentScope::All || c.published)
            })
            .map(|c| {
                let mut comment = c.clone();
                comment.liked_by_viewer = viewer.map(|viewer_id| {
                    state
                        .likes
                        .iter()
                        .any(|l| l.comment_id == c.id && l.user_id == viewer_id)
                });
                comment
            })
            .collect())
    }

    async fn insert(&self, comment: &CommentRecord) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        if state
            .comments
            .iter()
            .any(|c| c.user_id == comment.user_id && c.product_id == comment.product_id)
        {
            return Err(RepoError::Duplicate {
                constraint: "comments_user_id_product_id_key".to_string(),
            });
        }
        state.comments.push(comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &CommentRecord) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .comments
            .iter_mut()
            .find(|c| c.id == comment.id)
            .ok_or(RepoError::NotFound)?;
        *stored = comment.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.comments.len();
        state.comments.retain(|c| c.id != id);
        if state.comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn adjust_likes_count(&self, comment_id: Uuid, delta: i64) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or(RepoError::NotFound)?;
        stored.likes_count = (stored.likes_count + delta).max(0);
        Ok(())
    }
}

#[async_trait]
impl LikesRepo for InMemoryCatalog {
    async fn insert(&self, like: &LikeRecord) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        if state
            .likes
            .iter()
            .any(|l| l.user_id == like.user_id && l.comment_id == like.comment_id)
        {
            return Err(RepoError::Duplicate {
                constraint: "likes_user_id_comment_id_key".to_string(),
            });
        }
        state.likes.push(like.clone());
        Ok(())
    }

    async fn delete_by_user_comment(
        &self,
        user_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.likes.len();
        state
            .likes
            .retain(|l| !(l.user_id == user_id && l.comment_id == comment_id));
        if state.likes.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UsersRepo for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<UserRecord>, RepoError> {
        self.user_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.lock().unwrap().users.clone())
    }

    async fn get_by_username(&self, username: &str) -> Result<UserRecord, RepoError> {
        self.user_reads.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn has_purchased(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, RepoError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .purchased
            .contains(&(user_id, product_id)))
    }

    async fn insert(&self, user: &UserRecord) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Duplicate {
                constraint: "users_username_key".to_string(),
            });
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &UserRecord) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::NotFound)?;
        *stored = user.clone();
        Ok(())
    }

    async fn delete_by_username(&self, username: &str) -> Result<(), RepoError> {
        let mut state = self.state.lock().unwrap();
        let before = state.users.len();
        state.users.retain(|u| u.username != username);
        if state.users.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// Cache store whose reads always fail; writes and deletes are accepted.
#[derive(Default)]
pub struct FailingStore;

impl CacheStore for FailingStore {
    fn get(&self, _key: &CacheKey) -> Result<Option<serde_json::Value>, CacheStoreError> {
        Err(CacheStoreError::Unavailable("store offline".to_string()))
    }

    fn set(
        &self,
        _key: &CacheKey,
        _value: serde_json::Value,
        _ttl: Option<std::time::Duration>,
    ) -> Result<(), CacheStoreError> {
        Ok(())
    }

    fn delete(&self, _key: &CacheKey) -> Result<(), CacheStoreError> {
        Ok(())
    }

    fn delete_many(&self, _keys: &[CacheKey]) -> Result<(), CacheStoreError> {
        Ok(())
    }

    fn delete_matching(&self, _pattern: &rasteh::cache::KeyPattern) -> Result<(), CacheStoreError> {
        Ok(())
    }
}

pub struct TestHarness {
    pub repo: Arc<InMemoryCatalog>,
    pub store: Arc<MemoryStore>,
    pub cache: CacheReader,
    pub invalidator: Invalidator,
}

pub fn harness() -> TestHarness {
    let repo = InMemoryCatalog::new();
    let store = Arc::new(MemoryStore::new());
    let config = CacheConfig::default();
    let cache = CacheReader::new(store.clone(), config.clone());
    let invalidator = Invalidator::new(store.clone(), config);
    TestHarness {
        repo,
        store,
        cache,
        invalidator,
    }
}

pub fn brand(name: &str, url: &str) -> BrandRecord {
    let now = OffsetDateTime::now_utc();
    BrandRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        url: url.to_string(),
        description: String::new(),
        meta_title: name.to_string(),
        meta_description: String::new(),
        created_at: now,
        updated_at: now,
    }
}

pub fn category(name: &str, url: &str, parent: Option<&CategoryRecord>) -> CategoryRecord {
    let now = OffsetDateTime::now_utc();
    let full_name = match parent {
        Some(parent) => format!("{} / {name}", parent.full_name),
        None => name.to_string(),
    };
    CategoryRecord {
        id: Uuid::new_v4(),
        parent_id: parent.map(|p| p.id),
        name: name.to_string(),
        full_name,
        url: url.to_string(),
        description: String::new(),
        meta_title: name.to_string(),
        meta_description: String::new(),
        created_at: now,
        updated_at: now,
    }
}

pub fn product(name: &str, url: &str, category_id: Uuid, brand: Option<&BrandRecord>) -> ProductRecord {
    let now = OffsetDateTime::now_utc();
    ProductRecord {
        id: Uuid::new_v4(),
        category_id,
        brand_id: brand.map(|b| b.id),
        brand_url: brand.map(|b| b.url.clone()),
        cheapest_item_id: None,
        name: name.to_string(),
        url: url.to_string(),
        introduction: String::new(),
        review: String::new(),
        meta_title: name.to_string(),
        meta_description: String::new(),
        is_available: false,
        is_visible: true,
        rating: 0.0,
        comments_count: 0,
        views_count: 0,
        sold_count: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn item(product_id: Uuid, selling_price: i64, inventory: i64) -> ProductItemRecord {
    ProductItemRecord {
        id: Uuid::new_v4(),
        product_id,
        sku: None,
        original_price: selling_price,
        selling_price,
        inventory,
        is_available: true,
        is_visible: true,
    }
}

pub fn user(username: &str) -> UserRecord {
    UserRecord {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
        is_staff: false,
        created_at: OffsetDateTime::now_utc(),
    }
}

pub fn media_record(product_id: Uuid, file_path: &str) -> ProductMediaRecord {
    ProductMediaRecord {
        id: Uuid::new_v4(),
        product_id,
        file_path: file_path.to_string(),
        media_type: MediaType::Image,
        alternate_text: String::new(),
    }
}
