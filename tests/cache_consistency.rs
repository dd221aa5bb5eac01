//! End-to-end checks that reads are served from cache and writes evict
//! exactly the entries they invalidate.

mod support;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use rasteh::application::brands::{BrandService, CreateBrandCommand};
use rasteh::application::categories::{CategoryService, UpdateCategoryCommand};
use rasteh::application::products::{CreateProductCommand, ProductService, UpdateProductCommand};
use rasteh::cache::{CacheKey, CacheReader, EntityEvent, Invalidator, ProductRef};
use rasteh::domain::types::ListScope;

use support::{TestHarness, brand, category, harness, product};

fn brand_service(h: &TestHarness) -> BrandService {
    BrandService::new(h.repo.clone(), h.cache.clone(), h.invalidator.clone())
}

fn category_service(h: &TestHarness) -> CategoryService {
    CategoryService::new(
        h.repo.clone(),
        h.repo.clone(),
        h.cache.clone(),
        h.invalidator.clone(),
    )
}

fn product_service(h: &TestHarness) -> ProductService {
    ProductService::new(
        h.repo.clone(),
        h.repo.clone(),
        h.repo.clone(),
        h.cache.clone(),
        h.invalidator.clone(),
    )
}

#[tokio::test]
async fn repeated_reads_hit_the_database_once() {
    let h = harness();
    h.repo.seed_brand(brand("Apple", "apple"));
    let brands = brand_service(&h);

    for _ in 0..3 {
        let listed = brands.list().await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    assert_eq!(h.repo.brand_reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn brand_create_refreshes_the_cached_list() {
    let h = harness();
    h.repo.seed_brand(brand("Apple", "apple"));
    let brands = brand_service(&h);

    assert_eq!(brands.list().await.unwrap().len(), 1);

    brands
        .create(CreateBrandCommand {
            name: "Samsung".to_string(),
            url: None,
            description: String::new(),
            meta_title: String::new(),
            meta_description: String::new(),
        })
        .await
        .unwrap();

    let listed = brands.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    // Second list was recomputed, not served stale.
    assert_eq!(h.repo.brand_reads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn product_rebrand_evicts_both_brand_collections() {
    let h = harness();
    let apple = brand("Apple", "apple");
    let samsung = brand("Samsung", "samsung");
    let phones = category("Phones", "phones", None);
    let handset = product("iPhone 15", "iphone-15", phones.id, Some(&apple));
    h.repo.seed_brand(apple.clone());
    h.repo.seed_brand(samsung.clone());
    h.repo.seed_category(phones.clone());
    h.repo.seed_product(handset.clone());

    let products = product_service(&h);

    // Prime both brand-scoped collections.
    assert_eq!(
        products
            .list_by_brand("apple", ListScope::Visible)
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        products
            .list_by_brand("samsung", ListScope::Visible)
            .await
            .unwrap()
            .len(),
        0
    );

    products
        .update(
            "iphone-15",
            UpdateProductCommand {
                category_id: phones.id,
                brand_url: Some("samsung".to_string()),
                name: handset.name.clone(),
                url: Some(handset.url.clone()),
                introduction: String::new(),
                review: String::new(),
                meta_title: String::new(),
                meta_description: String::new(),
                is_visible: true,
            },
        )
        .await
        .unwrap();

    // Both the old and the new brand's collection keys were evicted.
    for brand_url in ["apple", "samsung"] {
        assert!(!h.store.contains(&CacheKey::BrandProducts {
            brand_url: Some(brand_url.to_string()),
            scope: ListScope::Visible,
        }));
    }

    assert!(
        products
            .list_by_brand("apple", ListScope::Visible)
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        products
            .list_by_brand("samsung", ListScope::Visible)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn brandless_product_create_evicts_the_sentinel_collection() {
    let h = harness();
    let phones = category("Phones", "phones", None);
    h.repo.seed_category(phones.clone());
    let products = product_service(&h);

    // Prime the no-brand collection.
    let unbranded = h
        .cache
        .get_or_compute_collection(
            &CacheKey::BrandProducts {
                brand_url: None,
                scope: ListScope::All,
            },
            || async { Ok::<_, std::convert::Infallible>(Vec::<String>::new()) },
        )
        .await
        .unwrap();
    assert!(unbranded.is_empty());

    products
        .create(CreateProductCommand {
            category_id: phones.id,
            brand_url: None,
            name: "Generic Charger".to_string(),
            url: None,
            introduction: String::new(),
            review: String::new(),
            meta_title: String::new(),
            meta_description: String::new(),
            is_visible: true,
        })
        .await
        .unwrap();

    assert!(!h.store.contains(&CacheKey::BrandProducts {
        brand_url: None,
        scope: ListScope::All,
    }));
}

#[tokio::test]
async fn category_write_sweeps_the_category_namespace() {
    let h = harness();
    let phones = category("Phones", "phones", None);
    let smart = category("Smartphones", "smartphones", Some(&phones));
    h.repo.seed_category(phones.clone());
    h.repo.seed_category(smart.clone());

    let categories = category_service(&h);
    let products = product_service(&h);

    categories.list().await.unwrap();
    categories.get(smart.id).await.unwrap();
    products
        .list_by_category(phones.id, ListScope::Visible)
        .await
        .unwrap();

    assert!(h.store.contains(&CacheKey::Categories));
    assert!(h.store.contains(&CacheKey::Category(smart.id)));

    categories
        .update(
            phones.id,
            UpdateCategoryCommand {
                parent_id: None,
                name: "Mobile Phones".to_string(),
                url: Some("phones".to_string()),
                description: String::new(),
                meta_title: String::new(),
                meta_description: String::new(),
            },
        )
        .await
        .unwrap();

    assert!(!h.store.contains(&CacheKey::Categories));
    assert!(!h.store.contains(&CacheKey::Category(smart.id)));
    assert!(!h.store.contains(&CacheKey::CategoryProducts {
        category_id: phones.id,
        scope: ListScope::Visible,
    }));
}

#[tokio::test]
async fn store_read_failures_fall_back_to_the_database() {
    let h = harness();
    h.repo.seed_brand(brand("Apple", "apple"));

    let failing = Arc::new(support::FailingStore);
    let cache = CacheReader::new(failing.clone(), Default::default());
    let invalidator = Invalidator::new(failing, Default::default());
    let brands = BrandService::new(h.repo.clone(), cache, invalidator);

    for _ in 0..2 {
        let listed = brands.list().await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    // Every read went to the database; none errored out.
    assert_eq!(h.repo.brand_reads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unsynchronized_mutation_stays_stale_until_evicted() {
    let h = harness();
    let phones = category("Phones", "phones", None);
    let handset = product("iPhone 15", "iphone-15", phones.id, None);
    h.repo.seed_category(phones.clone());
    h.repo.seed_product(handset.clone());
    let products = product_service(&h);

    let cached = products.get("iphone-15").await.unwrap();
    assert_eq!(cached.name, "iPhone 15");

    // Mutate behind the cache's back; the cached detail keeps serving.
    h.repo
        .mutate_product(handset.id, |p| p.name = "iPhone 15 Pro".to_string());
    assert_eq!(products.get("iphone-15").await.unwrap().name, "iPhone 15");

    // An explicit eviction restores consistency on the next read.
    h.invalidator
        .apply(&[EntityEvent::ProductSaved {
            product: ProductRef {
                url: handset.url.clone(),
                category_id: handset.category_id,
                brand_url: None,
            },
        }])
        .unwrap();
    assert_eq!(
        products.get("iphone-15").await.unwrap().name,
        "iPhone 15 Pro"
    );
}

#[tokio::test]
async fn missing_rows_are_never_cached() {
    let h = harness();
    let products = product_service(&h);

    assert!(products.get("ghost").await.is_err());
    assert!(!h.store.contains(&CacheKey::Product("ghost".to_string())));

    // The row appearing later is visible immediately.
    let phones = category("Phones", "phones", None);
    h.repo.seed_category(phones.clone());
    h.repo.seed_product(product("Ghost", "ghost", phones.id, None));
    assert_eq!(products.get("ghost").await.unwrap().name, "Ghost");
}
