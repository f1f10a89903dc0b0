use serde::Serialize;

use crate::api::{ApiResult, CatalogReader, ProductListQuery};
use crate::cache::{CacheKey, CachedValue, QueryCache};
use crate::domain::category::ProductCategory;
use crate::domain::product::{Product, ResolvedImage};
use crate::domain::types::ProductId;

use super::{ServiceError, ServiceResult};

/// Page size for the product listing.
pub const LISTING_PAGE_SIZE: usize = 30;

/// Raw query parameters accepted by the listing route. Values arrive from
/// URL round-tripping and may carry the `"undefined"`/`"null"` literals the
/// query builder filters out.
#[derive(Debug, Default, Clone)]
pub struct ListingParams {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Everything the listing template needs.
#[derive(Debug, Serialize)]
pub struct ListingPage {
    pub products: Vec<ProductCard>,
    pub categories: Vec<ProductCategory>,
    pub selected_category: Option<String>,
    pub search: Option<String>,
    /// Set when the product fetch failed; the page still renders.
    pub load_failed: bool,
}

/// Render-ready product card: resolved image, display price, category label.
#[derive(Debug, Serialize, PartialEq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub points: Vec<String>,
    pub image: ResolvedImage,
    pub price: f64,
    pub category_name: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        let image = product
            .resolve_images()
            .into_iter()
            .next()
            .unwrap_or_else(|| ResolvedImage {
                url: crate::domain::product::PLACEHOLDER_PRODUCT_IMAGE.to_string(),
                alt: product.name.clone(),
            });
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            points: product.points.iter().take(2).cloned().collect(),
            image,
            price: product.display_price(),
            category_name: product.category_name().to_string(),
        }
    }
}

/// Everything the detail template needs.
#[derive(Debug, Serialize)]
pub struct DetailPage {
    pub product: Product,
    pub images: Vec<ResolvedImage>,
    pub price: f64,
    pub category_name: String,
}

/// Fetches a product list through the query cache. Fresh cache hits skip
/// the API entirely; fetched results are stored under the normalized query
/// key.
pub async fn cached_products<A>(
    api: &A,
    cache: &QueryCache,
    query: &ProductListQuery,
) -> ApiResult<Vec<Product>>
where
    A: CatalogReader,
{
    let key = CacheKey::Products(query.cache_key());
    if let Some(CachedValue::Products(products)) = cache.get(&key) {
        return Ok(products);
    }
    let products = api.list_products(query).await?;
    cache.put(key, CachedValue::Products(products.clone()));
    Ok(products)
}

/// Fetches the category list through the query cache.
pub async fn cached_categories<A>(api: &A, cache: &QueryCache) -> ApiResult<Vec<ProductCategory>>
where
    A: CatalogReader,
{
    if let Some(CachedValue::Categories(categories)) = cache.get(&CacheKey::Categories) {
        return Ok(categories);
    }
    let categories = api.list_categories().await?;
    cache.put(CacheKey::Categories, CachedValue::Categories(categories.clone()));
    Ok(categories)
}

/// Core logic for the product listing page.
///
/// Query hygiene: the category filter drops URL-leaked literal
/// `"undefined"`/`"null"` values and the search term is trimmed, both via
/// [`ProductListQuery`]'s setters. A failed product fetch degrades to an
/// empty grid with `load_failed` set; a failed category fetch degrades to an
/// empty filter strip. Neither is fatal to the page.
pub async fn show_products<A>(params: ListingParams, api: &A, cache: &QueryCache) -> ListingPage
where
    A: CatalogReader,
{
    let mut query = ProductListQuery::default().limit(LISTING_PAGE_SIZE);
    if let Some(category) = &params.category {
        query = query.category(category.clone());
    }
    if let Some(search) = &params.search {
        query = query.search(search.clone());
    }

    let (products, load_failed) = match cached_products(api, cache, &query).await {
        Ok(products) => (products, false),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            (vec![], true)
        }
    };

    let categories = match cached_categories(api, cache).await {
        Ok(categories) => categories,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            vec![]
        }
    };

    ListingPage {
        products: products.iter().map(ProductCard::from).collect(),
        categories,
        selected_category: query.category_id,
        search: query.search,
        load_failed,
    }
}

/// Core logic for the product detail page.
pub async fn show_product_detail<A>(
    id: &str,
    api: &A,
    cache: &QueryCache,
) -> ServiceResult<DetailPage>
where
    A: CatalogReader,
{
    let id = match ProductId::new(id) {
        Ok(id) => id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    let key = CacheKey::Product(id.to_string());
    let product = if let Some(CachedValue::Product(product)) = cache.get(&key) {
        product
    } else {
        let product = match api.get_product(&id).await {
            Ok(Some(product)) => product,
            Ok(None) => return Err(ServiceError::NotFound),
            Err(e) => {
                log::error!("Failed to get product {id}: {e}");
                return Err(e.into());
            }
        };
        cache.put(key, CachedValue::Product(product.clone()));
        product
    };

    let images = product.resolve_images();
    let price = product.display_price();
    let category_name = product.category_name().to_string();
    Ok(DetailPage {
        product,
        images,
        price,
        category_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test::TestApi;
    use crate::domain::product::{PLACEHOLDER_PRODUCT_IMAGE, ProductImage};
    use crate::domain::types::CategoryId;
    use std::collections::HashMap;

    fn sample_product(id: &str, name: &str, category_id: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            name: name.to_string(),
            description: None,
            tags: vec![],
            points: vec!["Fuel efficient".into(), "Low noise".into(), "Compact".into()],
            sale_price: Some(100.0),
            sale_price_in_rupees: Some(8500.0),
            metadata: HashMap::new(),
            created_at: None,
            updated_at: None,
            category_id: category_id.map(|c| CategoryId::new(c).unwrap()),
            category: None,
            images: vec![ProductImage {
                url: Some(format!("https://cdn.example.com/{id}.png")),
                ..ProductImage::default()
            }],
        }
    }

    fn sample_category(id: &str) -> ProductCategory {
        ProductCategory {
            id: CategoryId::new(id).unwrap(),
            name: format!("Category {id}"),
            description: None,
            image: None,
        }
    }

    #[actix_rt::test]
    async fn listing_filters_leak_literals_and_caps_points() {
        let api = TestApi::new(
            vec![
                sample_product("p-1", "Generator", Some("c-1")),
                sample_product("p-2", "Tiller", Some("c-2")),
            ],
            vec![sample_category("c-1")],
            vec![],
        );
        let cache = QueryCache::default();

        let page = show_products(
            ListingParams {
                category: Some("null".to_string()),
                search: Some("   ".to_string()),
            },
            &api,
            &cache,
        )
        .await;

        // Both leaked parameters were dropped, so no filtering happened.
        assert_eq!(page.products.len(), 2);
        assert!(page.selected_category.is_none());
        assert!(page.search.is_none());
        assert_eq!(page.products[0].points.len(), 2);
        assert_eq!(page.products[0].price, 8500.0);
        assert!(!page.load_failed);
    }

    #[actix_rt::test]
    async fn listing_serves_fresh_cache_without_api_call() {
        let api = TestApi::new(vec![sample_product("p-1", "Generator", None)], vec![], vec![]);
        let cache = QueryCache::default();
        let params = ListingParams::default();

        show_products(params.clone(), &api, &cache).await;
        show_products(params, &api, &cache).await;

        assert_eq!(*api.list_product_calls.lock().unwrap(), 1);
    }

    #[actix_rt::test]
    async fn category_filter_reaches_the_api() {
        let api = TestApi::new(
            vec![
                sample_product("p-1", "Generator", Some("c-1")),
                sample_product("p-2", "Tiller", Some("c-2")),
            ],
            vec![],
            vec![],
        );
        let cache = QueryCache::default();

        let page = show_products(
            ListingParams {
                category: Some("c-2".to_string()),
                search: None,
            },
            &api,
            &cache,
        )
        .await;

        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].name, "Tiller");
    }

    #[actix_rt::test]
    async fn missing_product_is_not_found() {
        let api = TestApi::new(vec![], vec![], vec![]);
        let cache = QueryCache::default();

        let err = show_product_detail("nope", &api, &cache).await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[actix_rt::test]
    async fn detail_resolves_placeholder_for_imageless_product() {
        let mut product = sample_product("p-1", "Generator", None);
        product.images.clear();
        let api = TestApi::new(vec![product], vec![], vec![]);
        let cache = QueryCache::default();

        let page = show_product_detail("p-1", &api, &cache).await.unwrap();
        assert_eq!(page.images.len(), 1);
        assert_eq!(page.images[0].url, PLACEHOLDER_PRODUCT_IMAGE);
        assert_eq!(page.images[0].alt, "Generator");
    }
}
