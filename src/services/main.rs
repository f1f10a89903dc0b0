use serde::Serialize;

use crate::api::{CatalogReader, ProductListQuery};
use crate::cache::QueryCache;
use crate::domain::category::ProductCategory;
use crate::domain::inquiry::Brochure;
use crate::services::products::{ProductCard, cached_categories, cached_products};

/// How many products the home page highlights. The popular-products fetch
/// requests the default listing and caps client-side.
pub const POPULAR_PRODUCTS_LIMIT: usize = 6;

/// Everything the home template needs.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub categories: Vec<ProductCategory>,
    pub popular_products: Vec<ProductCard>,
}

/// Core logic for the home page.
///
/// Either fetch failing degrades its section to empty; the page itself
/// always renders.
pub async fn show_home<A>(api: &A, cache: &QueryCache) -> HomePage
where
    A: CatalogReader,
{
    let categories = match cached_categories(api, cache).await {
        Ok(categories) => categories,
        Err(e) => {
            log::error!("Failed to list categories for home page: {e}");
            vec![]
        }
    };

    let popular_products = match cached_products(api, cache, &ProductListQuery::default()).await {
        Ok(products) => products
            .iter()
            .take(POPULAR_PRODUCTS_LIMIT)
            .map(ProductCard::from)
            .collect(),
        Err(e) => {
            log::error!("Failed to list popular products: {e}");
            vec![]
        }
    };

    HomePage {
        categories,
        popular_products,
    }
}

/// Static brochure records for the brochures page.
pub fn list_brochures() -> Vec<Brochure> {
    vec![
        Brochure {
            title: "JEEKO Product Brochure",
            cover: "/assets/brochures/jeeko-cover.jpg",
            link: "/assets/brochures/jeeko-products.pdf",
        },
        Brochure {
            title: "Kishan King Product Brochure",
            cover: "/assets/brochures/kishan-king-cover.jpg",
            link: "/assets/brochures/kishan-king-products.pdf",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test::TestApi;
    use crate::domain::product::Product;
    use crate::domain::types::ProductId;
    use std::collections::HashMap;

    fn product(id: usize) -> Product {
        Product {
            id: ProductId::new(format!("p-{id}")).unwrap(),
            name: format!("Product {id}"),
            description: None,
            tags: vec![],
            points: vec![],
            sale_price: None,
            sale_price_in_rupees: None,
            metadata: HashMap::new(),
            created_at: None,
            updated_at: None,
            category_id: None,
            category: None,
            images: vec![],
        }
    }

    #[actix_rt::test]
    async fn home_caps_popular_products_at_six() {
        let api = TestApi::new((0..10).map(product).collect(), vec![], vec![]);
        let cache = QueryCache::default();

        let page = show_home(&api, &cache).await;
        assert_eq!(page.popular_products.len(), POPULAR_PRODUCTS_LIMIT);
    }

    #[actix_rt::test]
    async fn home_renders_with_empty_catalog() {
        let api = TestApi::new(vec![], vec![], vec![]);
        let cache = QueryCache::default();

        let page = show_home(&api, &cache).await;
        assert!(page.categories.is_empty());
        assert!(page.popular_products.is_empty());
    }

    #[test]
    fn brochures_are_listed() {
        assert_eq!(list_brochures().len(), 2);
    }
}
