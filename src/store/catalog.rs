use std::cmp::Ordering;
use std::str::FromStr;

use crate::api::ApiClient;
use crate::entities::Product;
use crate::error::ClientError;

pub const PAGE_SIZE: usize = 9;
pub const SIMILAR_LIMIT: usize = 4;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category_id: Option<u64>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if !product.is_active {
            return false;
        }
        if let Some(category_id) = self.category_id {
            if product.effective_category_id() != Some(category_id) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => product
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    Name,
    Price,
    PriceDesc,
}

impl SortBy {
    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortBy::Price => a.price.cmp(&b.price),
            SortBy::PriceDesc => b.price.cmp(&a.price),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortBy::Name),
            "price" => Ok(SortBy::Price),
            "price_desc" => Ok(SortBy::PriceDesc),
            other => Err(format!("unknown sort order `{other}`, expected name, price or price_desc")),
        }
    }
}

/// Product listing done on the client over the full product list.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub async fn load(client: &ApiClient) -> Result<Self, ClientError> {
        Ok(Self::new(client.products().await?))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Active products passing `filter`, in `sort` order. The sort is stable.
    pub fn list(&self, filter: &ProductFilter, sort: SortBy) -> Vec<&Product> {
        let mut products: Vec<&Product> =
            self.products.iter().filter(|p| filter.matches(p)).collect();
        products.sort_by(|a, b| sort.compare(a, b));
        products
    }

    /// Up to `limit` other active products, from the same category when it has any.
    pub fn similar(&self, product: &Product, limit: usize) -> Vec<&Product> {
        let others: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.is_active && p.id != product.id)
            .collect();

        let category = product.effective_category_id();
        let same_category: Vec<&Product> = others
            .iter()
            .copied()
            .filter(|p| category.is_some() && p.effective_category_id() == category)
            .collect();

        let pool = if same_category.is_empty() {
            others
        } else {
            same_category
        };
        pool.into_iter().take(limit).collect()
    }
}

pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// 1-based page of `items`; pages past the end are empty.
pub fn page<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if page == 0 || start >= items.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}
