use serde::Serialize;
use tracing::warn;

use crate::api::ApiClient;
use crate::error::ClientError;

/// Counters on the admin dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub products: u64,
    pub categories: u64,
    pub reviews: u64,
}

impl DashboardStats {
    /// All three counters are fetched at once. A failed counter reads 0 and
    /// does not affect the others.
    pub async fn load(client: &ApiClient) -> Self {
        let (products, categories, reviews) = tokio::join!(
            client.product_count(),
            client.category_count(),
            client.review_count(),
        );

        Self {
            products: or_zero("products", products),
            categories: or_zero("categories", categories),
            reviews: or_zero("reviews", reviews),
        }
    }
}

fn or_zero(counter: &str, result: Result<u64, ClientError>) -> u64 {
    result.unwrap_or_else(|err| {
        warn!(counter, value = %err, "Failed to load dashboard counter");
        0
    })
}
