use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::api::ApiClient;
use crate::entities::{Review, ReviewStatus};
use crate::error::ClientError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReviewFilter {
    #[default]
    All,
    Only(ReviewStatus),
}

impl ReviewFilter {
    pub fn matches(&self, review: &Review) -> bool {
        match self {
            ReviewFilter::All => true,
            ReviewFilter::Only(status) => review.status == *status,
        }
    }
}

impl FromStr for ReviewFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(ReviewFilter::All);
        }
        s.parse().map(ReviewFilter::Only)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

/// Admin moderation over a loaded set of reviews.
///
/// Approve and reject only change the local copy; the backend keeps no
/// moderation state. Deletion goes to the server.
pub struct ReviewBoard {
    client: ApiClient,
    reviews: Vec<Review>,
}

impl ReviewBoard {
    pub fn new(client: ApiClient, reviews: Vec<Review>) -> Self {
        Self { client, reviews }
    }

    /// Collects the reviews of every product in the catalog.
    pub async fn load(client: ApiClient) -> Result<Self, ClientError> {
        client.ensure_admin()?;
        let mut reviews = Vec::new();
        for product in client.products().await? {
            reviews.extend(client.product_reviews(product.id).await?);
        }
        Ok(Self::new(client, reviews))
    }

    pub fn reviews(&self, filter: ReviewFilter) -> Vec<&Review> {
        self.reviews.iter().filter(|r| filter.matches(r)).collect()
    }

    pub fn counts(&self) -> StatusCounts {
        let count = |status: ReviewStatus| self.reviews.iter().filter(|r| r.status == status).count();
        StatusCounts {
            all: self.reviews.len(),
            pending: count(ReviewStatus::Pending),
            approved: count(ReviewStatus::Approved),
            rejected: count(ReviewStatus::Rejected),
        }
    }

    pub fn approve(&mut self, id: u64) -> Result<&Review, ClientError> {
        self.set_status(id, ReviewStatus::Approved)
    }

    pub fn reject(&mut self, id: u64) -> Result<&Review, ClientError> {
        self.set_status(id, ReviewStatus::Rejected)
    }

    pub async fn delete(&mut self, id: u64) -> Result<(), ClientError> {
        self.client.admin_delete_review(id).await?;
        self.reviews.retain(|r| r.id != id);
        info!(id, "Review deleted");
        Ok(())
    }

    fn set_status(&mut self, id: u64, status: ReviewStatus) -> Result<&Review, ClientError> {
        let review = self
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("No review with {id} id")))?;
        review.status = status;
        Ok(review)
    }
}
