use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::entities::user::Profile;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(alias = "ID")]
    pub id: u64,
    #[serde(default)]
    pub product_id: u64,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Profile>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn stars(&self) -> String {
        let filled = self.rating.min(5) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }

    pub fn author(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.username.as_str())
            .unwrap_or("")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [
        ReviewStatus::Pending,
        ReviewStatus::Approved,
        ReviewStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "Menunggu",
            ReviewStatus::Approved => "Disetujui",
            ReviewStatus::Rejected => "Ditolak",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("Invalid review status: {}", s))
    }
}

/// Body of POST /products/:id/reviews and PUT /reviews/:id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReviewInput {
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}
