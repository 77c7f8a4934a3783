use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, alias = "ID")]
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

impl Profile {
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.first()
    }

    pub fn address(&self, id: u64) -> Option<&Address> {
        self.addresses.iter().find(|address| address.id == id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(alias = "ID")]
    pub id: u64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub postal: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: String,
}

impl Address {
    pub fn title(&self) -> &str {
        if self.label.is_empty() {
            "Alamat"
        } else {
            &self.label
        }
    }

    /// "street, city, province postal, country" skipping blanks.
    pub fn one_line(&self) -> String {
        let region = [self.province.as_str(), self.postal.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.street.as_str(),
            self.city.as_str(),
            region.as_str(),
            self.country.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// `login` is either a username or an email.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 3, max = 32))]
    pub login: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *PHONE_REGEX))]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct ChangePassword {
    #[validate(length(min = 6))]
    pub old_password: String,
    #[validate(length(min = 6))]
    pub new_password: String,
}

/// Admin edit of another account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
}

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{6,20}$").unwrap());
