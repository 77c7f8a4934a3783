use validator::Validate;

use crate::api::{extract_item, message_of, ApiClient};
use crate::entities::{ChangePassword, Profile, UpdateProfile};
use crate::error::ClientError;

impl ApiClient {
    pub async fn profile(&self) -> Result<Profile, ClientError> {
        self.ensure_user()?;
        let body = self.get("/profile").await?;
        extract_item(body, &["user", "profile"])
    }

    /// Public fields of any account; only a login is needed, not the admin claim.
    pub async fn user(&self, id: u64) -> Result<Profile, ClientError> {
        self.ensure_user()?;
        let body = self.get(&format!("/users/{id}")).await?;
        extract_item(body, &["user"])
    }

    pub async fn update_profile(&self, input: &UpdateProfile) -> Result<String, ClientError> {
        input.validate()?;
        self.ensure_user()?;
        let body = self.put("/profile", input).await?;
        Ok(message_of(&body))
    }

    pub async fn change_password(&self, input: &ChangePassword) -> Result<String, ClientError> {
        input.validate()?;
        self.ensure_user()?;
        let body = self.put("/profile/password", input).await?;
        Ok(message_of(&body))
    }
}
