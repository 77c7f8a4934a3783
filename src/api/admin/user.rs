use validator::Validate;

use crate::api::{extract_list, message_of, ApiClient};
use crate::entities::{Profile, UserUpdate};
use crate::error::ClientError;

impl ApiClient {
    pub async fn users(&self) -> Result<Vec<Profile>, ClientError> {
        self.ensure_admin()?;
        let body = self.get("/users").await?;
        extract_list(body, &["users"])
    }

    pub async fn update_user(&self, id: u64, input: &UserUpdate) -> Result<String, ClientError> {
        input.validate()?;
        self.ensure_admin()?;
        let body = self.put(&format!("/users/{id}"), input).await?;
        Ok(message_of(&body))
    }

    /// The server refuses to delete admin accounts with 403.
    pub async fn delete_user(&self, id: u64) -> Result<String, ClientError> {
        self.ensure_admin()?;
        let body = self.delete(&format!("/users/{id}")).await?;
        Ok(message_of(&body))
    }
}
