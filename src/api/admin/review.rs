use crate::api::{message_of, ApiClient};
use crate::error::ClientError;

impl ApiClient {
    /// Deletes any review regardless of its author.
    pub async fn admin_delete_review(&self, id: u64) -> Result<String, ClientError> {
        self.ensure_admin()?;
        let body = self.delete(&format!("/reviews/{id}/admin")).await?;
        Ok(message_of(&body))
    }
}
