use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::api::{message_of, ApiClient};
use crate::entities::{LoginInput, RegisterInput};
use crate::error::ClientError;

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

impl ApiClient {
    pub async fn register(&self, input: &RegisterInput) -> Result<String, ClientError> {
        input.validate()?;
        let body = self.post("/register", input).await?;
        Ok(message_of(&body))
    }

    /// Logs in and keeps the token in the session for every later call.
    pub async fn login(&self, input: &LoginInput) -> Result<String, ClientError> {
        input.validate()?;
        let body = self.post("/login", input).await?;
        let LoginResponse { token } = serde_json::from_value(body)?;

        self.session().set(token.clone());
        info!(login = %input.login, "Logged in");
        Ok(token)
    }

    /// The local session is cleared even when the server call fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self.post_empty("/logout").await;
        self.session().clear();
        if let Err(err) = &result {
            warn!(value = %err, "Logout request failed, session dropped locally");
        }
        result.map(|_| ())
    }
}
