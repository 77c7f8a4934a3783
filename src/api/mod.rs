pub mod admin;
pub mod public;
pub mod user;

use reqwest::{header, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::middleware::auth::{AuthError, Session};
use crate::middleware::logging::RequestLog;

/// Typed client for the store REST API.
///
/// Cloning is cheap and clones share the same [`Session`], so logging in
/// through one handle authenticates all of them.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        if !(config.api_url.starts_with("http://") || config.api_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API url must start with http:// or https://, got {:?}",
                config.api_url
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session: Session::new(config.token.clone()),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fails fast when there is no usable token instead of waiting for the 401.
    pub(crate) fn ensure_user(&self) -> Result<(), ClientError> {
        match self.session.require_user() {
            Ok(_) => Ok(()),
            // opaque tokens are the server's business
            Err(AuthError::Malformed) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub(crate) fn ensure_admin(&self) -> Result<(), ClientError> {
        match self.session.require_admin() {
            Ok(_) => Ok(()),
            Err(AuthError::Malformed) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.send::<()>(Method::GET, path, None).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<Value, ClientError> {
        self.send::<()>(Method::POST, path, None).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.send::<()>(Method::DELETE, path, None).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ClientError> {
        let log = RequestLog::start(&method, path);

        let mut request = self
            .http
            .request(method, self.url(path))
            .header("X-Request-Id", log.request_id())
            .header(header::ACCEPT, "application/json");

        if let Some(bearer) = self.session.bearer() {
            request = request.header(header::AUTHORIZATION, bearer);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let result: Result<(StatusCode, Value), ClientError> = async {
            let response = request.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;

            if !status.is_success() {
                let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
                return Err(ClientError::from_response(status, &body));
            }

            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes)?
            };
            Ok((status, body))
        }
        .await;

        log.finish(result.as_ref().map(|(status, _)| *status));
        result.map(|(_, body)| body)
    }
}

/// Finds a list in any of the envelopes the backend has been seen to use:
/// a bare array, `{<key>: [..]}`, `{data: [..]}`, `{data: {data: [..]}}`
/// or `{data: {<key>: [..]}}`. Anything else is an empty list.
pub fn extract_list<T: DeserializeOwned>(body: Value, keys: &[&str]) -> Result<Vec<T>, ClientError> {
    let Some(list) = find_list(body, keys) else {
        return Ok(Vec::new());
    };
    Ok(serde_json::from_value(list)?)
}

fn find_list(body: Value, keys: &[&str]) -> Option<Value> {
    if body.is_array() {
        return Some(body);
    }

    let Value::Object(mut map) = body else {
        return None;
    };

    for key in keys {
        if map.get(*key).is_some_and(Value::is_array) {
            return map.remove(*key);
        }
    }

    match map.remove("data")? {
        Value::Array(items) => Some(Value::Array(items)),
        Value::Object(mut inner) => {
            if inner.get("data").is_some_and(Value::is_array) {
                return inner.remove("data");
            }
            keys.iter()
                .find(|key| inner.get(**key).is_some_and(Value::is_array))
                .and_then(|key| inner.remove(*key))
        }
        _ => None,
    }
}

/// The object under the first present key, else under `data`, else the body itself.
pub fn extract_item<T: DeserializeOwned>(body: Value, keys: &[&str]) -> Result<T, ClientError> {
    let item = match body {
        Value::Object(mut map) => {
            let key = keys
                .iter()
                .copied()
                .chain(std::iter::once("data"))
                .find(|key| map.get(*key).is_some_and(Value::is_object));
            match key {
                Some(key) => map.remove(key).unwrap_or_default(),
                None => Value::Object(map),
            }
        }
        other => other,
    };
    Ok(serde_json::from_value(item)?)
}

/// `message` of a mutation response, empty when the server sent none.
pub fn message_of(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Reads an integer counter that may arrive as a number or a numeric string.
pub(crate) fn count_of(body: &Value, key: &str) -> Option<u64> {
    match body.get(key)? {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|n| n.is_finite() && *n >= 0.0).map(|n| n as u64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
