// # WAPI Connector
//
// Authenticated HTTP access to the Infoblox WAPI.
//
// ## API Reference
//
// - Read objects:   GET    `/wapi/v{version}/{object_type}?name=...&_return_fields=...`
// - Create object:  POST   `/wapi/v{version}/{object_type}?_return_as_object=1`
// - Update object:  PUT    `/wapi/v{version}/{ref}?_return_as_object=1`
// - Delete object:  DELETE `/wapi/v{version}/{ref}`
// - Session check:  GET    `/wapi/v{version}/grid`
//
// ## Security Requirements
//
// - Password NEVER appears in logs or Debug output
// - Basic auth is sent on every request; the `ibapauth` session cookie
//   returned by the appliance is kept in the client's cookie store

use crate::config::{AuthConfig, HostConfig, TransportConfig};
use crate::wapi::types::WapiError;
use dnsrec_core::{Error, Result};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Query string for object reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    filters: Vec<(String, String)>,
    return_fields: Option<String>,
}

impl QueryParams {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-match filter (e.g. `name=example.com`)
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Fields to return instead of the object type's defaults
    pub fn return_fields(mut self, fields: impl Into<String>) -> Self {
        self.return_fields = Some(fields.into());
        self
    }

    fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filters.clone();
        if let Some(ref fields) = self.return_fields {
            pairs.push(("_return_fields".to_string(), fields.clone()));
        }
        pairs
    }
}

#[derive(Deserialize)]
struct ResultEnvelope<T> {
    result: T,
}

/// An authenticated WAPI session
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the credentials.
pub struct Connector {
    base_url: String,
    auth: AuthConfig,
    client: Client,
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("base_url", &self.base_url)
            .field("username", &self.auth.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

impl Connector {
    /// Build the HTTP client and authenticate against the grid
    ///
    /// # Returns
    ///
    /// - `Ok(Connector)`: Credentials were accepted
    /// - `Err(Error::Authentication)`: Credentials were rejected
    /// - `Err(Error::Http)`: The appliance could not be reached
    pub async fn connect(
        host: HostConfig,
        auth: AuthConfig,
        transport: TransportConfig,
    ) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(transport.request_timeout)
            .pool_max_idle_per_host(transport.pool_connections)
            .danger_accept_invalid_certs(!transport.ssl_verify)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        let connector = Self {
            base_url: host.base_url(),
            auth,
            client,
        };

        tracing::debug!("Authenticating to WAPI at {}", connector.base_url);
        let _: Vec<serde_json::Value> = connector
            .get_objects("grid", &QueryParams::new())
            .await?;
        tracing::debug!("WAPI session established for user {}", connector.auth.username);

        Ok(connector)
    }

    /// Base URL of the WAPI this connector talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .basic_auth(&self.auth.username, Some(&self.auth.password))
    }

    /// Read all objects of `object_type` matching `query`
    pub async fn get_objects<T: DeserializeOwned>(
        &self,
        object_type: &str,
        query: &QueryParams,
    ) -> Result<Vec<T>> {
        tracing::debug!("GET {} {:?}", object_type, query);
        let response = self
            .request(Method::GET, object_type)
            .query(&query.to_pairs())
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        handle_response(response).await
    }

    /// Create an object and return it with `return_fields` populated
    pub async fn create_object<T: DeserializeOwned>(
        &self,
        object_type: &str,
        body: &serde_json::Value,
        return_fields: &str,
    ) -> Result<T> {
        tracing::debug!("POST {}", object_type);
        let response = self
            .request(Method::POST, object_type)
            .query(&[("_return_fields", return_fields), ("_return_as_object", "1")])
            .json(body)
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let envelope: ResultEnvelope<T> = handle_response(response).await?;
        Ok(envelope.result)
    }

    /// Update the object at `reference` and return it with `return_fields` populated
    pub async fn update_object<T: DeserializeOwned>(
        &self,
        reference: &str,
        body: &serde_json::Value,
        return_fields: &str,
    ) -> Result<T> {
        tracing::debug!("PUT {}", reference);
        let response = self
            .request(Method::PUT, reference)
            .query(&[("_return_fields", return_fields), ("_return_as_object", "1")])
            .json(body)
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let envelope: ResultEnvelope<T> = handle_response(response).await?;
        Ok(envelope.result)
    }

    /// Delete the object at `reference`, returning the deleted reference
    pub async fn delete_object(&self, reference: &str) -> Result<String> {
        tracing::debug!("DELETE {}", reference);
        let response = self
            .request(Method::DELETE, reference)
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        handle_response(response).await
    }
}

/// Map a WAPI response to a value or a typed error
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| Error::http(format!("Failed to parse response: {}", e)));
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());
    let wapi_error = serde_json::from_str::<WapiError>(&body).ok();

    Err(status_error(status, wapi_error, body))
}

fn status_error(status: StatusCode, wapi_error: Option<WapiError>, body: String) -> Error {
    let message = wapi_error
        .as_ref()
        .map(|e| e.message().to_string())
        .unwrap_or(body);

    match status.as_u16() {
        401 | 403 => Error::auth(format!(
            "Invalid credentials or insufficient permissions. Status: {}",
            status
        )),
        404 => Error::not_found(message),
        _ if wapi_error.as_ref().is_some_and(WapiError::is_not_found) => Error::not_found(message),
        _ => Error::api(
            status.as_u16(),
            wapi_error.and_then(|e| e.code),
            message,
        ),
    }
}
