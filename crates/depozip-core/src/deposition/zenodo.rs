//! Zenodo REST API client.
//!
//! Implements [`DepositionClient`] against the Zenodo deposit API:
//!
//! 1. `POST /api/deposit/depositions` with the metadata creates a draft.
//! 2. Each file is streamed with `PUT {links.bucket}/{file name}`.
//! 3. When publishing, `POST /api/deposit/depositions/{id}/actions/publish`.
//!
//! Requests authenticate with a bearer token.

use crate::RemoteError;
use crate::deposition::client::Deposition;
use crate::deposition::client::DepositionClient;
use crate::deposition::client::link;
use crate::deposition::metadata::Metadata;
use reqwest::blocking::Body;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::path::Path;
use std::time::Duration;

/// Production endpoint.
pub const ZENODO_URL: &str = "https://zenodo.org";

/// Sandbox endpoint, for test uploads that never become permanent records.
pub const SANDBOX_URL: &str = "https://sandbox.zenodo.org";

/// Environment variable holding the production access token.
pub const TOKEN_VAR: &str = "ZENODO_API_TOKEN";

/// Environment variable holding the sandbox access token.
pub const SANDBOX_TOKEN_VAR: &str = "ZENODO_SANDBOX_API_TOKEN";

/// Environment variable overriding the endpoint base URL.
pub const URL_VAR: &str = "DEPOZIP_ZENODO_URL";

/// Connection settings for [`ZenodoClient`].
///
/// # Examples
///
/// ```
/// use depozip_core::deposition::ZenodoConfig;
///
/// let config = ZenodoConfig::new(true).with_token(Some("secret".into()));
/// assert_eq!(config.base_url, "https://sandbox.zenodo.org");
/// assert_eq!(
///     config.api_url("deposit/depositions"),
///     "https://sandbox.zenodo.org/api/deposit/depositions"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ZenodoConfig {
    /// Whether the sandbox endpoint is targeted.
    pub sandbox: bool,

    /// Endpoint base URL, without the `/api` suffix.
    pub base_url: String,

    /// Access token. Requests fail with [`RemoteError::MissingToken`] when
    /// unset.
    pub token: Option<String>,

    /// Per-request timeout. `None` waits indefinitely, which large uploads
    /// may need.
    pub timeout: Option<Duration>,
}

impl Default for ZenodoConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ZenodoConfig {
    /// Creates a configuration for the production or sandbox endpoint.
    #[must_use]
    pub fn new(sandbox: bool) -> Self {
        Self {
            sandbox,
            base_url: if sandbox { SANDBOX_URL } else { ZENODO_URL }.to_string(),
            token: None,
            timeout: None,
        }
    }

    /// Creates a configuration from the environment.
    ///
    /// The token is read from [`SANDBOX_TOKEN_VAR`] or [`TOKEN_VAR`]
    /// depending on `sandbox`; [`URL_VAR`] overrides the base URL.
    #[must_use]
    pub fn from_env(sandbox: bool) -> Self {
        let mut config = Self::new(sandbox);
        config.token = std::env::var(config.token_var())
            .ok()
            .filter(|token| !token.trim().is_empty());
        if let Ok(url) = std::env::var(URL_VAR)
            && !url.trim().is_empty()
        {
            config.base_url = url;
        }
        config
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the access token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Name of the environment variable the token is read from.
    #[must_use]
    pub const fn token_var(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_TOKEN_VAR
        } else {
            TOKEN_VAR
        }
    }

    /// Builds an API URL from a path relative to `/api/`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Blocking Zenodo client.
#[derive(Debug, Clone)]
pub struct ZenodoClient {
    client: Client,
    config: ZenodoConfig,
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    metadata: &'a Metadata,
}

impl ZenodoClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(config: ZenodoConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .user_agent(concat!("depozip/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Returns the client's configuration.
    #[must_use]
    pub fn config(&self) -> &ZenodoConfig {
        &self.config
    }

    fn token(&self) -> Result<&str, RemoteError> {
        self.config
            .token
            .as_deref()
            .ok_or(RemoteError::MissingToken {
                var: self.config.token_var(),
            })
    }

    /// Creates an empty draft carrying `metadata`.
    fn create_draft(&self, metadata: &Metadata) -> Result<Value, RemoteError> {
        let response = self
            .client
            .post(self.config.api_url("deposit/depositions"))
            .bearer_auth(self.token()?)
            .json(&CreateRequest { metadata })
            .send()?;
        into_json(response)
    }

    /// Streams one file into the draft's bucket.
    fn upload_file(&self, bucket: &str, path: &Path) -> Result<Value, RemoteError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| RemoteError::File {
                path: path.to_path_buf(),
                source: std::io::Error::other("path has no file name"),
            })?;
        let file = File::open(path).map_err(|source| RemoteError::File {
            path: path.to_path_buf(),
            source,
        })?;

        let response = self
            .client
            .put(format!("{}/{file_name}", bucket.trim_end_matches('/')))
            .bearer_auth(self.token()?)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(Body::from(file))
            .send()?;
        into_json(response)
    }

    /// Publishes a draft, making it a permanent record.
    fn publish(&self, id: &str) -> Result<Value, RemoteError> {
        let response = self
            .client
            .post(
                self.config
                    .api_url(&format!("deposit/depositions/{id}/actions/publish")),
            )
            .bearer_auth(self.token()?)
            .send()?;
        into_json(response)
    }
}

impl DepositionClient for ZenodoClient {
    fn create(
        &self,
        metadata: &Metadata,
        paths: &[&Path],
        publish: bool,
    ) -> Result<Deposition, RemoteError> {
        let draft = Deposition::from_response(self.create_draft(metadata)?)?;
        let bucket = draft.link("bucket").ok_or_else(|| {
            RemoteError::InvalidResponse(format!(
                "deposition {} has no bucket link",
                draft.id
            ))
        })?;

        for path in paths {
            self.upload_file(bucket, path)?;
        }

        if publish {
            Deposition::from_response(self.publish(&draft.id)?)
        } else {
            Ok(draft)
        }
    }
}

/// Turns a response into JSON, or a status error carrying the body.
fn into_json(response: Response) -> Result<Value, RemoteError> {
    let status = response.status();
    if !status.is_success() {
        let url = response.url().to_string();
        let body = response
            .text()
            .unwrap_or_else(|e| format!("<unreadable response body: {e}>"));
        return Err(RemoteError::Status {
            status: status.as_u16(),
            url,
            body,
        });
    }
    Ok(response.json()?)
}

/// Returns the human-facing landing page of a deposition response.
///
/// Prefers `links.html`, then `links.latest_html`.
#[must_use]
pub fn landing_page(response: &Value) -> Option<&str> {
    link(response, "html").or_else(|| link(response, "latest_html"))
}
