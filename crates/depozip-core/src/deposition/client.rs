//! The capability a deposition backend must provide.

use crate::RemoteError;
use crate::deposition::metadata::Metadata;
use serde_json::Value;
use std::path::Path;

/// Creates depositions in a remote repository.
///
/// Implementations submit `metadata` together with the files at `paths`, and
/// publish the record when `publish` is set; otherwise it stays a draft.
/// Errors are returned as-is; implementations do not retry.
pub trait DepositionClient {
    /// Creates a deposition and returns the service's final response.
    ///
    /// # Errors
    ///
    /// Returns an error on authentication, transport, or validation failure.
    fn create(
        &self,
        metadata: &Metadata,
        paths: &[&Path],
        publish: bool,
    ) -> Result<Deposition, RemoteError>;
}

/// A deposition as reported by the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct Deposition {
    /// Identifier assigned by the service.
    pub id: String,

    /// The full response body.
    pub response: Value,
}

impl Deposition {
    /// Wraps a response body, extracting its `id` field.
    ///
    /// Numeric and string identifiers are both accepted.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidResponse`] when `id` is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use depozip_core::deposition::Deposition;
    /// use serde_json::json;
    ///
    /// let deposition = Deposition::from_response(json!({
    ///     "id": 1234,
    ///     "links": {"html": "https://zenodo.org/deposit/1234"}
    /// }))?;
    /// assert_eq!(deposition.id, "1234");
    /// assert_eq!(deposition.link("html"), Some("https://zenodo.org/deposit/1234"));
    /// # Ok::<(), depozip_core::RemoteError>(())
    /// ```
    pub fn from_response(response: Value) -> Result<Self, RemoteError> {
        let id = match response.get("id") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => {
                return Err(RemoteError::InvalidResponse(
                    "response has no deposition id".to_string(),
                ));
            }
        };
        Ok(Self { id, response })
    }

    /// Returns the hyperlink stored under `links.<name>`.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&str> {
        link(&self.response, name)
    }
}

/// Reads `links.<name>` from a response body.
pub(crate) fn link<'a>(response: &'a Value, name: &str) -> Option<&'a str> {
    response.get("links")?.get(name)?.as_str()
}
