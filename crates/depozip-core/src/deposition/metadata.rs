//! Deposition metadata.

use crate::DepositError;
use crate::Result;
use serde::Deserialize;
use serde::Serialize;

/// A named contributor, conventionally written `"Family, Given"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    /// Display name of the contributor.
    pub name: String,
}

impl Creator {
    /// Creates a creator from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Classification of the uploaded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadType {
    /// A dataset. The only classification produced by this crate.
    Dataset,
}

/// Who may access the uploaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRight {
    /// Publicly downloadable.
    Open,
}

/// Metadata record sent with a new deposition.
///
/// # Examples
///
/// ```
/// use depozip_core::deposition::Metadata;
///
/// let metadata = Metadata::dataset(
///     "Field survey 2024",
///     "Raw transects",
///     ["Doe, Jane", "Roe, Richard"],
///     "CC0-1.0",
/// )?;
/// let json = serde_json::to_value(&metadata).unwrap();
/// assert_eq!(json["upload_type"], "dataset");
/// assert_eq!(json["creators"][1]["name"], "Roe, Richard");
/// # Ok::<(), depozip_core::DepositError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Record title.
    pub title: String,

    /// Record classification.
    pub upload_type: UploadType,

    /// Free-text description. The service accepts limited HTML.
    pub description: String,

    /// Contributors, in display order.
    pub creators: Vec<Creator>,

    /// Access level of the files.
    pub access_right: AccessRight,

    /// SPDX license identifier.
    pub license: String,
}

impl Metadata {
    /// Builds an open-access dataset record.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if the title is blank, there are no
    /// creators, a creator name is blank, or the license is blank.
    pub fn dataset<I, S>(
        title: impl Into<String>,
        description: impl Into<String>,
        creators: I,
        license: impl Into<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let metadata = Self {
            title: title.into(),
            upload_type: UploadType::Dataset,
            description: description.into(),
            creators: creators.into_iter().map(Creator::new).collect(),
            access_right: AccessRight::Open,
            license: license.into(),
        };
        metadata.validate()?;
        Ok(metadata)
    }

    /// Checks the fields the service would otherwise reject.
    ///
    /// # Errors
    ///
    /// See [`Metadata::dataset`].
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(DepositError::invalid_input("title must not be empty"));
        }
        if self.creators.is_empty() {
            return Err(DepositError::invalid_input(
                "at least one creator is required",
            ));
        }
        if let Some(pos) = self
            .creators
            .iter()
            .position(|creator| creator.name.trim().is_empty())
        {
            return Err(DepositError::invalid_input(format!(
                "creator #{} has an empty name",
                pos + 1
            )));
        }
        if self.license.trim().is_empty() {
            return Err(DepositError::invalid_input("license must not be empty"));
        }
        Ok(())
    }
}
