//! Archive-then-deposit orchestration.

use crate::DepositError;
use crate::DepositionClient;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::archive::ArchiveConfig;
use crate::archive::ArchiveReport;
use crate::archive::archive_directory_with_progress;
use crate::archive::resolve_root;
use crate::deposition::Metadata;
use crate::deposition::ZenodoClient;
use crate::deposition::ZenodoConfig;
use crate::deposition::landing_page;
use serde_json::Value;
use std::path::Path;
use std::path::PathBuf;

/// Description used when none is given.
pub const DEFAULT_DESCRIPTION: &str = "automatic anonymization and upload to zenodo";

/// Creator used when none is given.
pub const DEFAULT_CREATOR: &str = "Authors, Anonymous";

/// License used when none is given.
pub const DEFAULT_LICENSE: &str = "CC0-1.0";

/// Everything needed to archive a directory and deposit it.
///
/// Unset fields fall back to defaults when the request is run: the title to
/// the directory's name, the description to [`DEFAULT_DESCRIPTION`], the
/// creators to [`DEFAULT_CREATOR`] and the license to [`DEFAULT_LICENSE`].
///
/// # Examples
///
/// ```
/// use depozip_core::UploadRequest;
///
/// let request = UploadRequest::new("data")
///     .with_title("Survey")
///     .with_creators(["Doe, Jane"])
///     .with_publish(false);
/// assert!(!request.publish);
/// assert_eq!(request.license, None);
/// ```
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Directory to archive.
    ///
    /// Default: `.`.
    pub directory: PathBuf,

    /// Record title.
    pub title: Option<String>,

    /// Record description.
    pub description: Option<String>,

    /// Creator names in `"Family, Given"` form, in display order.
    pub creators: Vec<String>,

    /// SPDX license identifier.
    pub license: Option<String>,

    /// Target the sandbox endpoint instead of production.
    ///
    /// Default: `false`.
    pub sandbox: bool,

    /// Publish immediately instead of leaving a draft.
    ///
    /// Default: `true`.
    pub publish: bool,

    /// Archiving options.
    pub archive: ArchiveConfig,
}

impl Default for UploadRequest {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            title: None,
            description: None,
            creators: Vec::new(),
            license: None,
            sandbox: false,
            publish: true,
            archive: ArchiveConfig::default(),
        }
    }
}

impl UploadRequest {
    /// Creates a request for `directory` with default settings.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the creators.
    #[must_use]
    pub fn with_creators<I, S>(mut self, creators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.creators = creators.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the license.
    #[must_use]
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Sets whether the sandbox endpoint is used.
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Sets whether the deposition is published.
    #[must_use]
    pub fn with_publish(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }

    /// Sets the archiving options.
    #[must_use]
    pub fn with_archive_config(mut self, archive: ArchiveConfig) -> Self {
        self.archive = archive;
        self
    }

    /// Builds the metadata record for an archive of `root`, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if no title is set and `root` has no
    /// name, or if the resulting metadata is invalid.
    pub fn metadata(&self, root: &Path) -> Result<Metadata> {
        let title = match &self.title {
            Some(title) => title.clone(),
            None => root
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    DepositError::invalid_input(format!(
                        "cannot derive a title from {}; set one explicitly",
                        root.display()
                    ))
                })?,
        };
        let creators = if self.creators.is_empty() {
            vec![DEFAULT_CREATOR.to_string()]
        } else {
            self.creators.clone()
        };

        Metadata::dataset(
            title,
            self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION),
            creators,
            self.license.as_deref().unwrap_or(DEFAULT_LICENSE),
        )
    }
}

/// Outcome of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadResult {
    /// Identifier assigned by the remote service.
    pub deposition_id: String,

    /// The service's full response.
    pub response: Value,

    /// The archive that was uploaded. It is not removed afterwards.
    pub archive_path: PathBuf,

    /// Statistics about the uploaded archive.
    pub archive_report: ArchiveReport,
}

impl UploadResult {
    /// Returns the human-facing landing page of the deposition.
    #[must_use]
    pub fn html_url(&self) -> Option<&str> {
        landing_page(&self.response)
    }
}

/// Archives and deposits a directory on Zenodo.
///
/// The access token is read from the environment; see
/// [`ZenodoConfig::from_env`].
///
/// # Errors
///
/// Returns an error if archiving fails or the service rejects the upload.
pub fn upload(request: &UploadRequest) -> Result<UploadResult> {
    let client = ZenodoClient::new(ZenodoConfig::from_env(request.sandbox))?;
    upload_directory(request, &client)
}

/// Archives a directory and deposits it through `client`.
///
/// # Errors
///
/// Returns an error if the directory is invalid, the metadata is invalid,
/// archiving fails, or the client fails. Client errors are returned
/// unchanged and never retried.
pub fn upload_directory(
    request: &UploadRequest,
    client: &dyn DepositionClient,
) -> Result<UploadResult> {
    upload_directory_with_progress(request, client, &mut NoopProgress)
}

/// Archives a directory and deposits it through `client`, reporting progress.
///
/// # Errors
///
/// See [`upload_directory`].
pub fn upload_directory_with_progress(
    request: &UploadRequest,
    client: &dyn DepositionClient,
    progress: &mut dyn ProgressCallback,
) -> Result<UploadResult> {
    let root = resolve_root(&request.directory)?;
    let metadata = request.metadata(&root)?;

    let archive = archive_directory_with_progress(&root, &request.archive, progress)?;

    progress.on_upload_start(&archive.path);
    let deposition = client.create(&metadata, &[archive.path.as_path()], request.publish)?;
    progress.on_complete();

    Ok(UploadResult {
        deposition_id: deposition.id,
        response: deposition.response,
        archive_path: archive.path,
        archive_report: archive.report,
    })
}
