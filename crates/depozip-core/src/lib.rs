//! Zip a directory and deposit it in a research-data repository.
//!
//! `depozip-core` packages a directory into a ZIP archive (skipping version
//! control, cache and build directories) and submits it, with minimal
//! metadata, as a dataset deposition. Zenodo is supported out of the box;
//! other repositories plug in through [`DepositionClient`].
//!
//! # Examples
//!
//! ```no_run
//! use depozip_core::UploadRequest;
//! use depozip_core::upload;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = UploadRequest::new("./results")
//!     .with_title("Simulation results")
//!     .with_creators(["Doe, Jane"])
//!     .with_sandbox(true);
//! let result = upload(&request)?;
//! println!("{}", result.html_url().unwrap_or("<no landing page>"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod deposition;
pub mod error;
pub mod progress;
pub mod upload;

// Re-export main API types
pub use archive::ArchiveConfig;
pub use archive::ArchiveReport;
pub use archive::CreatedArchive;
pub use archive::IgnoreSet;
pub use archive::archive_directory;
pub use deposition::DepositionClient;
pub use deposition::Metadata;
pub use deposition::ZenodoClient;
pub use deposition::ZenodoConfig;
pub use error::DepositError;
pub use error::RemoteError;
pub use error::Result;
pub use progress::NoopProgress;
pub use progress::ProgressCallback;
pub use upload::UploadRequest;
pub use upload::UploadResult;
pub use upload::upload;
pub use upload::upload_directory;
pub use upload::upload_directory_with_progress;
