//! Deposition metadata and remote repository clients.

pub mod client;
pub mod metadata;
pub mod zenodo;

pub use client::Deposition;
pub use client::DepositionClient;
pub use metadata::AccessRight;
pub use metadata::Creator;
pub use metadata::Metadata;
pub use metadata::UploadType;
pub use zenodo::ZenodoClient;
pub use zenodo::ZenodoConfig;
pub use zenodo::landing_page;
