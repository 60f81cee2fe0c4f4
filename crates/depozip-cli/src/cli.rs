//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use depozip_core::ArchiveConfig;
use depozip_core::UploadRequest;
use depozip_core::upload::DEFAULT_LICENSE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "depozip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Title of the deposition (default: name of the directory)
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Description of the deposition
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Creator as "Family, Given" (can be repeated, order is kept)
    #[arg(long = "creator", value_name = "NAME")]
    pub creators: Vec<String>,

    /// Upload to the Zenodo sandbox instead of production
    #[arg(long)]
    pub sandbox: bool,

    /// Publish the deposition (default)
    #[arg(long, overrides_with = "no_publish")]
    pub publish: bool,

    /// Leave the deposition as an unpublished draft
    #[arg(long = "no-publish", overrides_with = "publish")]
    pub no_publish: bool,

    /// Directory to archive
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// License identifier
    #[arg(long, value_name = "SPDX", default_value = DEFAULT_LICENSE)]
    pub license: String,

    /// Additional file or directory name to leave out (can be repeated)
    #[arg(long = "ignore", short = 'x', value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Write the archive to PATH instead of a temporary file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Build the archive without contacting Zenodo
    #[arg(long)]
    pub dry_run: bool,

    /// Print the full JSON response instead of the landing page URL
    #[arg(short, long)]
    pub json: bool,

    /// Increase diagnostic output (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-result output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Whether the deposition is published once uploaded.
    pub const fn publish(&self) -> bool {
        !self.no_publish
    }

    pub fn archive_config(&self) -> ArchiveConfig {
        ArchiveConfig::default()
            .with_extra_ignore(self.ignore.iter().cloned())
            .with_output(self.output.clone())
    }

    pub fn upload_request(&self) -> UploadRequest {
        let mut request = UploadRequest::new(&self.dir)
            .with_creators(self.creators.iter().cloned())
            .with_license(self.license.clone())
            .with_sandbox(self.sandbox)
            .with_publish(self.publish())
            .with_archive_config(self.archive_config());
        if let Some(title) = &self.title {
            request = request.with_title(title.clone());
        }
        if let Some(description) = &self.description {
            request = request.with_description(description.clone());
        }
        request
    }
}
