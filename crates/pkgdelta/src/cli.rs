use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pkgdelta_core::BumpType;
use pkgdelta_operations::RunConfig;
use pkgdelta_operations::config::{
    DEFAULT_DEPENDENCIES_FILE, DEFAULT_EXCLUDED_FILES, DEFAULT_EXCLUDED_FOLDERS,
    DEFAULT_HASH_FILE, DEFAULT_PREFIX_PATH, DEFAULT_SCAN_ROOT,
};

use crate::output::{AzureFormatter, OutputFormatter, PlainFormatter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Azure Pipelines logging commands
    #[default]
    Azure,
    /// `name=value` lines
    Plain,
}

impl OutputFormat {
    pub(crate) fn formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Azure => Box::new(AzureFormatter),
            Self::Plain => Box::new(PlainFormatter),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pkgdelta")]
#[command(bin_name = "pkgdelta")]
#[command(about = "Detect changed packages in a monorepo and derive their next versions", long_about = None)]
pub(crate) struct Cli {
    /// Write resolved versions back into each changed package.json (with --version)
    #[arg(long)]
    pub(crate) save: bool,

    /// Verbose tracing on stderr
    #[arg(long)]
    pub(crate) debug: bool,

    /// Emit the aggregate list of changed packages
    #[arg(long)]
    pub(crate) changed: bool,

    /// Resolve and emit a version per package
    #[arg(long)]
    pub(crate) version: bool,

    /// Persist current folder hashes as the new snapshot
    #[arg(long)]
    pub(crate) hash: bool,

    /// Create a `name@version` tag for every changed package
    #[arg(long)]
    pub(crate) tag: bool,

    /// Comma-separated scan roots
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_SCAN_ROOT)]
    pub(crate) children: Vec<String>,

    /// Directory the scan roots and snapshot are resolved against
    #[arg(long = "prefixPath", default_value = DEFAULT_PREFIX_PATH)]
    pub(crate) prefix_path: PathBuf,

    /// Snapshot file, relative to --prefixPath
    #[arg(long = "hashFile", default_value = DEFAULT_HASH_FILE)]
    pub(crate) hash_file: PathBuf,

    /// Comma-separated folder names or globs left out of hashing
    #[arg(long = "hashExcludeFolders", value_delimiter = ',', default_values = DEFAULT_EXCLUDED_FOLDERS)]
    pub(crate) hash_exclude_folders: Vec<String>,

    /// Comma-separated file names or globs left out of hashing
    #[arg(long = "hashExcludeFiles", value_delimiter = ',', default_values = DEFAULT_EXCLUDED_FILES)]
    pub(crate) hash_exclude_files: Vec<String>,

    /// Dependency declaration used to propagate changes; empty disables it
    #[arg(long, default_value = DEFAULT_DEPENDENCIES_FILE)]
    pub(crate) dependencies: String,

    /// Bump applied to new and changed packages
    #[arg(long, value_enum, default_value_t = BumpType::Patch)]
    pub(crate) bump: BumpType,

    #[arg(long, value_enum, default_value_t = OutputFormat::Azure)]
    pub(crate) format: OutputFormat,
}

impl Cli {
    pub(crate) fn run_config(&self) -> RunConfig {
        let dependencies = (!self.dependencies.is_empty()).then(|| PathBuf::from(&self.dependencies));

        RunConfig {
            save_version: self.save,
            debug: self.debug,
            changed: self.changed,
            version: self.version,
            hash: self.hash,
            tag: self.tag,
            children: self.children.clone(),
            prefix_path: self.prefix_path.clone(),
            hash_file: self.hash_file.clone(),
            hash_exclude_folders: self.hash_exclude_folders.clone(),
            hash_exclude_files: self.hash_exclude_files.clone(),
            dependencies,
            bump: self.bump,
        }
    }
}
