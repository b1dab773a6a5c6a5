mod cli;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use pkgdelta_operations::RunConfig;
use pkgdelta_operations::operations::RunOperation;
use pkgdelta_operations::providers::{
    FileSystemManifestIO, FileSystemSnapshotStore, Git2TagProvider, JsonDependencySource,
    SemverBumpStrategy,
};

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::output::render_report;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match parse_cli() {
        Ok(Some(cli)) => cli,
        Ok(None) => return ExitCode::SUCCESS,
        Err(CliError::Usage(e)) => {
            // clap renders its own usage text
            e.print().ok();
            return ExitCode::FAILURE;
        }
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let config = cli.run_config();
    logging::init(config.debug);

    match run(&cli, &config).await {
        Ok(()) => {
            println!("DONE");
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// `Ok(None)` when clap already answered the request, e.g. `--help`.
fn parse_cli() -> Result<Option<Cli>> {
    if std::env::args_os().len() < 2 {
        return Err(CliError::NoArguments);
    }

    match Cli::try_parse() {
        Ok(cli) => Ok(Some(cli)),
        Err(e) if !e.use_stderr() => {
            e.print()?;
            Ok(None)
        }
        Err(e) => Err(CliError::Usage(e)),
    }
}

async fn run(cli: &Cli, config: &RunConfig) -> Result<()> {
    let operation = RunOperation::new(
        FileSystemSnapshotStore::new(),
        JsonDependencySource::new(),
        FileSystemManifestIO::new(),
        Git2TagProvider::new(&config.prefix_path),
        SemverBumpStrategy::new(),
    );

    let output = operation.execute(config).await?;

    let formatter = cli.format.formatter();
    print!("{}", render_report(&output, config, formatter.as_ref())?);

    if !output.is_success() {
        return Err(CliError::ScanRootsFailed(
            output
                .failed_roots
                .into_iter()
                .map(|failure| failure.package_folder)
                .collect(),
        ));
    }

    Ok(())
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
