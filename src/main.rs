use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use todo::{
    cli::{self, Cli},
    infrastructure::{config::{prepare_sqlite_file, Settings}, sqlite_repo::SqliteTodoRepository},
    presentation::Report,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();
    let (report, exit) = cli::finish(run(args).await);

    let mut stdout = io::stdout();
    let written = if stdout.is_terminal() { report.write_styled(&mut stdout) } else { report.write_plain(&mut stdout) };
    if written.is_err() { return ExitCode::FAILURE; }
    exit.into()
}

async fn run(args: Cli) -> anyhow::Result<Report> {
    let settings = Settings::load()?;
    prepare_sqlite_file(&settings.database_url)?;
    let repo = SqliteTodoRepository::connect(&settings.database_url).await?;
    Ok(cli::run(repo, args.command).await?)
}
