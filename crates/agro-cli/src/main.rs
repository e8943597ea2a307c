use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use agro_client::{AgroClientFactory, AuthenticatedClient, FileStore, SessionStore};
use agro_term::{Config, Language, PageContext};
use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use log::LevelFilter;

mod commands;

use commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "agro", author, version = "0.1.0", about = "Agricultural advisory client")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(
        long = "api-url",
        id = "api-url",
        global = true,
        env = "AGRO_API_URL",
        help = "Base URL of the advisory API"
    )]
    api_url: Option<String>,

    #[clap(
        long = "language",
        id = "language",
        global = true,
        value_parser = ["es", "en"],
        help = "Interface language. Empty uses the stored preference, then Spanish"
    )]
    language: Option<String>,

    #[clap(
        long = "storage-file",
        id = "storage-file",
        global = true,
        env = "AGRO_STORAGE_FILE",
        help = "File holding the session, cached profile and language preference"
    )]
    storage_file: Option<String>,

    #[clap(
        long = "config-file",
        id = "config-file",
        global = true,
        env = "AGRO_CONFIG_FILE",
        help = "Path to the TOML config file"
    )]
    config_file: Option<String>,

    #[clap(
        long = "request-timeout",
        id = "request-timeout",
        global = true,
        help = "Request timeout in seconds, 0 disables it"
    )]
    request_timeout: Option<String>,

    #[clap(long, short, global = true, default_value = "warn")]
    log_level: String,

    #[clap(long, global = true, help = "Write logs to this file instead of stderr")]
    log_file: Option<PathBuf>,
}

fn init_logging(level: &str, file: Option<&PathBuf>) -> Result<()> {
    let log_level_filter = level.parse().unwrap_or(LevelFilter::Warn);
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level_filter);

    if let Some(path) = file {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("could not open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }
    builder.init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command();
    let matches = cmd.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    init_logging(&cli.log_level, cli.log_file.as_ref())?;

    let mut arg_matches = vec![&matches];
    if let Some((_, sub_matches)) = matches.subcommand() {
        arg_matches.push(sub_matches);
    }
    let config = Config::load(&cmd, &arg_matches).await?;

    if let Commands::Config = cli.command {
        println!("{}", Config::serialize_default(&cmd));
        return Ok(());
    }

    let sessions = SessionStore::new(Arc::new(FileStore::new(config.storage_file())));
    let language = Language::resolve(config.language(), sessions.language().as_deref());
    let client = AuthenticatedClient::new(config.api_url(), sessions.clone())
        .with_timeout(config.request_timeout()?);
    log::debug!("using API at {} ({language})", config.api_url());

    let today = chrono::Local::now().date_naive();
    let ctx = PageContext::new(
        AgroClientFactory::create_with_client(client),
        sessions,
        language,
        today,
    );

    let code = commands::run(cli.command, ctx).await?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
