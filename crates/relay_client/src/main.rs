use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;
use relay_client::{commands, ApiClient, ClientSession};
use relay_engine::RecordStore;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(about = "Search keywords and download pages through the relay")]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,
    /// Relay server base URL
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,
    /// Directory for downloaded files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Record file of completed downloads
    #[arg(long, default_value = ".relay_saved.ron")]
    records: PathBuf,
    /// Log at info level instead of warn
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);

    let api = ApiClient::new(&cli.server)?;
    let records = RecordStore::open(&cli.records)?;
    let mut session = ClientSession::new(records, cli.output_dir);

    commands::run(cli.command, &api, &mut session).await;

    if let Some(error) = session.view().error {
        eprintln!("{error}");
        process::exit(1);
    }
    Ok(())
}
