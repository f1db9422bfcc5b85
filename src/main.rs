//! subseek CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subseek::cli::{Cli, Commands, ConfigCommands};
use subseek::theme::current_theme;

mod commands;

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("subseek=info"),
        2 => EnvFilter::new("subseek=debug"),
        _ => EnvFilter::new("subseek=trace,reqwest=debug"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        let theme = current_theme();
        eprintln!("{} {:#}", theme.error_text("error:"), err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Videos => commands::videos::handle(config_path).await,
        Commands::Upload { file, title } => commands::upload::handle(config_path, &file, title).await,
        Commands::Delete { video, yes } => commands::delete::handle(config_path, video, yes).await,
        Commands::Subtitles { video } => commands::subtitles::handle(config_path, video).await,
        Commands::Languages { video } => commands::languages::handle(config_path, video).await,
        Commands::Search { video, query } => commands::search::handle(config_path, video, &query).await,
        Commands::Play {
            video,
            at,
            search,
            pick,
        } => {
            let target = match (at, search) {
                (Some(raw), _) => commands::play::Target::Timestamp(raw),
                (None, Some(query)) => commands::play::Target::Search { query, pick },
                (None, None) => commands::play::Target::Start,
            };
            commands::play::handle(config_path, video, target).await
        }
        Commands::Parse { timestamps } => commands::parse::handle(&timestamps),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(config_path),
            ConfigCommands::Path => commands::config::handle_path(config_path),
            ConfigCommands::Init { force } => commands::config::handle_init(config_path, force),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
