//! Print the rendered summary of a player's latest game.

use std::process::ExitCode;

use chess_core::TimeClass;
use clap::Parser;
use lastgame_server::clients::ChessComClient;
use lastgame_server::config::Config;
use lastgame_server::error::AppError;
use lastgame_server::lookup::{lookup, LookupRequest};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "last-game", about = "Summarize a player's most recent Chess.com game")]
struct Args {
    /// Player to look up (defaults to CHESS_USERNAME)
    username: Option<String>,

    /// Only consider games of this time class
    #[arg(short, long)]
    category: Option<TimeClass>,

    /// Template overriding TEMPLATE_DEFAULT / TEMPLATE_OTHER_USER
    #[arg(short, long)]
    template: Option<String>,

    /// Print the template variables as JSON instead of rendered text
    #[arg(long)]
    vars: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let client = ChessComClient::with_base_url(&config.chess_com_api_url)?;

    let request = LookupRequest {
        username: args.username,
        category: args.category,
        template: args.template,
    };

    match lookup(&client, &config, request).await {
        Ok(outcome) if args.vars => {
            println!("{}", serde_json::to_string_pretty(&outcome.variables)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(outcome) => {
            println!("{}", outcome.text);
            Ok(ExitCode::SUCCESS)
        }
        Err(AppError::NotFound(msg)) | Err(AppError::BadRequest(msg)) => {
            eprintln!("{msg}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Failed to fetch games");
            Ok(ExitCode::FAILURE)
        }
    }
}
