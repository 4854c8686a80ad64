//! Filmgate Telegram Bot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx cargo run -p filmgate-telegram
//! ```

use clap::Parser;
use filmgate_core::{config, Settings};
use filmgate_telegram::FilmgateBot;
use tracing_subscriber::EnvFilter;

/// Filmgate - membership-gated film delivery over Telegram
#[derive(Parser, Debug)]
#[command(name = "filmgate-telegram")]
#[command(about = "Telegram bot that releases feed content to verified channel members")]
struct Args {
    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load secrets from the state directory first, then a local .env.
    let env_path = config::env_file();
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    }
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => "filmgate_telegram=info,teloxide=warn",
        1 => "filmgate_telegram=debug,teloxide=info",
        2 => "filmgate_telegram=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env()?;
    let bot = FilmgateBot::new(settings)?;

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\n[film] Filmgate Telegram Bot");
            println!("   Bot: @{}", username);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    println!("\n[phone] Open Telegram and send /start to begin");
    println!("   Press Ctrl+C to stop\n");

    bot.start_polling().await?;

    Ok(())
}
