//! Dialectic CLI binary entry point.

use std::io::Write;

use clap::{CommandFactory, Parser};
use dialectic::cli::{self, Cli};
use dialectic::config::DialecticConfig;
use dialectic::dialogue::{self, Dialogue};
use dialectic::error::DialecticError;
use dialectic::provider::BackendKind;

#[tokio::main]
async fn main() {
    if std::env::args_os().len() <= 1 {
        let _ = Cli::command().print_help();
        std::process::exit(1);
    }

    let cli = Cli::parse();
    cli::init_tracing();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), DialecticError> {
    let settings = cli.dialogue_settings();
    settings.validate()?;

    let config = DialecticConfig::from_env();
    for kind in [BackendKind::Gpt, BackendKind::Claude] {
        if !config.has_credentials(kind.provider_key()) {
            tracing::warn!(
                backend = %kind,
                env = kind.api_key_env(),
                "No API key configured; this backend's turns will report an error"
            );
        }
    }

    let sink = dialogue::turn_sink(|turn| {
        print!("{}", cli::format_turn(turn));
        let _ = std::io::stdout().flush();
    });

    let mut dialogue = Dialogue::open(
        &settings,
        &cli.session_settings(BackendKind::Gpt),
        &cli.session_settings(BackendKind::Claude),
        &config,
    )?
    .with_turn_sink(sink);

    dialogue.run().await?;
    Ok(())
}
