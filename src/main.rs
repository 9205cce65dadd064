use std::sync::Arc;

use anyhow::Context;
use tokio::io::{BufReader, stdin, stdout};
use triagex::{
    analysis::HttpAnalysisClient,
    cli::{Command, cli_options_from_args},
    config::Config,
    intake::{ConsentGate, ContactForm, IntakeWizard, LoggingContactSubmitter},
    logging::init_tracing,
    storage::{FileStore, MemoryStore},
    terminal::Terminal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = cli_options_from_args()?;
    let config = Config::load_or_default(options.config_path.as_deref())
        .context("failed to load triagex config")?;
    let logging_guard = init_tracing(&config.logging)?;
    tracing::info!(
        target: "triagex",
        run_id = logging_guard.run_id(),
        route = %options.command.entry_route(),
        api = %config.api.base_url,
        "session_started"
    );

    let durable = FileStore::open(config.storage.consent_store_path())
        .context("failed to open consent store")?;
    let consent = ConsentGate::new(Arc::new(durable));
    let mut terminal = Terminal::new(BufReader::new(stdin()), stdout());

    let route = match options.command {
        Command::Assess => {
            let client = HttpAnalysisClient::new(&config.api)
                .context("failed to build analysis client")?;
            let mut wizard = IntakeWizard::resume(Arc::new(MemoryStore::new()), consent)
                .context("failed to restore intake session")?;
            terminal
                .run_assessment(&mut wizard, &client, &config.processing.sequence())
                .await?
        }
        Command::Contact => {
            let mut form = ContactForm::new();
            terminal
                .run_contact(&mut form, &LoggingContactSubmitter)
                .await?
        }
    };

    tracing::info!(target: "triagex", route = %route, "session_finished");
    drop(logging_guard);
    Ok(())
}
