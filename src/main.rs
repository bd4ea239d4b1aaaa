use anyhow::Result;
use clap::Parser;

use agency_unison::cli::commands::{self, Command, CommandContext};
use agency_unison::cli::Cli;
use agency_unison::{
    create_session_span, generate_correlation_id, init_telemetry, AgencyUnisonConfig,
    OperationTimer, SessionStore,
};

fn main() -> Result<()> {
    let _ = AgencyUnisonConfig::load_env_file();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AgencyUnisonConfig::load_from(path)?,
        None => AgencyUnisonConfig::load()?,
    };
    init_telemetry(&config.observability)?;

    let Some(command) = &cli.command else {
        return commands::show_usage();
    };

    let command = commands::build(command);
    let correlation_id = generate_correlation_id();
    let span = create_session_span(command.name(), &correlation_id);
    let _guard = span.enter();

    let mut ctx = CommandContext::new(SessionStore::seeded(&config.session), cli.json);
    let timer = OperationTimer::new(command.name());
    let result = command.execute(&mut ctx);
    timer.finish();

    if config.observability.metrics_enabled {
        ctx.store.metrics().log_stats();
    }
    result
}
