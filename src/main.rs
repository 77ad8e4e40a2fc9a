use clap::Parser;
use playwright_report::cli::commands::{cmd_dashboard, cmd_webhook};
use playwright_report::cli::config::{Cli, Commands, load_config};
use tracing::Level;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());

    let result = match &cli.command {
        Commands::Dashboard(args) => cmd_dashboard(args, &config).map(|_| ()),
        Commands::Webhook(args) => cmd_webhook(args, &config),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; -v raises the level one step at a time.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
