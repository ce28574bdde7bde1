//! motivad - swap web page ads for motivational quotes and today's reminders

use clap::Parser;
use tracing_subscriber::EnvFilter;

use motivad::cli::{Cli, Commands, ConfigCommands, RemindCommands};
use motivad::error::Result;

mod commands;
mod utils;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG wins over --verbose
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Clean {
            source,
            out,
            watch,
            interval,
            passes,
            today,
            seed,
            json,
        } => commands::cmd_clean(&source, out, watch, interval, passes, today, seed, json),
        Commands::Scan { source, json } => commands::cmd_scan(&source, json),

        // Reminder commands
        Commands::Remind(RemindCommands::Add { text, time }) => commands::cmd_remind_add(&text, &time),
        Commands::Remind(RemindCommands::List { json, html }) => commands::cmd_remind_list(json, html),
        Commands::Remind(RemindCommands::Today { today }) => commands::cmd_remind_today(today),

        // Miscellaneous
        Commands::Quotes { random, json } => commands::cmd_quotes(random, json),
        Commands::Config(ConfigCommands::Show) => commands::cmd_config_show(),
        Commands::Config(ConfigCommands::Init { force }) => commands::cmd_config_init(force),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
