use clap::{Parser, Subcommand, ValueEnum};

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Parser)]
#[command(name = "motivad")]
#[command(author, version, about = "Swap web page ads for motivational quotes and today's reminders", long_about = None)]
#[command(after_help = r#"Examples:
  motivad remind add "Stretch" --time 2024-06-01T15:00   Save a reminder
  motivad remind list                                    Show saved reminders
  motivad clean page.html --out clean.html               Replace ads once
  motivad clean https://example.com --watch -o clean.html  Re-scan every minute
  motivad scan page.html                                 List ads without replacing
"#)]
pub struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace ads in a page with today's reminders or quotes
    #[command(after_help = r#"Examples:
  motivad clean page.html                       Print the cleaned page
  motivad clean page.html --out clean.html      Write it to a file
  motivad clean - < page.html                   Read the page from stdin
  motivad clean https://example.com --json      Show what was replaced
  motivad clean page.html --watch --interval 30s --out clean.html
"#)]
    Clean {
        /// File path, http(s) URL, or - for stdin
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Write the cleaned HTML here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<String>,

        /// Keep re-scanning the page on a fixed interval, rewriting --out each pass
        #[arg(short, long, requires = "out")]
        watch: bool,

        /// Scan interval in watch mode (e.g., 30s, 1m) - default from config
        #[arg(short, long, requires = "watch")]
        interval: Option<String>,

        /// Stop watch mode after N passes
        #[arg(long, requires = "watch")]
        passes: Option<usize>,

        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long, value_name = "DATE")]
        today: Option<String>,

        /// Seed for quote selection (reproducible output)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the replacement report as JSON (the page is only written with --out)
        #[arg(long)]
        json: bool,
    },

    /// List ad-like elements in a page without changing it
    Scan {
        /// File path, http(s) URL, or - for stdin
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage reminders
    #[command(subcommand, after_help = r#"Examples:
  motivad remind add "Buy milk" --time 2024-01-01T10:00
  motivad remind list
  motivad remind list --html
  motivad remind today
"#)]
    Remind(RemindCommands),

    /// Show the quotes available for replacement
    Quotes {
        /// Show one random quote
        #[arg(long)]
        random: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or initialize configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum RemindCommands {
    /// Save a new reminder
    Add {
        /// Reminder text
        #[arg(value_name = "TEXT")]
        text: String,

        /// When (e.g., 2024-06-01T15:00)
        #[arg(long, value_name = "TIME")]
        time: String,
    },

    /// List saved reminders
    List {
        /// Output as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,

        /// Output the escaped list markup
        #[arg(long)]
        html: bool,
    },

    /// Show reminders scheduled for today, earliest first
    Today {
        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long, value_name = "DATE")]
        today: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration and file locations
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
