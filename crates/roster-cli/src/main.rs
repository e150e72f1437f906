// Rust guideline compliant 2026-10-18

//! Roster CLI Application
//!
//! Command-line interface for the Roster user directory.

use clap::Parser;
use roster_app::{AppError, ErrorCode, ErrorEnvelope, RepoContext};
use roster_cli::commands::{self, lookup::LookupArgs, session::SessionAction};
use roster_cli::{create_formatter, logging, should_use_color, OutputFormatter};
use roster_core::OutputFormat as FormatSetting;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    version,
    about = "Roster: user directory with prefix-driven name matching",
    long_about = "Roster keeps a directory of users and their live sessions, and resolves partial names typed by people to the users they mean. Queries may start with flag characters: '!' searches offline users, '~' nicknames only, '-' usernames only, '#' includes hidden users.",
    after_help = "Examples:\n  roster init\n  roster user add stevie --nickname SirSteve\n  roster session connect stevie\n  roster match steve\n  roster match '!~sleep'\n  roster matches st --offline\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Directory containing `.roster` (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Table,
    Plain,
}

impl From<OutputFormat> for FormatSetting {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => FormatSetting::Json,
            OutputFormat::Table => FormatSetting::Table,
            OutputFormat::Plain => FormatSetting::Plain,
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize a new Roster repository
    Init,

    /// Manage known users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Change live session state
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Resolve a query to exactly one user
    Match(LookupArgs),

    /// List every user a query matches
    Matches(LookupArgs),

    /// Show user totals
    Stats,
}

#[derive(Debug, clap::Subcommand)]
enum UserAction {
    /// Register a user
    Add {
        /// Username (letters, digits and underscores)
        name: String,

        /// Nickname shown instead of the username
        #[arg(long)]
        nickname: Option<String>,
    },

    /// Remove a user
    Remove {
        /// Username
        name: String,
    },

    /// Set or clear a nickname
    Nick {
        /// Username
        name: String,

        /// New nickname; omit to clear
        nickname: Option<String>,
    },

    /// List every known user
    List,
}

fn resolve_format(cli: &Cli) -> FormatSetting {
    match cli.format {
        Some(format) => format.into(),
        None if cli.json => FormatSetting::Json,
        None => RepoContext::discover(cli.root.as_deref())
            .and_then(|context| context.load_config())
            .map(|config| config.output_format)
            .unwrap_or_default(),
    }
}

fn run(command: Commands, root: Option<&Path>, formatter: &dyn OutputFormatter) -> anyhow::Result<()> {
    match command {
        Commands::Init => commands::init::execute(root, formatter),
        Commands::User { action } => match action {
            UserAction::Add { name, nickname } => {
                commands::user::add(root, &name, nickname, formatter)
            }
            UserAction::Remove { name } => commands::user::remove(root, &name, formatter),
            UserAction::Nick { name, nickname } => {
                commands::user::nick(root, &name, nickname, formatter)
            }
            UserAction::List => commands::user::list(root, formatter),
        },
        Commands::Session { action } => commands::session::execute(root, action, formatter),
        Commands::Match(args) => commands::lookup::resolve(root, args, formatter),
        Commands::Matches(args) => commands::lookup::list(root, args, formatter),
        Commands::Stats => commands::stats::execute(root, formatter),
    }
}

fn report(error: &anyhow::Error, format: FormatSetting, formatter: &dyn OutputFormatter) {
    if format == FormatSetting::Json {
        let envelope = match error.downcast_ref::<AppError>() {
            Some(app_error) => ErrorEnvelope::from_error(app_error),
            None => ErrorEnvelope {
                code: ErrorCode::InvalidInput,
                message: format!("{:#}", error),
                details: None,
            },
        };
        if let Ok(json) = serde_json::to_string_pretty(&envelope) {
            println!("{}", json);
            return;
        }
    }

    eprintln!("{}", formatter.format_error(&format!("{:#}", error)));
}

fn main() {
    let cli = Cli::parse();

    let guard = match logging::init_tracing(&cli.log_level, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            std::process::exit(2);
        }
    };

    let use_color = !cli.no_color && should_use_color();
    let format = resolve_format(&cli);
    let formatter = create_formatter(format, use_color);

    let exit_code = match run(cli.command, cli.root.as_deref(), formatter.as_ref()) {
        Ok(()) => 0,
        Err(error) => {
            report(&error, format, formatter.as_ref());
            1
        }
    };

    drop(guard);
    std::process::exit(exit_code);
}
