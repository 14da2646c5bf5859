mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    act::ActSubcommand, auth::AuthSubcommand, loss::LossSubcommand, mission::MissionSubcommand,
    settings::SettingsSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "veil",
    about = "A quiet practice of unseen acts and hidden progress",
    version,
    propagate_version = true
)]
struct Cli {
    /// Practice root (default: auto-detect from .veil/, else the home directory)
    #[arg(long, global = true, env = "VEIL_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the practice tree under the root
    Init,

    /// Sign up, sign in, sign out, and inspect the session
    Auth {
        #[command(subcommand)]
        subcommand: AuthSubcommand,
    },

    /// Draw, show, and complete acts
    Act {
        #[command(subcommand)]
        subcommand: ActSubcommand,
    },

    /// Resolve a pending sacred-loss offer
    Loss {
        #[command(subcommand)]
        subcommand: LossSubcommand,
    },

    /// Close the reflection step for the completed act
    Reflect {
        /// Private note; acknowledged, never stored
        #[arg(long)]
        note: Option<String>,

        /// Comma-separated emotion tags (e.g. peace,doubt)
        #[arg(long, value_delimiter = ',')]
        emotions: Vec<String>,
    },

    /// Browse and begin missions
    Mission {
        #[command(subcommand)]
        subcommand: MissionSubcommand,
    },

    /// Show rank, virtues, and the state of today's practice
    Status,

    /// Show completion history
    History {
        /// Only the most recent N entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show and change profile settings
    Settings {
        #[command(subcommand)]
        subcommand: SettingsSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Auth { subcommand } => cmd::auth::run(&root, subcommand, cli.json),
        Commands::Act { subcommand } => cmd::act::run(&root, subcommand, cli.json),
        Commands::Loss { subcommand } => cmd::loss::run(&root, subcommand, cli.json),
        Commands::Reflect { note, emotions } => {
            cmd::reflect::run(&root, note.as_deref(), &emotions, cli.json)
        }
        Commands::Mission { subcommand } => cmd::mission::run(&root, subcommand, cli.json),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::History { limit } => cmd::history::run(&root, limit, cli.json),
        Commands::Settings { subcommand } => cmd::settings::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
