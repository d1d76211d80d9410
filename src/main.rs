// ═══════════════════════════════════════════════════════════════════════════
// RFT CLI - thin wrapper over the switcher flows
// ═══════════════════════════════════════════════════════════════════════════

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rft::{Action, Scope, Switcher};

#[derive(Parser)]
#[command(name = "rft")]
#[command(about = "Fuzzy rofi switcher for tmux sessions, windows and tmuxinator projects")]
struct Cli {
    /// Enable logging at debug level
    #[arg(long, global = true, default_value_t = false, action = ArgAction::Set)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Switch tmux session
    SwitchSession,

    /// Kill tmux session
    KillSession,

    /// Switch tmux window
    SwitchWindow {
        /// Limit the scope to this session
        #[arg(long)]
        session: Option<String>,

        /// Consider the windows of all sessions
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        global_scope: bool,
    },

    /// Kill tmux window
    KillWindow {
        /// Limit the scope to this session
        #[arg(long)]
        session: Option<String>,

        /// Consider the windows of all sessions
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        global_scope: bool,
    },

    /// Load a tmuxinator project
    LoadProject,

    /// Print version
    Version,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("RFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Commands::Version = cli.command {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut switcher = Switcher::new();
    match cli.command {
        Commands::SwitchSession => switcher.session_action(Action::Switch),
        Commands::KillSession => switcher.session_action(Action::Kill),
        Commands::SwitchWindow {
            session,
            global_scope,
        } => switcher.window_action(Action::Switch, Scope::from_flags(session, global_scope)),
        Commands::KillWindow {
            session,
            global_scope,
        } => switcher.window_action(Action::Kill, Scope::from_flags(session, global_scope)),
        Commands::LoadProject => switcher.load_project(),
        Commands::Version => unreachable!(),
    }
}
