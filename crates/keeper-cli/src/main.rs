use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use keeper_store::paths::{default_db_path, prepare_db_path};
use keeper_store::{Database, WalletService};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod menu;

use crate::menu::Menu;

#[derive(Parser, Debug)]
#[command(name = "keykeeper")]
#[command(author, version, about = "Offline PhraseVault: PIN-protected recovery phrase storage", long_about = None)]
struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long, env = "KEYKEEPER_DB", global = true)]
    db: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive menu (default)
    Menu,

    /// List stored wallets
    List {
        #[arg(long)]
        json: bool,
    },

    /// Print a wallet's words in order
    View {
        /// Wallet ID
        id: i64,
    },

    /// Print a wallet's words on one line
    Export {
        /// Wallet ID
        id: i64,
        #[arg(long)]
        json: bool,
    },

    /// Delete a wallet and all of its words
    Delete {
        /// Wallet ID
        id: i64,
        /// Skip the typed confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Delete one word by its 1-based position
    DeleteWord {
        /// Wallet ID
        id: i64,
        /// Position in the phrase, starting at 1
        index: usize,
    },
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let db_path = match cli.db {
        Some(path) => prepare_db_path(path)?,
        None => prepare_db_path(default_db_path()?)?,
    };
    debug!(path = %db_path.display(), "resolved database path");
    let service = WalletService::new(Database::open(&db_path)?);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            println!("Offline PhraseVault - Database: {}", db_path.display());
            let hide_pins = stdin.is_terminal();
            Menu::new(&service, stdin.lock(), stdout.lock(), hide_pins).run()?;
        }
        Commands::List { json } => commands::list(&service, json, &mut stdout)?,
        Commands::View { id } => {
            let pin = commands::read_pin()?;
            commands::view(&service, id, &pin, &mut stdout)?;
        }
        Commands::Export { id, json } => {
            let pin = commands::read_pin()?;
            commands::export(&service, id, &pin, json, &mut stdout)?;
        }
        Commands::Delete { id, yes } => {
            commands::delete(&service, id, yes, &mut stdin.lock(), &mut stdout)?;
        }
        Commands::DeleteWord { id, index } => {
            let pin = commands::read_pin()?;
            commands::delete_word(&service, id, &pin, index, &mut stdout)?;
        }
    }
    Ok(())
}
