use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dompet_core::TransactionKind;
use dompet_finance::{categorize, known_categories};
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod import_cmd;
mod logging;
mod server;
mod state;

use import_cmd::OutputFormat;
use server::{store::TransactionStore, AppState};

#[derive(Parser, Debug)]
#[command(name = "dompet", version, about = "Dompet personal finance tracker")]
struct Cli {
    /// Config file (default: ~/.dompet/config.toml)
    #[arg(long, global = true, env = "DOMPET_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a bank CSV export and print the categorized transactions
    Import {
        /// Bank key: bca, mandiri, bni, bri; anything else uses the generic parser
        #[arg(long)]
        bank: Option<String>,

        /// CSV file to read. If not supplied, input is taken from stdin.
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Date (YYYY-MM-DD) to use for rows without a readable date
        #[arg(long)]
        today: Option<String>,
    },

    /// Show which category a description falls into
    Categorize {
        description: Option<String>,

        /// Treat the description as income when no keyword matches
        #[arg(long)]
        income: bool,

        /// List every category label instead
        #[arg(long)]
        list: bool,
    },

    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// Serve files from this directory for non-API paths
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Start with one sample transaction
        #[arg(long)]
        seed_demo: bool,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    let config_arg = cli.config;

    match cli.command {
        Command::Import {
            bank,
            file,
            format,
            today,
        } => {
            let cfg = config::load_config(&config::config_path(config_arg.as_deref())?)?;
            let bank = bank.unwrap_or(cfg.import.default_bank);
            let today = today
                .as_deref()
                .map(dompet_core::parse_iso_date)
                .transpose()?;
            import_cmd::run_import(&bank, file.as_deref(), format, today)?;
        }

        Command::Categorize {
            description,
            income,
            list,
        } => {
            if list {
                for c in known_categories() {
                    println!("{c}");
                }
                return Ok(());
            }
            let Some(description) = description else {
                bail!("pass a description or --list");
            };
            let kind = if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            println!("{}", categorize(&description, kind));
        }

        Command::Serve {
            host,
            port,
            static_dir,
            seed_demo,
        } => {
            let mut cfg = config::load_config(&config::config_path(config_arg.as_deref())?)?;
            if let Some(h) = host {
                cfg.server.host = h;
            }
            if let Some(p) = port {
                cfg.server.port = p;
            }
            if static_dir.is_some() {
                cfg.server.static_dir = static_dir;
            }

            let store = if seed_demo || cfg.store.seed_demo {
                TransactionStore::with_demo_seed()
            } else {
                TransactionStore::new()
            };
            let state = AppState::new(Arc::new(store), &cfg);

            server::run_server(state, &cfg.server.host, cfg.server.port)
                .await
                .context("running HTTP server")?;
        }

        Command::Config { command } => {
            let config_path = config::config_path(config_arg.as_deref())?;
            match command {
                ConfigCommand::Init => config::init_config(&config_path)?,
                ConfigCommand::Show => {
                    let cfg = config::load_config(&config_path)?;
                    println!("# {}", config_path.display());
                    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
                }
            }
        }
    }

    Ok(())
}
