use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fx_cli::commands::{
    config_ops, default_store_path, rates_ops, scan_ops, target_ops, words_ops,
};

#[derive(Parser)]
#[command(name = "fxtool", about = "Find and convert currency amounts in text")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find amounts in text and convert them to the target currency
    Scan {
        /// Text to scan
        text: String,
        /// Target currency code (default: stored target)
        #[arg(long)]
        target: Option<String>,
        /// JSON rate table file (default: cached rates in the store)
        #[arg(long)]
        rates: Option<String>,
        /// Settings store file
        #[arg(long)]
        store: Option<PathBuf>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Spell a number in words
    Words {
        /// Non-negative number
        value: f64,
        /// Currency whose numbering system to use (INR selects lakh/crore)
        #[arg(long, default_value = "USD")]
        target: String,
    },
    /// Currency registry
    Currencies {
        #[command(subcommand)]
        action: CurrenciesAction,
    },
    /// Engine settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Exchange rate cache
    Rates {
        /// Settings store file
        #[arg(long)]
        store: Option<PathBuf>,
        #[command(subcommand)]
        action: RatesAction,
    },
    /// Stored target currency
    Target {
        /// Settings store file
        #[arg(long)]
        store: Option<PathBuf>,
        #[command(subcommand)]
        action: TargetAction,
    },
}

#[derive(Subcommand)]
enum CurrenciesAction {
    /// List known currencies
    List,
    /// Export the default registry as TOML
    Export,
    /// Validate a custom registry TOML file
    Validate {
        /// Path to the TOML file
        file: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Export default settings as TOML
    Export,
    /// Validate a custom settings TOML file
    Validate {
        /// Path to the TOML file
        file: String,
    },
}

#[derive(Subcommand)]
enum RatesAction {
    /// Fetch current rates and print them (store untouched)
    Fetch {
        /// Rate endpoint (default: rates.source_url)
        #[arg(long)]
        url: Option<String>,
    },
    /// Refresh the cached rates if they are stale
    Update {
        /// Rate endpoint (default: rates.source_url)
        #[arg(long)]
        url: Option<String>,
        /// Fetch even if the cache is fresh
        #[arg(long)]
        force: bool,
    },
    /// Show the cached rates and their age
    Show,
}

#[derive(Subcommand)]
enum TargetAction {
    /// Set the target currency
    Set {
        /// Currency code
        code: String,
    },
    /// Show the target currency
    Show,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            text,
            target,
            rates,
            store,
            json,
        } => scan_ops::scan(
            &text,
            target.as_deref(),
            rates.as_deref(),
            &store.unwrap_or_else(default_store_path),
            json,
        ),
        Command::Words { value, target } => words_ops::words(value, &target),
        Command::Currencies { action } => match action {
            CurrenciesAction::List => config_ops::currencies_list(),
            CurrenciesAction::Export => config_ops::currencies_export(),
            CurrenciesAction::Validate { file } => config_ops::currencies_validate(&file),
        },
        Command::Settings { action } => match action {
            SettingsAction::Export => config_ops::settings_export(),
            SettingsAction::Validate { file } => config_ops::settings_validate(&file),
        },
        Command::Rates { store, action } => {
            let store = store.unwrap_or_else(default_store_path);
            match action {
                RatesAction::Fetch { url } => rates_ops::fetch(url.as_deref()),
                RatesAction::Update { url, force } => {
                    rates_ops::update(&store, url.as_deref(), force)
                }
                RatesAction::Show => rates_ops::show(&store),
            }
        }
        Command::Target { store, action } => {
            let store = store.unwrap_or_else(default_store_path);
            match action {
                TargetAction::Set { code } => target_ops::set(&store, &code),
                TargetAction::Show => target_ops::show(&store),
            }
        }
    }
}
