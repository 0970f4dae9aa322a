use anyhow::Result;
use carteira_core::MonthWindow;
use clap::{Parser, Subcommand};

mod auth;
mod config;
mod dashboard;
mod logging;
mod records_cmd;
mod render;
mod state;

use records_cmd::{
    CategoryCommand, DebitedCommand, ExpenseCommand, IncomeCommand, IncomeTypeCommand,
    InvestmentCommand, InvestmentTypeCommand,
};

#[derive(Parser, Debug)]
#[command(
    name = "carteira",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARTEIRA_BUILD_SHA"), ")"),
    about = "Personal finance dashboard for the Carteira backend"
)]
struct Cli {
    /// Debug logging for every carteira crate (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly dashboard: totals, groups and investment goals
    Dashboard {
        /// Month as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<MonthWindow>,

        /// Print the aggregated dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in and store the session token in ~/.carteira/session.json
    Login {
        #[arg(long)]
        user: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        #[arg(long)]
        user: String,
        #[arg(long)]
        email: String,
        /// CPF
        #[arg(long)]
        document: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// End the session, locally and on the server
    Logout,

    /// Show who is logged in and whether the token is still valid
    Status,

    /// Expense categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommand,
    },

    /// Debit sources (accounts, cards)
    Debited {
        #[command(subcommand)]
        command: DebitedCommand,
    },

    /// Income types
    IncomeTypes {
        #[command(subcommand)]
        command: IncomeTypeCommand,
    },

    /// Incomes
    Incomes {
        #[command(subcommand)]
        command: IncomeCommand,
    },

    /// Expenses
    Expenses {
        #[command(subcommand)]
        command: ExpenseCommand,
    },

    /// Investment types and goals
    InvestmentTypes {
        #[command(subcommand)]
        command: InvestmentTypeCommand,
    },

    /// Investments
    Investments {
        #[command(subcommand)]
        command: InvestmentCommand,
    },

    /// Manage ~/.carteira/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    if let Command::Config { command } = &cli.command {
        return match command {
            ConfigCommand::Init => config::init_config(),
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg)?);
                Ok(())
            }
        };
    }

    let cfg = config::load_config()?;

    match cli.command {
        Command::Dashboard { month, json } => dashboard::run(&cfg, month, json).await?,
        Command::Login { user, password } => auth::login(&cfg, user, password).await?,
        Command::Register {
            user,
            email,
            document,
            password,
        } => auth::register(&cfg, user, email, document, password).await?,
        Command::Logout => auth::logout(&cfg).await?,
        Command::Status => auth::status(&cfg).await?,
        Command::Categories { command } => records_cmd::categories(&cfg, command).await?,
        Command::Debited { command } => records_cmd::debited(&cfg, command).await?,
        Command::IncomeTypes { command } => records_cmd::income_types(&cfg, command).await?,
        Command::Incomes { command } => records_cmd::incomes(&cfg, command).await?,
        Command::Expenses { command } => records_cmd::expenses(&cfg, command).await?,
        Command::InvestmentTypes { command } => {
            records_cmd::investment_types(&cfg, command).await?
        }
        Command::Investments { command } => records_cmd::investments(&cfg, command).await?,
        Command::Config { .. } => {}
    }

    Ok(())
}
