use std::path::PathBuf;

use betaware_core::Outcome;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "betaware")]
#[command(about = "Log your bets and keep an eye on the numbers, online or offline")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Directory holding the local database
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// BetAware REST API base URL (including /api/v1)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Face-recognition service base URL
    #[arg(long, global = true, value_name = "URL")]
    pub face_api_url: Option<String>,

    /// Skip the health probe and use the local mirror only
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with username and password
    Login {
        username: String,
        /// Password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Register(RegisterArgs),
    /// Log out and clear the local session
    Logout,
    /// Show session and API availability
    Status {
        /// Keep probing the API and print availability changes
        #[arg(long)]
        watch: bool,
    },
    /// Record and list bets
    Bet {
        #[command(subcommand)]
        command: BetCommands,
    },
    /// Totals, win rate and stake per game
    Report {
        /// Only include bets from the last N days
        #[arg(long, value_name = "N")]
        last_days: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the built-in categories and games
    Catalog,
    /// Face-recognition enrollment and login
    Face {
        #[command(subcommand)]
        command: FaceCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    /// Full name
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    /// CPF (national ID)
    #[arg(long)]
    pub cpf: String,
    /// CEP (postal code)
    #[arg(long)]
    pub cep: String,
    #[arg(long)]
    pub address: String,
    /// Password (prompted on stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum BetCommands {
    /// Record a bet
    Add {
        /// Sport, e.g. Futebol
        #[arg(long)]
        category: String,
        /// Match, e.g. "Flamengo x Vasco"
        #[arg(long)]
        game: String,
        /// Amount staked
        #[arg(long)]
        amount: Decimal,
        /// won or lost
        #[arg(long)]
        outcome: Outcome,
    },
    /// List bets, optionally restricted to a period
    List(ListArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// First day to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", conflicts_with = "last_days")]
    pub from: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", conflicts_with = "last_days")]
    pub to: Option<NaiveDate>,
    /// Only bets from the last N days
    #[arg(long, value_name = "N")]
    pub last_days: Option<i64>,
    /// Only won or lost bets
    #[arg(long)]
    pub outcome: Option<Outcome>,
    /// Show at most N bets, newest first
    #[arg(short, long)]
    pub limit: Option<usize>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum FaceCommands {
    /// Enroll a face picture for a user
    Register {
        username: String,
        /// JPEG or PNG picture
        image: PathBuf,
    },
    /// Log in by face
    Login {
        /// Restrict matching to this user
        #[arg(long)]
        username: Option<String>,
        /// JPEG or PNG picture
        image: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
