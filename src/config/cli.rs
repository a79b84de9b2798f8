use crate::utils::error::Result;
use crate::utils::validation::{validate_ordered, validate_positive_number, Validate};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "small-dash")]
#[command(about = "GDP viewer and nickname generator")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Filter the GDP table and show growth per country
    Gdp(GdpArgs),
    /// Generate nickname ideas
    Nickname(NicknameArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct GdpArgs {
    /// Override the data file from config
    #[arg(long)]
    pub data: Option<String>,

    /// Override the data URL from config
    #[arg(long, conflicts_with = "data")]
    pub url: Option<String>,

    /// First year, defaults to the earliest year in the data
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year, defaults to the latest year in the data
    #[arg(long)]
    pub to: Option<i32>,

    /// Country codes or names, defaults to the configured selection
    #[arg(long, value_delimiter = ',')]
    pub countries: Vec<String>,

    /// List the available countries and exit
    #[arg(long)]
    pub list_countries: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Args)]
pub struct NicknameArgs {
    /// One word that describes you
    #[arg(short, long, default_value = "")]
    pub key_word: String,

    /// Things you like, comma separated
    #[arg(short, long, default_value = "")]
    pub likes: String,

    /// How many nicknames to show, defaults to the configured count
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Seed for a reproducible order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also show the extra templates
    #[arg(long)]
    pub more: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl Validate for GdpArgs {
    fn validate(&self) -> Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            validate_ordered("--from..--to", from, to)?;
        }
        if let Some(url) = &self.url {
            crate::utils::validation::validate_url("--url", url)?;
        }
        Ok(())
    }
}

impl Validate for NicknameArgs {
    fn validate(&self) -> Result<()> {
        if let Some(count) = self.count {
            validate_positive_number("--count", count, 1)?;
        }
        Ok(())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Gdp(args) => args.validate(),
            Command::Nickname(args) => args.validate(),
        }
    }
}
