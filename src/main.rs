use clap::Parser;
use small_dash::app;
use small_dash::config::{CliConfig, Command};
use small_dash::utils::error::{DashError, ErrorSeverity};
use small_dash::utils::{logger, validation::Validate};
use small_dash::DashConfig;

fn exit_with(e: &DashError) -> ! {
    tracing::error!(
        "❌ small-dash failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = DashConfig::load(cli.config.as_deref())
        .and_then(|config| config.validate().map(|_| config))
        .and_then(|config| cli.validate().map(|_| config));
    let config = match config {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let output = match &cli.command {
        Command::Gdp(args) => app::run_gdp(&config, args).await,
        Command::Nickname(args) => app::run_nickname(&config, args),
    };

    match output {
        Ok(text) => print!("{}", text),
        Err(e) => exit_with(&e),
    }

    Ok(())
}
