use anyhow::Context;
use bank_crud::app::{self, ScreenAction};
use bank_crud::core::service::build_client;
use bank_crud::modules::core_utilities::handle_error;
use bank_crud::utils::error::{BankError, ErrorSeverity};
use bank_crud::utils::{logger, validation::Validate};
use bank_crud::{AppConfig, CliConfig};
use clap::Parser;
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut config = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => exit_with(&e),
        },
        None => AppConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout_seconds {
        config.api.timeout_seconds = timeout;
    }

    // 初始化日誌
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting bank-crud on {}", config.api.base_url);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        exit_with(&e);
    }

    let client = match build_client(config.api.timeout_seconds) {
        Ok(client) => client,
        Err(e) => exit_with(&e),
    };

    let action = ScreenAction::from(cli.command);
    match app::run(cli.resource, client, &config, action).await {
        Ok(outcome) => {
            writeln!(std::io::stdout().lock(), "{}", outcome.output)
                .context("failed to write screen output")?;
            if let Some(banner) = outcome.banner {
                tracing::error!("❌ {}", banner);
                std::process::exit(2);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                cli.resource.key(),
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            exit_with(&e);
        }
    }

    Ok(())
}

fn exit_with(e: &BankError) -> ! {
    let friendly = handle_error(e);
    match &friendly.code {
        Some(code) => eprintln!("❌ {} [{}]: {}", friendly.title, code, friendly.message),
        None => eprintln!("❌ {}: {}", friendly.title, friendly.message),
    }
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
