use autocompare::utils::{logger, validation::Validate};
use autocompare::{ChromiumEngine, CliConfig, LocalStorage, RunOrchestrator, RunOutcome};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    let format = if config.json_logs {
        logger::LogFormat::Json
    } else {
        logger::LogFormat::Compact
    };
    logger::init_logger(format, config.verbose);

    tracing::info!("Starting autocompare scraper");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.root.clone());
    let orchestrator = RunOrchestrator::new(storage, config, ChromiumEngine::new());

    match orchestrator.run().await {
        Ok(RunOutcome::Completed(summary)) => {
            tracing::info!(
                "✅ Run finished: {}/{} sites scraped",
                summary.succeeded(),
                summary.total()
            );
        }
        Ok(RunOutcome::NothingToDo) => {
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(
                "❌ Scrape run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 依錯誤嚴重程度決定退出碼，至少為 1
            std::process::exit(e.severity().exit_code().max(1));
        }
    }
}
