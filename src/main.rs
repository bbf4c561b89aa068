use clap::Parser;
use planetary_boundaries::domain::ports::Pipeline;
use planetary_boundaries::utils::error::{ErrorSeverity, PlotError};
use planetary_boundaries::utils::{logger, validation::Validate};
use planetary_boundaries::{CliConfig, LocalStorage, PlotConfig, PlotEngine, PlotPipeline};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting pbs-plot");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = match PlotConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    cli.apply(&mut config, &std::env::current_dir()?);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 配置檔裡的相對路徑以配置檔所在目錄為基準
    let storage = LocalStorage::new(storage_base(&cli.config));
    let pipeline = PlotPipeline::new(storage, config);

    if cli.dry_run {
        let system = match pipeline.extract().and_then(|r| pipeline.transform(r)) {
            Ok(system) => system,
            Err(e) => fail(&e),
        };
        println!("{}", system);
        return Ok(());
    }

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let print_summary = cli.summary;
    let engine = PlotEngine::new_with_monitoring(pipeline, cli.monitor);

    match engine.run() {
        Ok(outcome) => {
            tracing::info!("✅ Plot rendered successfully!");
            println!("✅ Plot rendered successfully!");
            println!("📁 Plot saved to: {}", outcome.plot_path);
            if let Some(summary_path) = &outcome.summary_path {
                println!("📁 Summary saved to: {}", summary_path);
            }
            if print_summary {
                println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
            }
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn storage_base(config_path: &str) -> String {
    Path::new(config_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string())
}

fn fail(e: &PlotError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Plot failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
