use clap::Parser;
use restaurant_cleanup::utils::logger;
use restaurant_cleanup::{CleanupPipeline, CliConfig, EtlEngine, LocalStorage, RunReport};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.log_format);

    tracing::info!("Starting restaurant-cleanup CLI");
    tracing::debug!("CLI config: {:?}", cli);

    // 解析並驗證配置
    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    tracing::info!(
        "Pipeline '{}': {} -> {}",
        settings.name,
        settings.input_path.display(),
        settings.output_path.display()
    );
    if let Some(description) = &settings.description {
        tracing::info!("📝 {}", description);
    }
    if settings.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let dry_run = settings.dry_run;
    let top_categories = settings.top_categories;
    let monitor = settings.monitor;

    let pipeline = CleanupPipeline::new(LocalStorage::new(), settings);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor);

    let result = if dry_run {
        tracing::info!("🔍 DRY RUN MODE - no output will be written");
        engine.dry_run()
    } else {
        engine.run()
    };

    match result {
        Ok(report) => report_success(&report, top_categories),
        Err(e) => {
            tracing::error!(
                "❌ Cleanup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

fn report_success(report: &RunReport, top_categories: usize) {
    let summary = &report.summary;

    if top_categories > 0 {
        for (rank, (alias, count)) in report
            .category_counts
            .most_common(top_categories)
            .into_iter()
            .enumerate()
        {
            tracing::info!("🏷️  #{} {} ({} restaurants)", rank + 1, alias, count);
        }
    }

    tracing::info!(
        "✅ Kept {} of {} records ({} dropped for missing coordinates)",
        summary.records_kept,
        summary.records_read,
        summary.dropped_missing_coordinates
    );

    match &report.output_path {
        Some(path) => tracing::info!("📁 Output saved to: {}", path),
        None => tracing::info!("Dry run complete, nothing written"),
    }
}
