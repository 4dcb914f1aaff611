use clap::{CommandFactory, Parser};
use lab_attendance::utils::error::ErrorSeverity;
use lab_attendance::utils::{logger, validation::Validate};
use lab_attendance::{AttendanceEngine, AttendanceError, AttendancePipeline, CliConfig, LocalStorage};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 沒有任何參數時顯示說明並以 1 結束
    if std::env::args_os().len() == 1 {
        CliConfig::command().print_help()?;
        println!();
        std::process::exit(1);
    }

    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.log_json);
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.into_run_config() {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let pipeline = AttendancePipeline::new(LocalStorage::default(), config);
    let engine = AttendanceEngine::new(pipeline);

    match engine.run() {
        Ok(summary) => {
            if !summary.unknown_identifiers.is_empty() {
                println!(
                    "⚠️ {} collected identifier(s) not in the class roster: {}",
                    summary.unknown_identifiers.len(),
                    summary.unknown_identifiers.join(", ")
                );
            }
            println!(
                "✅ Done. Created {} and {}",
                summary.files.attendance.display(),
                summary.files.missing.display()
            );
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn fail(e: AttendanceError) -> ! {
    tracing::error!(
        "❌ Attendance check failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 依嚴重程度決定結束碼
    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
