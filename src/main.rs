use clap::Parser;
use meihua_oracle::utils::error::ErrorSeverity;
use meihua_oracle::utils::{logger, validation::Validate};
use meihua_oracle::{build_engine, CliConfig, OracleError};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match cli.load_oracle_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(config.logging.verbose);
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }

    tracing::info!("Starting meihua oracle");
    if config.logging.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        exit_with(&e);
    }

    let engine = match build_engine(&config) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(
                "❌ Engine setup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            exit_with(&e);
        }
    };

    if let Some(message) = cli.message_text() {
        println!("{}", engine.respond(&message).await);
        return Ok(());
    }

    // 沒有指定訊息時，逐行讀取標準輸入，每行當作一則聊天訊息
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        tracing::debug!("Received message: {}", line);
        println!("{}\n", engine.respond(&line).await);
    }

    Ok(())
}

fn exit_with(e: &OracleError) -> ! {
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
