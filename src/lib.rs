pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{GeminiClient, LocalClock, ThreadRngSource, TokioBackoff};
pub use crate::config::OracleConfig;
pub use crate::core::derivation::derive;
pub use crate::core::engine::OracleEngine;
pub use crate::core::interpreter::{InterpretationRetriever, RetryPolicy, ServiceMode};
pub use crate::utils::error::{OracleError, Result, UserInputError};

/// 正式環境使用的引擎組合
pub type LiveEngine = OracleEngine<GeminiClient, TokioBackoff>;

/// 依配置組出引擎：Gemini 客戶端、Tokio 退避、本地時鐘與執行緒亂數。
/// 配置先經過驗證，不合法時回傳錯誤。
pub fn build_engine(config: &OracleConfig) -> Result<LiveEngine> {
    config.validate_config()?;

    let mode = config.service_mode();
    tracing::info!(
        "Interpretation service {:?} (model: {}, attempts: {})",
        mode,
        config.service.model,
        config.retry.max_attempts
    );

    let client = GeminiClient::from_config(&config.service)?;
    let retriever =
        InterpretationRetriever::new(client, TokioBackoff, mode, config.retry_policy());
    Ok(OracleEngine::new(
        retriever,
        Box::new(LocalClock),
        Box::new(ThreadRngSource),
    ))
}
