use crate::core::formatter::{format_echo, format_result};
use crate::core::interpreter::InterpretationRetriever;
use crate::core::router::{route, Route, HELP_MESSAGE, PROMPT_MESSAGE, WELCOME_BANNER};
use crate::core::strategy;
use crate::domain::model::{Command, DerivationResult, DivinationRequest, InterpretationOutcome};
use crate::domain::ports::{Backoff, Clock, InterpretationService, SeedSource};
use crate::utils::error::UserInputError;

/// 收到一則訊息，回覆一段文字。每個請求各自獨立，不保留狀態。
pub struct OracleEngine<S: InterpretationService, B: Backoff> {
    retriever: InterpretationRetriever<S, B>,
    clock: Box<dyn Clock>,
    seeds: Box<dyn SeedSource>,
}

impl<S: InterpretationService, B: Backoff> OracleEngine<S, B> {
    pub fn new(
        retriever: InterpretationRetriever<S, B>,
        clock: Box<dyn Clock>,
        seeds: Box<dyn SeedSource>,
    ) -> Self {
        Self {
            retriever,
            clock,
            seeds,
        }
    }

    pub fn retriever(&self) -> &InterpretationRetriever<S, B> {
        &self.retriever
    }

    /// 處理聊天訊息，任何情況都回傳可以直接送出的文字
    pub async fn respond(&self, text: &str) -> String {
        match route(text) {
            Route::Help => HELP_MESSAGE.to_string(),
            Route::Prompt => PROMPT_MESSAGE.to_string(),
            Route::Welcome => format!("{}{}", WELCOME_BANNER, HELP_MESSAGE),
            Route::InvalidInput(e) => {
                tracing::debug!("Rejected number command: {}", e);
                e.corrective_message()
            }
            Route::Divine(request) => self.divine(&request).await,
        }
    }

    pub fn derive_for(
        &self,
        request: &DivinationRequest,
    ) -> std::result::Result<DerivationResult, UserInputError> {
        match request.command {
            Command::NumberSeed => request
                .arguments
                .map(|(first, second)| strategy::by_numbers(first, second))
                .ok_or(UserInputError::MissingArguments { found: 0 }),
            Command::TimeSeed => Ok(strategy::by_time(self.clock.now())),
            Command::RandomSeed => Ok(strategy::by_random(self.seeds.as_ref())),
        }
    }

    /// 起卦、排盤、解卦，組成完整回覆
    pub async fn divine(&self, request: &DivinationRequest) -> String {
        let result = match self.derive_for(request) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!("Divination request rejected: {}", e);
                return e.corrective_message();
            }
        };

        tracing::info!(
            "🔮 {:?} divination: upper={} lower={} moving_line={}",
            request.command,
            result.upper,
            result.lower,
            result.moving_line
        );

        let reading = format_result(&result);
        let outcome = self.retriever.interpret(&reading, &request.question).await;

        let heading = match &outcome {
            InterpretationOutcome::Service(_) => "🤖 【AI 解卦】",
            InterpretationOutcome::Fallback(_) => "📜 【卦象解讀】",
        };

        format!(
            "{}\n❓ 所問之事：{}\n{}\n{}\n\n{}",
            format_echo(&result.echo),
            request.question,
            reading.text,
            heading,
            outcome.text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, FixedSeeds, ImmediateBackoff};
    use crate::core::interpreter::{RetryPolicy, ServiceMode, DEGRADED_NOTICE};
    use crate::utils::error::{OracleError, Result};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct CannedService {
        reply: Option<String>,
        calls: AtomicU32,
    }

    #[async_trait]
    impl InterpretationService for CannedService {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().ok_or(OracleError::EmptyResponseError)
        }
    }

    fn engine(
        reply: Option<&str>,
        mode: ServiceMode,
    ) -> (OracleEngine<Arc<CannedService>, ImmediateBackoff>, Arc<CannedService>) {
        let service = Arc::new(CannedService {
            reply: reply.map(str::to_string),
            calls: AtomicU32::new(0),
        });
        let retriever = InterpretationRetriever::new(
            service.clone(),
            ImmediateBackoff,
            mode,
            RetryPolicy::default(),
        );
        let moment = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        let engine = OracleEngine::new(
            retriever,
            Box::new(FixedClock(moment)),
            Box::new(FixedSeeds(1, 1)),
        );
        (engine, service)
    }

    #[tokio::test]
    async fn test_number_divination_with_service() {
        let (engine, service) = engine(Some("大吉大利"), ServiceMode::Enabled);

        let reply = engine.respond("數字占卜 168 888").await;

        assert!(reply.starts_with("🔢 起卦數字：168、888"));
        assert!(reply.contains("📌 本卦：坤為地"));
        assert!(reply.contains("📌 動爻：第 6 爻"));
        assert!(reply.contains("📌 變卦：雷地豫"));
        assert!(reply.contains("🤖 【AI 解卦】"));
        assert!(reply.ends_with("大吉大利"));
        assert!(!reply.contains(DEGRADED_NOTICE));
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_one_argument_never_derives() {
        let (engine, service) = engine(Some("x"), ServiceMode::Enabled);

        let reply = engine.respond("數字占卜 168").await;

        assert!(reply.contains("數字占卜格式錯誤"));
        assert!(!reply.contains("本卦"));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_number_request_without_arguments() {
        let (engine, _) = engine(None, ServiceMode::Disabled);
        let request = DivinationRequest {
            command: Command::NumberSeed,
            arguments: None,
            question: "q".to_string(),
        };

        assert_eq!(
            engine.derive_for(&request),
            Err(UserInputError::MissingArguments { found: 0 })
        );
        assert!(engine.divine(&request).await.contains("數字占卜格式錯誤"));
    }

    #[tokio::test]
    async fn test_time_divination_uses_injected_clock() {
        let (engine, _) = engine(None, ServiceMode::Disabled);

        let reply = engine.respond("時間占卜").await;

        assert!(reply.starts_with("🕐 起卦時間：2024年3月15日 14時"));
        assert!(reply.contains("❓ 所問之事：請為我解讀當下的運勢"));
        assert!(reply.contains("📜 【卦象解讀】"));
        assert!(reply.ends_with(DEGRADED_NOTICE));
    }

    #[tokio::test]
    async fn test_random_divination_echoes_seeds_and_degrades() {
        let (engine, service) = engine(None, ServiceMode::Enabled);

        let reply = engine.respond("占卜 我該換工作嗎？").await;

        assert!(reply.starts_with("🎲 隨機數字：1、1"));
        assert!(reply.contains("📌 本卦：乾為天"));
        assert!(reply.contains("天火同人"));
        assert!(reply.contains(DEGRADED_NOTICE));
        assert_eq!(service.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_help_and_welcome() {
        let (engine, _) = engine(None, ServiceMode::Disabled);
        assert_eq!(engine.respond("說明").await, HELP_MESSAGE);
        assert!(engine.respond("嗨").await.starts_with(WELCOME_BANNER));
        assert_eq!(engine.respond("卜卦").await, PROMPT_MESSAGE);
    }
}
