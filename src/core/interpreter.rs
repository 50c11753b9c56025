//! AI 解卦：呼叫外部生成式文字服務，失敗時線性退避重試，
//! 次數用盡後改用本地範本。

use crate::domain::model::{FormattedReading, InterpretationOutcome, MovingLine};
use crate::domain::ports::{Backoff, InterpretationService};
use std::time::Duration;

pub const DEGRADED_NOTICE: &str = "⚠️ AI 解讀服務暫時無法使用，以上為本地範本解讀，僅供參考。";

pub const SYSTEM_PROMPT: &str = "你是一位精通梅花易數的資深易學大師，擁有數十年的占卜經驗。

你的角色和風格：
- 說話溫和、睿智，帶有古典韻味但不失親切
- 解卦時條理分明，深入淺出
- 給予正面、建設性的指引，避免過度負面的預測

解卦時請依照以下結構回答：

1.【卦象總論】（2-3句話概括整體卦象的意涵）

2.【本卦解析】解釋本卦的核心意義

3.【動爻啟示】動爻位置代表的變化重點

4.【變卦展望】事態發展的最終走向

5.【具體建議】根據使用者的問題給出具體、實用的建議

6.【吉凶判斷】簡明扼要的吉凶評估

請用繁體中文回答，語氣溫暖親切但專業。回答約300-400字。
";

/// 啟動時依金鑰是否存在決定一次，之後不再檢查
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMode {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// 第 `attempt_number` 次（從 1 起算）失敗後的等待時間
    pub fn delay_after(&self, attempt_number: u32) -> Duration {
        self.backoff_base
            .checked_mul(attempt_number)
            .unwrap_or(Duration::MAX)
    }

    /// 所有嘗試都失敗時累計的等待時間，最後一次失敗後不再等待
    pub fn worst_case_delay(&self) -> Duration {
        (1..self.max_attempts)
            .map(|n| self.delay_after(n))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

#[derive(Debug)]
enum RetrieverState {
    Attempting { attempt: u32 },
    Succeeded(String),
    Degraded,
}

pub struct InterpretationRetriever<S: InterpretationService, B: Backoff> {
    service: S,
    backoff: B,
    mode: ServiceMode,
    policy: RetryPolicy,
}

impl<S: InterpretationService, B: Backoff> InterpretationRetriever<S, B> {
    pub fn new(service: S, backoff: B, mode: ServiceMode, policy: RetryPolicy) -> Self {
        Self {
            service,
            backoff,
            mode,
            policy,
        }
    }

    pub fn mode(&self) -> ServiceMode {
        self.mode
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// 一定回傳一段解讀文字，不會失敗
    pub async fn interpret(&self, reading: &FormattedReading, question: &str) -> InterpretationOutcome {
        if self.mode == ServiceMode::Disabled {
            tracing::debug!("Interpretation service disabled, using local template");
            return InterpretationOutcome::Fallback(fallback_interpretation(reading, question));
        }

        let prompt = build_prompt(reading, question);
        let mut state = RetrieverState::Attempting { attempt: 0 };

        loop {
            state = match state {
                RetrieverState::Attempting { attempt } if attempt >= self.policy.max_attempts => {
                    RetrieverState::Degraded
                }
                RetrieverState::Attempting { attempt } => {
                    let attempt_number = attempt + 1;
                    match self.service.generate(&prompt).await {
                        Ok(text) if !text.trim().is_empty() => RetrieverState::Succeeded(text),
                        Ok(_) => {
                            tracing::warn!(
                                "🔄 Interpretation attempt {}/{} returned empty text",
                                attempt_number,
                                self.policy.max_attempts
                            );
                            self.pause(attempt_number).await;
                            RetrieverState::Attempting {
                                attempt: attempt_number,
                            }
                        }
                        Err(e) => {
                            tracing::warn!(
                                "🔄 Interpretation attempt {}/{} failed: {}",
                                attempt_number,
                                self.policy.max_attempts,
                                e
                            );
                            self.pause(attempt_number).await;
                            RetrieverState::Attempting {
                                attempt: attempt_number,
                            }
                        }
                    }
                }
                RetrieverState::Succeeded(text) => {
                    tracing::debug!("Interpretation received ({} chars)", text.chars().count());
                    return InterpretationOutcome::Service(text);
                }
                RetrieverState::Degraded => {
                    tracing::warn!(
                        "⚠️ Interpretation service exhausted {} attempts, falling back to local template",
                        self.policy.max_attempts
                    );
                    return InterpretationOutcome::Fallback(fallback_interpretation(
                        reading, question,
                    ));
                }
            };
        }
    }

    async fn pause(&self, attempt_number: u32) {
        if attempt_number < self.policy.max_attempts {
            self.backoff.wait(self.policy.delay_after(attempt_number)).await;
        }
    }
}

pub fn build_prompt(reading: &FormattedReading, question: &str) -> String {
    format!(
        "{SYSTEM_PROMPT}\n使用者的問題：{question}\n\n占卜結果：\n- 本卦：{}\n- 變卦：{}\n- 動爻：第{}爻\n\n請根據以上卦象，為使用者的問題提供詳細的解讀和建議。\n",
        reading.primary_name, reading.changed_name, reading.moving_line
    )
}

fn moving_line_scope(line: MovingLine) -> &'static str {
    if line.in_lower() {
        "內卦（下卦），變化起於自身與內在"
    } else {
        "外卦（上卦），變化來自外在環境與他人"
    }
}

/// 本地範本解讀，固定結構，只填入卦名、動爻與問題，並附上降級說明
pub fn fallback_interpretation(reading: &FormattedReading, question: &str) -> String {
    let primary = reading.primary_name;
    let changed = reading.changed_name;
    let line = reading.moving_line;
    format!(
        "【卦象總論】\n本卦為「{primary}」，第 {line} 爻發動，變為「{changed}」。\
         由「{primary}」走向「{changed}」，顯示事情正處在轉變的關口。\n\n\
         【本卦解析】\n「{primary}」描繪您目前所處的情勢，是整件事的起點與根基。\n\n\
         【動爻啟示】\n動爻在第 {line} 爻，位於{}。\n\n\
         【變卦展望】\n事態將朝「{changed}」的方向發展，可作為後續走向的參考。\n\n\
         【具體建議】\n關於「{question}」，建議先穩住眼前的基礎，再順著變化調整步伐。\n\n\
         {DEGRADED_NOTICE}",
        moving_line_scope(line)
    )
}
