use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Interpretation service returned status {status}: {body}")]
    ServiceStatusError { status: u16, body: String },

    #[error("Interpretation service returned an empty payload")]
    EmptyResponseError,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    UserInput(#[from] UserInputError),
}

/// 使用者輸入格式錯誤，直接回覆修正說明，不重試也不當作系統錯誤
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserInputError {
    #[error("expected two numbers, got {found}")]
    MissingArguments { found: usize },

    #[error("'{token}' is not an integer")]
    NotAnInteger { token: String },
}

impl UserInputError {
    /// 給聊天使用者看的修正指示
    pub fn corrective_message(&self) -> String {
        let reason = match self {
            UserInputError::MissingArguments { found } => {
                format!("需要兩個數字，但只收到 {} 個。", found)
            }
            UserInputError::NotAnInteger { token } => format!("「{}」不是整數。", token),
        };
        format!(
            "⚠️ 數字占卜格式錯誤：{}\n\n請輸入：數字占卜 [數字1] [數字2]\n例如：數字占卜 168 888",
            reason
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Configuration,
    UserInput,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OracleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OracleError::ApiError(_) => ErrorCategory::Network,
            OracleError::ServiceStatusError { .. }
            | OracleError::EmptyResponseError
            | OracleError::SerializationError(_) => ErrorCategory::Service,
            OracleError::ConfigError { .. }
            | OracleError::ConfigValidationError { .. }
            | OracleError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            OracleError::UserInput(_) => ErrorCategory::UserInput,
            OracleError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::UserInput => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Service => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 可以重試的錯誤（外部解卦服務的暫時性失敗）
    pub fn is_transient(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Service
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            OracleError::UserInput(e) => e.corrective_message(),
            OracleError::ApiError(_) => "無法連線到 AI 解卦服務".to_string(),
            OracleError::ServiceStatusError { status, .. } => {
                format!("AI 解卦服務回應錯誤（HTTP {}）", status)
            }
            OracleError::EmptyResponseError => "AI 解卦服務沒有回傳內容".to_string(),
            OracleError::SerializationError(_) => "AI 解卦服務回傳格式無法解析".to_string(),
            OracleError::ConfigError { message } => format!("設定錯誤：{}", message),
            OracleError::ConfigValidationError { field, message } => {
                format!("設定 {} 有誤：{}", field, message)
            }
            OracleError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定 {} 的值不正確：{}", field, reason)
            }
            OracleError::IoError(e) => format!("檔案讀寫失敗：{}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::UserInput => "請依照使用說明重新輸入",
            ErrorCategory::Network => "請確認網路連線後再試一次",
            ErrorCategory::Service => "請稍後再試，或檢查 API 金鑰與模型名稱",
            ErrorCategory::Configuration => "請檢查設定檔或環境變數",
            ErrorCategory::System => "請確認檔案路徑與權限",
        }
    }
}

pub type Result<T> = std::result::Result<T, OracleError>;
