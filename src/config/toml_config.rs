use crate::core::interpreter::{RetryPolicy, ServiceMode};
use crate::utils::error::{OracleError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_backoff_base_seconds")]
    pub backoff_base_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub json: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_base_seconds() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_seconds: default_backoff_base_seconds(),
        }
    }
}

impl OracleConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OracleError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OracleError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OracleError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 從環境變數建立配置（雲端部署用）
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 以任意查詢函式讀取設定值，未設定的項目使用預設值
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("GEMINI_ENDPOINT") {
            config.service.endpoint = endpoint;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            config.service.model = model;
        }
        config.service.api_key = lookup("GEMINI_API_KEY");

        if let Some(raw) = lookup("ORACLE_MAX_ATTEMPTS") {
            config.retry.max_attempts = parse_number("ORACLE_MAX_ATTEMPTS", &raw)?;
        }
        if let Some(raw) = lookup("ORACLE_BACKOFF_SECONDS") {
            config.retry.backoff_base_seconds = parse_number("ORACLE_BACKOFF_SECONDS", &raw)?;
        }

        Ok(config)
    }

    /// 金鑰缺少、空白或仍是未替換的 `${...}` 時停用外部服務
    pub fn service_mode(&self) -> ServiceMode {
        match self.service.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && !key.starts_with("${") => ServiceMode::Enabled,
            _ => ServiceMode::Disabled,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts,
            backoff_base: Duration::from_secs(self.retry.backoff_base_seconds),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("service.endpoint", &self.service.endpoint)?;
        crate::utils::validation::validate_non_empty_string("service.model", &self.service.model)?;
        crate::utils::validation::validate_positive_number(
            "service.timeout_seconds",
            self.service.timeout_seconds,
            1,
        )?;
        crate::utils::validation::validate_range(
            "retry.max_attempts",
            self.retry.max_attempts,
            1,
            10,
        )?;
        crate::utils::validation::validate_range(
            "retry.backoff_base_seconds",
            self.retry.backoff_base_seconds,
            0,
            300,
        )?;
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| OracleError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: "Value must be a non-negative integer".to_string(),
        })
}

impl Validate for OracleConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[service]
endpoint = "https://example.com"
model = "gemini-1.5-pro"
api_key = "abc123"
timeout_seconds = 15

[retry]
max_attempts = 5
backoff_base_seconds = 2

[logging]
verbose = true
"#;

        let config = OracleConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.service.endpoint, "https://example.com");
        assert_eq!(config.service.model, "gemini-1.5-pro");
        assert_eq!(config.service_mode(), ServiceMode::Enabled);
        assert_eq!(config.retry_policy().max_attempts, 5);
        assert_eq!(config.retry_policy().backoff_base, Duration::from_secs(2));
        assert!(config.logging.verbose);
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = OracleConfig::from_toml_str("").unwrap();
        assert_eq!(config.service.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.service.model, DEFAULT_MODEL);
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.service_mode(), ServiceMode::Disabled);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MEIHUA_TEST_API_KEY", "from-env");

        let toml_content = r#"
[service]
api_key = "${MEIHUA_TEST_API_KEY}"
"#;

        let config = OracleConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.service.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.service_mode(), ServiceMode::Enabled);

        std::env::remove_var("MEIHUA_TEST_API_KEY");
    }

    #[test]
    fn test_unresolved_placeholder_disables_service() {
        let toml_content = r#"
[service]
api_key = "${MEIHUA_TEST_UNSET_VARIABLE}"
"#;

        let config = OracleConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.service_mode(), ServiceMode::Disabled);
    }

    #[test]
    fn test_blank_key_disables_service() {
        let mut config = OracleConfig::default();
        config.service.api_key = Some("   ".to_string());
        assert_eq!(config.service_mode(), ServiceMode::Disabled);
    }

    #[test]
    fn test_config_validation() {
        let config = OracleConfig::from_toml_str(
            r#"
[service]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = OracleConfig::from_toml_str(
            r#"
[retry]
max_attempts = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MODEL", "gemini-1.5-flash"),
            ("ORACLE_MAX_ATTEMPTS", "4"),
            ("ORACLE_BACKOFF_SECONDS", "0"),
        ]);

        let config = OracleConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.service.model, "gemini-1.5-flash");
        assert_eq!(config.service.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.service_mode(), ServiceMode::Enabled);
        assert_eq!(config.retry.max_attempts, 4);
        assert_eq!(config.retry_policy().backoff_base, Duration::ZERO);
    }

    #[test]
    fn test_from_lookup_rejects_bad_number() {
        let err = OracleConfig::from_lookup(|k| {
            (k == "ORACLE_MAX_ATTEMPTS").then(|| "three".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, OracleError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[service]
model = "file-model"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = OracleConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.service.model, "file-model");
    }
}
