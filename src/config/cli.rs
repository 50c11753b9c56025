use crate::config::OracleConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "meihua")]
#[command(about = "梅花易數占卜：數字、時間或隨機起卦，並以 AI 解卦")]
pub struct CliConfig {
    /// 要處理的訊息，例如「數字占卜 168 888」；省略時逐行讀取標準輸入
    #[arg(trailing_var_arg = true)]
    pub message: Vec<String>,

    #[arg(long, short, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_log: bool,

    #[arg(long, help = "Never call the interpretation service")]
    pub offline: bool,
}

impl CliConfig {
    pub fn message_text(&self) -> Option<String> {
        let text = self.message.join(" ");
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// 有指定檔案時讀檔，否則讀環境變數；命令列旗標優先
    pub fn load_oracle_config(&self) -> Result<OracleConfig> {
        let mut config = match &self.config {
            Some(path) => OracleConfig::from_file(path)?,
            None => OracleConfig::from_env()?,
        };

        if self.offline {
            config.service.api_key = None;
        }
        config.logging.verbose |= self.verbose;
        config.logging.json |= self.json_log;

        Ok(config)
    }
}
