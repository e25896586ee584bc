use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub products_path: PathBuf,
    /// API key for the reply/translation model. `None` forces mock replies.
    pub reply_api_key: Option<String>,
    pub reply_base_url: String,
    pub reply_model: String,
    pub reply_timeout_secs: u64,
    pub reply_mock: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("products_path", &self.products_path)
            .field(
                "reply_api_key",
                &self.reply_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("reply_base_url", &self.reply_base_url)
            .field("reply_model", &self.reply_model)
            .field("reply_timeout_secs", &self.reply_timeout_secs)
            .field("reply_mock", &self.reply_mock)
            .finish()
    }
}
