use secrecy::SecretString;

/// Configuration for the text-generation collaborator. The API key is
/// optional: without one the analysis endpoints serve deterministic
/// fallbacks only.
#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub terra: Option<terra_client::config::Config>,
    pub address: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never mutate the process environment. Missing
    /// collaborator credentials degrade features instead of failing startup.
    pub fn from_env_with<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let llm = LlmConfig {
            api_key: get("OPENAI_API_KEY").map(|s| SecretString::new(s.into())),
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| "https://api.openai.com".into()),
            model: get("OPENAI_MODEL").unwrap_or_else(|| "gpt-4".into()),
        };
        let terra = terra_client::config::Config::from_env_with(&mut get).ok();
        let address = get("ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".into());
        Self {
            llm,
            terra,
            address,
        }
    }
}
