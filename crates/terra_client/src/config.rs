use crate::TerraError;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub dev_id: String,
    pub api_key: SecretString,
    pub signing_secret: Option<SecretString>,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, TerraError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, TerraError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let dev_id =
            get("TERRA_DEV_ID").ok_or_else(|| TerraError::Config("TERRA_DEV_ID missing".into()))?;
        let api_key = get("TERRA_API_KEY")
            .ok_or_else(|| TerraError::Config("TERRA_API_KEY missing".into()))?;
        let signing_secret = get("TERRA_SIGNING_SECRET").map(|s| SecretString::new(s.into()));
        let base_url = get("TERRA_BASE_URL").unwrap_or_else(|| "https://api.tryterra.co".into());
        Ok(Self {
            dev_id,
            api_key: SecretString::new(api_key.into()),
            signing_secret,
            base_url,
        })
    }
}
