use std::sync::Arc;

use crate::llm::CompletionClient;
use secrecy::SecretString;
use terra_client::TerraClient;
use terra_client::webhook::Deduper;

/// Shared handler state. Both collaborators are optional: a missing
/// completion client routes analysis to the deterministic fallbacks, a
/// missing Terra client disables the pull endpoint.
#[derive(Clone)]
pub struct AppState {
    pub llm: Option<Arc<dyn CompletionClient>>,
    pub terra: Option<Arc<dyn TerraClient>>,
    pub signing_secret: Option<SecretString>,
    pub dedupe: Arc<Deduper>,
}

impl AppState {
    pub fn new(
        llm: Option<Arc<dyn CompletionClient>>,
        terra: Option<Arc<dyn TerraClient>>,
        signing_secret: Option<SecretString>,
    ) -> Self {
        Self {
            llm,
            terra,
            signing_secret,
            dedupe: Arc::new(Deduper::new()),
        }
    }

    /// Fallback-only state, used by tests and by deployments without any
    /// collaborator credentials.
    pub fn detached() -> Self {
        Self::new(None, None, None)
    }
}
