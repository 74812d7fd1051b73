use std::sync::Arc;
use std::time::Duration;

use crate::analysis::dictionary::SkillDictionary;
use crate::analysis::extractor::SkillExtractor;
use crate::analysis::suggestions::SuggestionGenerator;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub dictionary: Arc<SkillDictionary>,
    /// Compiled once from `dictionary` at startup.
    pub extractor: Arc<SkillExtractor>,
    /// Generative suggestion backend. `None` when no API key is configured.
    pub suggester: Option<Arc<dyn SuggestionGenerator>>,
}

impl AppState {
    pub fn new(
        config: Config,
        dictionary: SkillDictionary,
        suggester: Option<Arc<dyn SuggestionGenerator>>,
    ) -> Self {
        let extractor = Arc::new(SkillExtractor::new(&dictionary));
        Self {
            config,
            dictionary: Arc::new(dictionary),
            extractor,
            suggester,
        }
    }

    pub fn suggestion_timeout(&self) -> Duration {
        Duration::from_secs(self.config.llm_timeout_secs)
    }
}
