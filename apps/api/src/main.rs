mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::dictionary::SkillDictionary;
use crate::analysis::suggestions::{LlmSuggester, SuggestionGenerator};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Load the skill dictionary
    let dictionary = match &config.skills_path {
        Some(path) => SkillDictionary::from_path(path)
            .with_context(|| format!("failed to load skill dictionary from {}", path.display()))?,
        None => SkillDictionary::builtin().context("embedded skill dictionary is invalid")?,
    };
    if dictionary.is_empty() {
        anyhow::bail!("skill dictionary has no entries; every analysis would score zero");
    }

    // Generative suggestions only when a key is configured
    let suggester: Option<Arc<dyn SuggestionGenerator>> = match &config.llm_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), Duration::from_secs(config.llm_timeout_secs));
            info!("LLM suggestions enabled (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmSuggester(llm)))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; using rule-based suggestions only");
            None
        }
    };

    let state = AppState::new(config.clone(), dictionary, suggester);
    info!(
        "Skill dictionary loaded: {} skills compiled",
        state.extractor.skill_count()
    );
    let degraded = state.extractor.degraded_fragments().len();
    if degraded > 0 {
        warn!("{degraded} alias fragments degraded to substring matching");
    }

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
