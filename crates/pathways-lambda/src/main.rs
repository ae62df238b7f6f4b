use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pathways_lambda::config::LambdaConfig;
use pathways_lambda::router;
use pathways_lambda::state::AppState;
use pathways_recommend::KnowledgeBase;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = LambdaConfig::from_env()?;

    let kb = match &config.knowledge_base {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading knowledge base from file");
            KnowledgeBase::load(path, config.strictness)?
        }
        None => {
            let kb = KnowledgeBase::embedded();
            kb.validate(config.strictness)?;
            kb.clone()
        }
    };

    let app = router(AppState {
        kb: Arc::new(kb),
        defaults: config.defaults,
    });

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
