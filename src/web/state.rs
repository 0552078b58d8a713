use crate::config::AppConfig;
use crate::db::QueryExecutor;
use crate::llm::TranslatorManager;

/// Shared application state for the web server. Both components are
/// stateless single-shot request/response; nothing here mutates after
/// startup.
pub struct AppState {
    pub config: AppConfig,
    pub translator: TranslatorManager,
    pub executor: QueryExecutor,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: AppConfig, translator: TranslatorManager, executor: QueryExecutor) -> Self {
        Self {
            config,
            translator,
            executor,
            startup_time: chrono::Utc::now(),
        }
    }
}
