pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use anyhow::Context;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use config::Config;
use services::{
    AuthService, FinderService, GeminiGenerator, McpService, SearchProvider,
    TavilySearchProvider, TextGenerator,
};

#[derive(Clone)]
pub struct AppState {
    pub mcp_service: McpService,
    pub config: Config,
}

impl AppState {
    /// Wires the real Tavily and Gemini clients from `config`.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let search_client = Client::builder()
            .timeout(Duration::from_secs(config.search.timeout_secs))
            .build()
            .context("Failed to build search HTTP client")?;
        let generation_client = Client::builder()
            .timeout(Duration::from_secs(config.generation.timeout_secs))
            .build()
            .context("Failed to build generation HTTP client")?;

        let search: Arc<dyn SearchProvider> = Arc::new(TavilySearchProvider::new(
            search_client,
            &config.search,
            config.secrets.tavily_api_key.clone(),
        ));
        let generator: Arc<dyn TextGenerator> = Arc::new(GeminiGenerator::new(
            generation_client,
            &config.generation,
            config.secrets.gemini_api_key.clone(),
        ));

        Ok(Self::with_services(config, search, generator))
    }

    pub fn with_services(
        config: Config,
        search: Arc<dyn SearchProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let auth = AuthService::new(config.secrets.bearer_token.clone());
        let finder = FinderService::new(search, generator);

        Self {
            mcp_service: McpService::new(auth, finder),
            config,
        }
    }
}
