use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::models::FindBusinessResponse;
use crate::services::{GenerationError, SearchError, SearchProvider, TextGenerator};
use crate::utils::{format_snippet, generate_business_prompt};

#[derive(Debug, Error)]
pub enum FinderError {
    #[error("Search failed: {0}")]
    UpstreamSearch(#[from] SearchError),

    #[error("Generation failed: {0}")]
    UpstreamGeneration(#[from] GenerationError),
}

/// Search, then summarize the hits with the text generator.
#[derive(Clone)]
pub struct FinderService {
    search: Arc<dyn SearchProvider>,
    generator: Arc<dyn TextGenerator>,
}

impl FinderService {
    pub fn new(search: Arc<dyn SearchProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { search, generator }
    }

    pub async fn find_local_business(
        &self,
        query: &str,
    ) -> Result<FindBusinessResponse, FinderError> {
        let results = self.search.search(query).await.map_err(|e| {
            error!("Search request failed: {}", e);
            e
        })?;

        let snippets: Vec<String> = results.iter().map(format_snippet).collect();
        if snippets.is_empty() {
            info!("Search returned no results, skipping generation");
            return Ok(FindBusinessResponse::no_results());
        }

        let prompt = generate_business_prompt(query, &snippets);
        let summary = self.generator.generate(&prompt).await.map_err(|e| {
            error!("Generation request failed: {}", e);
            e
        })?;

        info!(
            "Summarized {} search results into {} chars",
            snippets.len(),
            summary.len()
        );
        Ok(FindBusinessResponse::found(summary))
    }
}
