//! Application state management

use std::sync::Arc;

use domain_products::ImportService;
use domain_search::SearchOrchestrator;
use domain_vector::QdrantRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub repository: Arc<QdrantRepository>,
    pub orchestrator: Arc<SearchOrchestrator<QdrantRepository>>,
    pub import: Arc<ImportService<QdrantRepository>>,
}
