use crate::service::SolutionService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: SolutionService,
}
