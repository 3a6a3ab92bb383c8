use std::sync::Arc;

use services::CoachService;

/// What the composition root (e.g. `crates/app`) provides to the UI.
pub trait UiApp: Send + Sync {
    fn coach(&self) -> Arc<CoachService>;
    /// Human-readable backend address, shown in the sidebar footer.
    fn backend_label(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    coach: Arc<CoachService>,
    backend_label: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            coach: app.coach(),
            backend_label: app.backend_label(),
        }
    }

    #[must_use]
    pub fn coach(&self) -> Arc<CoachService> {
        Arc::clone(&self.coach)
    }

    #[must_use]
    pub fn backend_label(&self) -> &str {
        &self.backend_label
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
