use std::sync::Arc;

use services::ExerciseApi;
use writing_core::model::StudentProfile;

pub trait UiApp: Send + Sync {
    fn exercise_api(&self) -> Arc<dyn ExerciseApi>;
    fn student(&self) -> Arc<StudentProfile>;
}

#[derive(Clone)]
pub struct AppContext {
    exercise_api: Arc<dyn ExerciseApi>,
    student: Arc<StudentProfile>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            exercise_api: app.exercise_api(),
            student: app.student(),
        }
    }

    #[must_use]
    pub fn exercise_api(&self) -> Arc<dyn ExerciseApi> {
        Arc::clone(&self.exercise_api)
    }

    #[must_use]
    pub fn student(&self) -> Arc<StudentProfile> {
        Arc::clone(&self.student)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
