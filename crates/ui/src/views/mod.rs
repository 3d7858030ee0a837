mod exercise;
mod state;

pub use exercise::{ExerciseIntent, ExerciseView};
pub use state::{view_state_from_resource, ViewError, ViewState};

#[cfg(test)]
mod test_harness;
