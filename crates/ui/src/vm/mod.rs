mod exercise_vm;

pub use exercise_vm::{
    EvaluationVm, QuestionVm, ScoreRowVm, map_evaluation, map_question, sanitize_html,
    view_error_from,
};
