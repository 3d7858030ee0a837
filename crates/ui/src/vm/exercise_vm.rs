use std::collections::{HashMap, HashSet};

use serde_json::Value;

use services::ExerciseServiceError;
use writing_core::model::{ActivityKind, Evaluation, Question, Score};

use crate::views::ViewError;

/// Display-ready question, with the opaque payload the evaluate call must
/// echo back.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionVm {
    pub title: String,
    pub prompt_html: String,
    pub requirement: Option<&'static str>,
    /// The activity this question was generated for.
    pub activity: ActivityKind,
    pub activity_payload: Value,
}

#[must_use]
pub fn map_question(activity: ActivityKind, question: &Question) -> QuestionVm {
    QuestionVm {
        title: question.title().to_string(),
        prompt_html: sanitize_html(question.content_html()),
        requirement: activity.requirement_note(),
        activity,
        activity_payload: question.activity().clone(),
    }
}

/// Display-ready evaluation panel.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationVm {
    pub critique: String,
    pub scores: Vec<ScoreRowVm>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRowVm {
    pub label: &'static str,
    pub value: String,
}

#[must_use]
pub fn map_evaluation(evaluation: &Evaluation) -> EvaluationVm {
    let row = |label: &'static str, score: &Score| ScoreRowVm {
        label,
        value: score.to_string(),
    };
    EvaluationVm {
        critique: evaluation.critique.clone(),
        scores: vec![
            row("Structure", &evaluation.structure),
            row("Coherence", &evaluation.coherence),
            row("Unity", &evaluation.unity),
            row("Well-constructed sentences", &evaluation.well_constructed_sentences),
        ],
    }
}

/// Collapse a gateway failure into the single banner message.
///
/// Service-reported errors surface their own text. Everything else gets the
/// generic fallback so transport details never reach the student.
#[must_use]
pub fn view_error_from(error: &ExerciseServiceError) -> ViewError {
    match error {
        ExerciseServiceError::Service(message) => ViewError::Service(message.clone()),
        _ => ViewError::Unavailable,
    }
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "u", "code", "pre", "blockquote",
        "ul", "ol", "li", "h3", "h4", "a",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}
