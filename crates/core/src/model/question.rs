use serde::Deserialize;
use serde_json::Value;

/// Server-generated prompt for one activity.
///
/// Deserializing doubles as schema validation: a response missing the
/// required fields is rejected before it reaches the view.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Question {
    item_body: ItemBody,
    activity: Value,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
struct ItemBody {
    stimulus_title: String,
    stimulus_content: StimulusContent,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
struct StimulusContent {
    content: String,
}

impl Question {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.item_body.stimulus_title
    }

    /// Prompt HTML exactly as the service sent it. Sanitize before rendering.
    #[must_use]
    pub fn content_html(&self) -> &str {
        &self.item_body.stimulus_content.content
    }

    /// Opaque activity payload the service expects back, unmodified, when
    /// the answer is submitted for evaluation.
    #[must_use]
    pub fn activity(&self) -> &Value {
        &self.activity
    }
}
