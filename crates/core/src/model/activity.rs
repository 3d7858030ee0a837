use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One step of the fixed writing curriculum.
///
/// Serializes to the snake_case identifier the writing service expects in
/// the `activityType` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    AddThesisStatement,
    AddMainIdea,
    AddDetails,
    AddConcludingStatement,
    WriteCompleteTransitionOutline,
    DraftCompositionFromTransitionOutline,
}

impl ActivityKind {
    /// The order the student walks through the activities.
    pub const SEQUENCE: [ActivityKind; 6] = [
        ActivityKind::AddThesisStatement,
        ActivityKind::AddMainIdea,
        ActivityKind::AddDetails,
        ActivityKind::AddConcludingStatement,
        ActivityKind::WriteCompleteTransitionOutline,
        ActivityKind::DraftCompositionFromTransitionOutline,
    ];

    /// Wire identifier sent to the writing service.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::AddThesisStatement => "add_thesis_statement",
            ActivityKind::AddMainIdea => "add_main_idea",
            ActivityKind::AddDetails => "add_details",
            ActivityKind::AddConcludingStatement => "add_concluding_statement",
            ActivityKind::WriteCompleteTransitionOutline => "write_complete_transition_outline",
            ActivityKind::DraftCompositionFromTransitionOutline => {
                "draft_composition_from_transition_outline"
            }
        }
    }

    /// Short label for headers and progress text.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            ActivityKind::AddThesisStatement => "Add a Thesis Statement",
            ActivityKind::AddMainIdea => "Add a Main Idea",
            ActivityKind::AddDetails => "Add Details",
            ActivityKind::AddConcludingStatement => "Add a Concluding Statement",
            ActivityKind::WriteCompleteTransitionOutline => "Write a Complete Transition Outline",
            ActivityKind::DraftCompositionFromTransitionOutline => {
                "Draft a Composition from the Transition Outline"
            }
        }
    }

    /// Extra requirement shown under the prompt, for the activities that
    /// have one.
    #[must_use]
    pub fn requirement_note(&self) -> Option<&'static str> {
        match self {
            ActivityKind::AddMainIdea => Some("At least four lines"),
            ActivityKind::AddDetails => Some("At least eight lines"),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = ParseActivityError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ActivityKind::SEQUENCE
            .into_iter()
            .find(|kind| kind.as_str() == raw)
            .ok_or_else(|| ParseActivityError {
                raw: raw.to_string(),
            })
    }
}

/// Error returned when an activity identifier is not one of the six known
/// activities.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown activity identifier: {raw}")]
pub struct ParseActivityError {
    raw: String,
}

/// Position in the activity sequence.
///
/// Movement clamps at both ends, so the cursor always points at a valid
/// activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActivityCursor(usize);

impl ActivityCursor {
    /// Cursor at the first activity.
    #[must_use]
    pub fn new() -> Self {
        Self(0)
    }

    /// Zero-based index into the sequence.
    #[must_use]
    pub fn position(&self) -> usize {
        self.0
    }

    /// The activity this cursor points at.
    #[must_use]
    pub fn current(&self) -> ActivityKind {
        ActivityKind::SEQUENCE[self.0]
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.0 + 1 == ActivityKind::SEQUENCE.len()
    }

    /// The next position, unchanged when already at the last activity.
    #[must_use]
    pub fn advanced(&self) -> Self {
        if self.is_last() { *self } else { Self(self.0 + 1) }
    }

    /// The previous position, unchanged when already at the first activity.
    #[must_use]
    pub fn retreated(&self) -> Self {
        if self.is_first() { *self } else { Self(self.0 - 1) }
    }
}
