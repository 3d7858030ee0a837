use std::fmt;

use serde::Deserialize;

/// Scored feedback for one submitted answer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Evaluation {
    pub critique: String,
    pub structure: Score,
    pub coherence: Score,
    pub unity: Score,
    pub well_constructed_sentences: Score,
}

/// A single score dimension.
///
/// The service returns numbers today, but the contract also allows textual
/// labels, so both decode.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Points(f64),
    Label(String),
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Points(points) => {
                if points.fract() == 0.0 {
                    write!(f, "{points:.0}")
                } else {
                    write!(f, "{points}")
                }
            }
            Score::Label(label) => f.write_str(label),
        }
    }
}
