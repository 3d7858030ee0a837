mod activity;
mod evaluation;
mod question;
mod student;

pub use activity::{ActivityCursor, ActivityKind, ParseActivityError};
pub use evaluation::{Evaluation, Score};
pub use question::Question;
pub use student::{CourseModule, KnowledgeTree, ModuleItem, StudentProfile};
