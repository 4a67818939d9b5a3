pub mod message;
pub mod question;
pub mod role;

pub use message::{BulkMessage, MessageKind};
pub use question::{BulkParseItem, Question, QuestionDraft, QuestionFormat, QuestionOption};
pub use role::TargetRole;
