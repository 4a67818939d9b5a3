pub mod question_service;
pub mod retry_writer;

pub use question_service::QuestionService;
pub use retry_writer::RetryWriter;
