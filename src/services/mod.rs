pub mod export_writer;
pub mod grading;
pub mod llm_service;
pub mod quiz_generator;

pub use export_writer::QuizExporter;
pub use grading::{grade, Answer, AnswerSheet, QuestionKey, Score};
pub use llm_service::LlmService;
pub use quiz_generator::{GenerateError, QuizGenerator};
