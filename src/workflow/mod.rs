pub mod quiz_flow;
pub mod quiz_request;

pub use quiz_flow::QuizFlow;
pub use quiz_request::QuizRequest;
