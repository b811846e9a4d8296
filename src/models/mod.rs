pub mod loaders;
pub mod question_count;
pub mod quiz;

pub use loaders::{load_source_text, SourceKind};
pub use question_count::QuestionCount;
pub use quiz::{
    option_letter, option_text,
    MultipleChoiceQuestion, OptionLetter, QuestionQuota, Quiz, TrueFalse, TrueFalseQuestion,
};
