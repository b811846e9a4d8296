//! 出题请求
//!
//! 封装"用哪段材料、要多少题"这一信息，并在流水线运行前完成校验

use std::fmt::Display;

use crate::error::{AppError, AppResult};
use crate::models::QuestionCount;
use crate::utils::logging::truncate_text;

/// 出题请求
#[derive(Debug, Clone)]
pub struct QuizRequest {
    /// 材料原文，按原样交给分块
    pub text: String,

    /// 请求的题目总数
    pub count: QuestionCount,
}

impl QuizRequest {
    /// 创建并校验请求
    ///
    /// 材料为空（或只有空白）时返回 `InputEmpty`；
    /// 题目数量输入非法时返回 `InvalidQuestionCount`。
    /// 空白只用于判空，不会从材料中去掉（文件材料在读取时已去除）
    pub fn new(text: &str, count_input: &str, max_count: u32) -> AppResult<Self> {
        if text.trim().is_empty() {
            return Err(AppError::input_empty());
        }

        let count = QuestionCount::parse_with_limit(count_input, max_count)?;

        Ok(Self {
            text: text.to_string(),
            count,
        })
    }

    /// 材料字符数
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl Display for QuizRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[题目数 {} | 材料 {} 字符: {}]",
            self.count,
            self.char_count(),
            truncate_text(&self.text, 30)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    #[test]
    fn test_pasted_text_kept_verbatim() {
        let request = QuizRequest::new("  some text \n", "Max", 50).unwrap();
        assert_eq!(request.text, "  some text \n");
        assert_eq!(request.char_count(), 13);
        assert_eq!(request.count, QuestionCount::Unbounded);
    }

    #[test]
    fn test_blank_text_rejected_before_count() {
        let err = QuizRequest::new(" \n\t", "abc", 50).unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::InputEmpty)));
    }

    #[test]
    fn test_invalid_count_rejected() {
        for input in ["", "0", "51"] {
            let err = QuizRequest::new("text", input, 50).unwrap_err();
            assert!(matches!(err, AppError::Input(InputError::InvalidQuestionCount { .. })));
        }
    }
}
