//! 请求的题目总数
//!
//! `Concrete(n)` 表示精确的总数，`Unbounded` 表示"尽可能多"（受单次请求上限约束）

use std::fmt;

use crate::error::{AppError, AppResult};

/// 界面上提供的预设选项
pub const PRESET_COUNTS: [&str; 4] = ["5", "10", "20", "Max"];

/// 默认题目数量
pub const DEFAULT_COUNT: u32 = 10;

/// 允许的最大具体数量
pub const MAX_CONCRETE_COUNT: u32 = 50;

/// 请求的题目总数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionCount {
    Concrete(u32),
    Unbounded,
}

impl QuestionCount {
    /// 创建具体数量，超出 [0, 50] 返回错误
    pub fn concrete(n: u32) -> AppResult<Self> {
        if n > MAX_CONCRETE_COUNT {
            return Err(AppError::invalid_question_count(n.to_string(), MAX_CONCRETE_COUNT));
        }
        Ok(Self::Concrete(n))
    }

    /// 解析用户输入
    ///
    /// - `Max`（不区分大小写）→ `Unbounded`
    /// - `1..=max` → `Concrete`
    /// - 空串、`0`、超出上限、非数字 → 错误
    pub fn parse_with_limit(input: &str, max: u32) -> AppResult<Self> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("max") {
            return Ok(Self::Unbounded);
        }

        let n: u32 = trimmed
            .parse()
            .map_err(|_| AppError::invalid_question_count(input, max))?;

        let max = max.min(MAX_CONCRETE_COUNT);
        if n == 0 || n > max {
            return Err(AppError::invalid_question_count(input, max));
        }

        Ok(Self::Concrete(n))
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self::Concrete(DEFAULT_COUNT)
    }
}

impl std::str::FromStr for QuestionCount {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_limit(s, MAX_CONCRETE_COUNT)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(n) => write!(f, "{}", n),
            Self::Unbounded => f.write_str("Max"),
        }
    }
}
