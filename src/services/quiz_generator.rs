//! 题目生成能力（外部协作方的接口）
//!
//! 后端是一个注入的能力：任何实现了 `QuizGenerator` 的类型都可以，
//! 包括 `LlmService`、测试里的桩实现，以及形如
//! `Fn(String, QuestionQuota) -> impl Future<Output = Result<Quiz, GenerateError>>` 的闭包。

use std::future::Future;

use thiserror::Error;

use crate::models::{QuestionQuota, Quiz};

/// 生成后端错误
#[derive(Debug, Error)]
pub enum GenerateError {
    /// 网络请求或 API 调用失败
    #[error("生成服务调用失败: {0}")]
    RequestFailed(String),
    /// 后端返回空内容
    #[error("生成服务返回内容为空")]
    EmptyResponse,
    /// 返回内容不是预期的测验结构
    #[error("生成服务返回的测验格式无效: {0}")]
    InvalidFormat(String),
    /// 后端明确报告的错误
    #[error("生成服务报告错误: {0}")]
    Backend(String),
}

/// 题目生成后端
///
/// 约定：最多返回 `quota.mcq` 道选择题和 `quota.tf` 道判断题，可以更少甚至为零。
pub trait QuizGenerator: Send + Sync {
    fn generate(
        &self,
        text: &str,
        quota: QuestionQuota,
    ) -> impl Future<Output = Result<Quiz, GenerateError>> + Send;
}

impl<F, Fut> QuizGenerator for F
where
    F: Fn(String, QuestionQuota) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Quiz, GenerateError>> + Send,
{
    fn generate(
        &self,
        text: &str,
        quota: QuestionQuota,
    ) -> impl Future<Output = Result<Quiz, GenerateError>> + Send {
        self(text.to_string(), quota)
    }
}
