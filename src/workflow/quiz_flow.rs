//! 出题流程 - 流程层
//!
//! 核心职责：定义"一次出题请求"的完整处理流程
//!
//! 流程顺序：
//! 1. 校验材料和题目数量（`QuizRequest`）
//! 2. 分块 → 配额 → 逐块生成 → 合并截断（`QuizAssembler`）

use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::Quiz;
use crate::pipeline::{AssemblyOptions, QuizAssembler};
use crate::services::QuizGenerator;
use crate::workflow::quiz_request::QuizRequest;

/// 出题流程
///
/// - 编排校验和组卷
/// - 不持有生成后端的具体实现，只依赖 `QuizGenerator`
pub struct QuizFlow<G> {
    assembler: QuizAssembler,
    generator: G,
    max_question_count: u32,
    large_text_threshold: usize,
}

impl<G: QuizGenerator> QuizFlow<G> {
    /// 创建新的出题流程
    pub fn new(config: &Config, generator: G) -> Self {
        Self {
            assembler: QuizAssembler::new(AssemblyOptions::from(config)),
            generator,
            max_question_count: config.max_question_count,
            large_text_threshold: config.large_text_threshold,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// 校验输入并生成测验
    ///
    /// # 参数
    /// - `text`: 粘贴或读取到的材料
    /// - `count_input`: 题目数量（`5`、`10`、`20`、`Max` 或自定义 1-50）
    pub async fn run(&self, text: &str, count_input: &str) -> AppResult<Quiz> {
        let request = QuizRequest::new(text, count_input, self.max_question_count)?;
        self.run_request(&request).await
    }

    /// 执行已经校验过的请求
    pub async fn run_request(&self, request: &QuizRequest) -> AppResult<Quiz> {
        let char_count = request.char_count();
        if char_count > self.large_text_threshold {
            info!(
                "📚 已载入大文档 ({:.1}k 字符)，内容不在日志中显示",
                char_count as f64 / 1000.0
            );
        } else {
            info!("📝 出题请求: {}", request);
        }

        self.assembler
            .assemble(&request.text, request.count, &self.generator)
            .await
    }
}
