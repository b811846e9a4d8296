//! 聚合器 - 组卷流水线的核心
//!
//! ## 职责
//!
//! 1. **计算配额**：按分块数调用一次 `allocate`
//! 2. **顺序生成**：逐块调用后端，上一块返回（或失败）之前不会发出下一块的请求
//! 3. **合并结果**：按分块顺序追加选择题和判断题
//! 4. **截断多余**：具体数量时截到总目标，多余部分从尾部（靠后的分块）丢弃
//! 5. **结果校验**：合并后一道题都没有时返回 `NoMeaningfulContent`
//!
//! 任意一块失败都会立即中止整次组卷，已成功分块的结果一并丢弃，不重试、不跳过。

use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{QuestionCount, QuestionQuota, Quiz};
use crate::pipeline::chunker::{chunk_text, DEFAULT_MAX_CHUNK_SIZE};
use crate::pipeline::quota::{allocate, DEFAULT_UNBOUNDED_CEILING};
use crate::services::QuizGenerator;
use crate::utils::logging;

/// 组卷参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// 单个分块的最大字符数
    pub max_chunk_size: usize,
    /// Max 模式下每次请求的上限
    pub unbounded_ceiling: QuestionQuota,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            unbounded_ceiling: DEFAULT_UNBOUNDED_CEILING,
        }
    }
}

impl From<&Config> for AssemblyOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_chunk_size: config.max_chunk_size,
            unbounded_ceiling: config.unbounded_ceiling(),
        }
    }
}

/// 组卷器
///
/// 对外唯一的入口：给定原文、请求数量和生成后端，返回合并、截断后的测验
#[derive(Debug, Clone, Default)]
pub struct QuizAssembler {
    options: AssemblyOptions,
}

impl QuizAssembler {
    pub fn new(options: AssemblyOptions) -> Self {
        Self { options }
    }

    /// 分块并组卷
    pub async fn assemble<G>(
        &self,
        text: &str,
        requested: QuestionCount,
        generator: &G,
    ) -> AppResult<Quiz>
    where
        G: QuizGenerator,
    {
        let chunks = chunk_text(text, self.options.max_chunk_size);
        logging::log_chunking(text.chars().count(), chunks.len(), self.options.max_chunk_size);

        assemble(&chunks, requested, self.options.unbounded_ceiling, generator).await
    }
}

/// 对已经切好的分块组卷
///
/// `chunks` 不能为空；为空时视为没有输入
pub async fn assemble<G>(
    chunks: &[&str],
    requested: QuestionCount,
    unbounded_ceiling: QuestionQuota,
    generator: &G,
) -> AppResult<Quiz>
where
    G: QuizGenerator,
{
    if chunks.is_empty() {
        return Err(AppError::input_empty());
    }

    let total = chunks.len();
    let plan = allocate(requested, total, unbounded_ceiling);

    if total > 1 {
        info!("📚 大文档将分 {} 部分处理", total);
    }
    debug!(
        "配额: 总目标 [{}], 每部分 [{}], 请求数量 {}",
        plan.overall, plan.per_chunk, requested
    );

    let mut combined = Quiz::default();

    for (index, chunk) in chunks.iter().enumerate() {
        let part = index + 1;
        if total > 1 {
            logging::log_part_start(part, total, chunk.chars().count());
        }

        let chunk_quiz = generator
            .generate(chunk, plan.per_chunk)
            .await
            .map_err(|e| {
                error!("❌ 第 {}/{} 部分生成失败: {}", part, total, e);
                AppError::backend_failure(part, total, e)
            })?;

        debug!(
            "第 {}/{} 部分返回 {} 道选择题, {} 道判断题",
            part,
            total,
            chunk_quiz.multiple_choice.len(),
            chunk_quiz.true_false.len()
        );

        combined.append(chunk_quiz);
    }

    if !requested.is_unbounded() {
        let before = combined.counts();
        combined.truncate(plan.overall);
        if before != combined.counts() {
            debug!(
                "截断多余题目: {} → {} 道",
                before.total(),
                combined.total_questions()
            );
        }
    }

    if combined.is_empty() {
        error!("❌ 所有部分均未生成有效题目");
        return Err(AppError::no_meaningful_content());
    }

    logging::log_assembly_complete(&combined.counts(), total);

    Ok(combined)
}
