//! # Quiz Assembler
//!
//! 一个把学习材料变成测验（选择题 + 判断题）的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 测验、题目、题目数量，以及读取源材料
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个分块或单份测验
//! - `QuizGenerator` - 生成后端接口（注入的能力）
//! - `LlmService` - 基于 LLM 的生成后端
//! - `grading` - 作答与评分
//! - `QuizExporter` - 纯文本导出
//!
//! ### ③ 流水线层（Pipeline）
//! - `pipeline/` - 分块、配额分配、逐块生成与合并
//! - `QuizAssembler` - 对外唯一的组卷入口
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一次出题请求"的完整流程
//! - `QuizRequest` - 请求校验（材料为空、题目数量非法）
//! - `QuizFlow` - 流程编排（校验 → 组卷）
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{QuestionCount, QuestionQuota, Quiz};
pub use pipeline::{assemble, chunk_text, AssemblyOptions, QuizAssembler};
pub use services::{GenerateError, LlmService, QuizGenerator};
pub use workflow::{QuizFlow, QuizRequest};
