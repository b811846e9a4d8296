//! 组卷流水线（Quiz Assembly Pipeline）
//!
//! ## 模块划分
//!
//! ### `chunker` - 分块器
//! - 按固定字符数切分原文，不重叠
//! - 纯函数，无 I/O
//!
//! ### `quota` - 配额分配
//! - 请求总数 → 选择题 / 判断题总目标
//! - 总目标 → 每个分块的请求数量
//!
//! ### `aggregator` - 聚合器
//! - 逐块顺序调用生成后端
//! - 按分块顺序合并，截断多余题目
//!
//! ## 数据流
//!
//! ```text
//! 原文 → chunker → Vec<&str>
//!                     ↓
//! 请求数量 → quota → QuotaPlan
//!                     ↓
//!        aggregator（每块一次 generate）→ Quiz
//! ```

pub mod aggregator;
pub mod chunker;
pub mod quota;

pub use aggregator::{assemble, AssemblyOptions, QuizAssembler};
pub use chunker::{chunk_text, DEFAULT_MAX_CHUNK_SIZE};
pub use quota::{allocate, QuotaPlan, DEFAULT_UNBOUNDED_CEILING};
