/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::QuestionQuota;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 debug / info。
/// 重复调用不会报错（测试中会多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 测验生成");
    info!("🤖 模型: {}", config.llm_model_name);
    info!("✂️ 分块大小: {} 字符", config.max_chunk_size);
    info!("{}", "=".repeat(60));
}

/// 记录分块信息
///
/// # 参数
/// - `char_count`: 原文字符数
/// - `chunk_count`: 分块数
/// - `max_chunk_size`: 分块大小
pub fn log_chunking(char_count: usize, chunk_count: usize, max_chunk_size: usize) {
    if chunk_count > 1 {
        info!(
            "✂️ 原文 {} 个字符，超过 {}，已切分为 {} 部分",
            char_count, max_chunk_size, chunk_count
        );
    } else {
        info!("📄 原文 {} 个字符，单次生成", char_count);
    }
}

/// 记录单个部分开始生成
pub fn log_part_start(part: usize, total: usize, char_count: usize) {
    info!("\n{}", "─".repeat(40));
    info!("📦 正在生成第 {}/{} 部分的题目 ({} 字符)...", part, total, char_count);
}

/// 记录组卷完成
pub fn log_assembly_complete(counts: &QuestionQuota, parts: usize) {
    info!("\n{}", "=".repeat(60));
    info!("✅ 组卷完成 (共 {} 部分)", parts);
    info!("📝 选择题: {}", counts.mcq);
    info!("📝 判断题: {}", counts.tf);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
