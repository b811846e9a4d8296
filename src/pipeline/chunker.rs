//! 分块器
//!
//! 按固定字符数切分原文：不重叠、不识别句子边界。
//! 按字符（而非字节）计数，因此不会切断多字节字符。

/// 默认分块大小（约 3-4k tokens）
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 15_000;

/// 将文本切分为若干连续分块
///
/// - 文本长度不超过 `max_chunk_size` 时，返回唯一一个等于原文的分块（可能为空串）
/// - 否则返回长度为 `max_chunk_size` 的连续切片，最后一块可能更短
///
/// 所有分块按顺序拼接后与原文完全一致。
///
/// # Panics
/// `max_chunk_size` 为 0 时 panic（调用方的前置条件）
pub fn chunk_text(text: &str, max_chunk_size: usize) -> Vec<&str> {
    assert!(max_chunk_size > 0, "max_chunk_size 必须大于 0");

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == max_chunk_size {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }

    // 最后一块；空文本时也保证至少一个分块
    chunks.push(&text[start..]);
    chunks
}
