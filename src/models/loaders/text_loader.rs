use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::error::{AppError, AppResult, FileError};

/// 源材料的文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// 纯文本（.txt / .md），直接读取
    PlainText,
    /// 需要先提取文本的文档格式
    Pdf,
    Docx,
}

impl SourceKind {
    /// 按扩展名判断类型（不区分大小写）
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "md" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// 读取源材料文本
///
/// 只直接支持纯文本；PDF / DOCX 需要外部工具先提取为文本。
/// 返回去除首尾空白后的内容，内容为空时返回 `InputEmpty`。
pub async fn load_source_text(path: &Path) -> AppResult<String> {
    let path_str = path.display().to_string();

    match SourceKind::from_path(path) {
        Some(SourceKind::PlainText) => {}
        Some(kind) => {
            return Err(FileError::UnsupportedFormat {
                path: path_str,
                hint: format!("{:?} 需要先提取为纯文本 (.txt) 再使用", kind),
            }
            .into());
        }
        None => {
            return Err(FileError::UnsupportedFormat {
                path: path_str,
                hint: "请提供 .txt 或 .md 文件".to_string(),
            }
            .into());
        }
    }

    if !path.exists() {
        return Err(FileError::NotFound { path: path_str }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::input_empty());
    }

    info!(
        "✓ 已读取 {}，共 {} 个字符",
        path.file_name().unwrap_or_default().to_string_lossy(),
        trimmed.chars().count()
    );

    Ok(trimmed.to_string())
}
