//! 导出服务 - 业务能力层
//!
//! 只负责"把测验写成纯文本文件"能力

use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{option_text, OptionLetter, Quiz};

/// 纯文本导出
///
/// 选择题在前，判断题编号接着选择题往下排；末尾附答案
pub struct QuizExporter {
    title: String,
}

impl QuizExporter {
    pub fn new() -> Self {
        Self {
            title: "Quiz".to_string(),
        }
    }

    /// 使用自定义标题创建
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// 渲染为纯文本
    pub fn render(&self, quiz: &Quiz) -> String {
        let mcq_count = quiz.multiple_choice.len();
        let rule = "=".repeat(60);

        let mut out = format!(
            "{}\nGenerated {}\n{}\n\n",
            self.title,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            rule
        );

        if mcq_count > 0 {
            out.push_str("Multiple Choice Questions\n\n");
            for (i, q) in quiz.multiple_choice.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, q.question));
                for (option, letter) in q.options.iter().zip(OptionLetter::ALL) {
                    out.push_str(&format!("   {}) {}\n", letter, option_text(option)));
                }
                out.push('\n');
            }
        }

        if !quiz.true_false.is_empty() {
            out.push_str("True/False Questions\n\n");
            for (i, q) in quiz.true_false.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", mcq_count + i + 1, q.question));
                out.push_str("   True / False\n\n");
            }
        }

        out.push_str(&format!("{}\nAnswer Key\n\n", rule));
        for (i, q) in quiz.multiple_choice.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, q.answer));
        }
        for (i, q) in quiz.true_false.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", mcq_count + i + 1, q.answer));
        }

        out
    }

    /// 写入文件，必要时创建父目录
    pub async fn write_to(&self, quiz: &Quiz, path: &Path) -> AppResult<()> {
        let path_str = path.display().to_string();
        debug!("导出测验: {} 道题 → {}", quiz.total_questions(), path_str);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::file_write_failed(&path_str, e))?;
        }

        fs::write(path, self.render(quiz))
            .await
            .map_err(|e| AppError::file_write_failed(&path_str, e))?;

        info!("💾 测验已导出至: {}", path_str);
        Ok(())
    }
}

impl Default for QuizExporter {
    fn default() -> Self {
        Self::new()
    }
}
