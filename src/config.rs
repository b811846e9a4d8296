use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::models::QuestionQuota;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 单个分块的最大字符数
    pub max_chunk_size: usize,
    /// Max 模式下每次请求的选择题上限
    pub unbounded_mcq_ceiling: usize,
    /// Max 模式下每次请求的判断题上限
    pub unbounded_tf_ceiling: usize,
    /// 用户可请求的最大题目数
    pub max_question_count: u32,
    /// 超过该字符数的文档视为大文档（日志中不回显内容）
    pub large_text_threshold: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 导出文件路径（可选）
    pub export_path: Option<String>,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_chunk_size: 15_000,
            unbounded_mcq_ceiling: 10,
            unbounded_tf_ceiling: 10,
            max_question_count: 50,
            large_text_threshold: 50_000,
            verbose_logging: false,
            export_path: None,
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
            llm_temperature: 0.7,
        }
    }
}

impl Config {
    /// 从环境变量加载，缺省或无法解析的项使用默认值
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// 从 TOML 文件加载，再用环境变量覆盖
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let path_str = path.display().to_string();
        if !path.exists() {
            return Err(FileError::NotFound { path: path_str }.into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(&path_str, e))?;

        let config = Self::from_toml_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: path_str,
            source,
        })?;

        Ok(config.merge_env())
    }

    /// 解析 TOML 文本（未出现的字段取默认值）
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn merge_env(self) -> Self {
        Self {
            max_chunk_size: env_or("MAX_CHUNK_SIZE", self.max_chunk_size),
            unbounded_mcq_ceiling: env_or("UNBOUNDED_MCQ_CEILING", self.unbounded_mcq_ceiling),
            unbounded_tf_ceiling: env_or("UNBOUNDED_TF_CEILING", self.unbounded_tf_ceiling),
            max_question_count: env_or("MAX_QUESTION_COUNT", self.max_question_count),
            large_text_threshold: env_or("LARGE_TEXT_THRESHOLD", self.large_text_threshold),
            verbose_logging: env_or("VERBOSE_LOGGING", self.verbose_logging),
            export_path: std::env::var("EXPORT_PATH").ok().or(self.export_path),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_temperature: env_or("LLM_TEMPERATURE", self.llm_temperature),
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chunk_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_chunk_size".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        if self.max_question_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_question_count".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.llm_temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm_temperature".to_string(),
                reason: format!("{} 不在 [0, 2] 范围内", self.llm_temperature),
            });
        }
        Ok(())
    }

    /// Max 模式下的单次请求上限
    pub fn unbounded_ceiling(&self) -> QuestionQuota {
        QuestionQuota::new(self.unbounded_mcq_ceiling, self.unbounded_tf_ceiling)
    }
}

fn env_or<T: std::str::FromStr>(var_name: &str, default: T) -> T {
    std::env::var(var_name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
