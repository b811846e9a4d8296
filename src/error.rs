use thiserror::Error;

use crate::services::quiz_generator::GenerateError;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入校验错误（流水线运行前拒绝）
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 组卷流水线错误
    #[error("组卷错误: {0}")]
    Pipeline(#[from] PipelineError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 输入校验错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 没有提供任何文本
    #[error("请先粘贴文本或上传文件，再生成测验")]
    InputEmpty,
    /// 题目数量不合法
    #[error("题目数量无效: '{input}'（应为 1-{max} 之间的整数或 Max）")]
    InvalidQuestionCount { input: String, max: u32 },
}

/// 组卷流水线错误
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 某一分块的生成调用失败，整次组卷中止
    #[error("第 {chunk}/{total} 部分生成失败: {source}")]
    BackendFailure {
        chunk: usize,
        total: usize,
        #[source]
        source: GenerateError,
    },
    /// 所有分块都成功，但合并后一道题都没有
    #[error("无法从提供的材料中生成有意义的题目，请换一份材料试试")]
    NoMeaningfulContent,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 不支持的文件类型
    #[error("不支持的文件类型 ({path}): {hint}")]
    UnsupportedFormat { path: String, hint: String },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建空输入错误
    pub fn input_empty() -> Self {
        AppError::Input(InputError::InputEmpty)
    }

    /// 创建题目数量错误
    pub fn invalid_question_count(input: impl Into<String>, max: u32) -> Self {
        AppError::Input(InputError::InvalidQuestionCount {
            input: input.into(),
            max,
        })
    }

    /// 创建分块生成失败错误
    pub fn backend_failure(chunk: usize, total: usize, source: GenerateError) -> Self {
        AppError::Pipeline(PipelineError::BackendFailure {
            chunk,
            total,
            source,
        })
    }

    /// 创建"无有效题目"错误
    pub fn no_meaningful_content() -> Self {
        AppError::Pipeline(PipelineError::NoMeaningfulContent)
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为内容质量问题（而非传输问题）
    ///
    /// 调用方可据此提示用户更换材料，而不是"重试"
    pub fn is_content_problem(&self) -> bool {
        matches!(self, AppError::Pipeline(PipelineError::NoMeaningfulContent))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
