use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 请求参数校验错误（客户端错误，返回 400）
    Validation(String),
    /// 模型调用相关错误
    Model(ModelError),
    /// PDF 处理相关错误
    Pdf(PdfError),
    /// 输入为空（无可提取文本、分片为空、答案键为空等）
    EmptyInput(String),
    /// 配置错误
    Config(ConfigError),
    /// 其他内部错误（任务调度、IO 等）
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::Model(e) => write!(f, "{}", e),
            AppError::Pdf(e) => write!(f, "{}", e),
            AppError::EmptyInput(msg) => write!(f, "{}", msg),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Internal(msg) => write!(f, "内部错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Model(e) => Some(e),
            AppError::Pdf(e) => Some(e),
            AppError::Config(e) => Some(e),
            _ => None,
        }
    }
}

/// 模型调用错误
#[derive(Debug)]
pub enum ModelError {
    /// ollama 未安装或不在 PATH 中
    NotInstalled,
    /// 子进程启动失败
    SpawnFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 模型进程以非零状态退出
    InvocationFailed { stderr: String },
    /// 单次调用超时
    Timeout { secs: u64 },
    /// 与模型进程的 IO 交互失败
    Io {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NotInstalled => {
                write!(f, "Ollama is not installed or not in the PATH.")
            }
            ModelError::SpawnFailed { source } => {
                write!(f, "Failed to start the model process: {}", source)
            }
            ModelError::InvocationFailed { stderr } => {
                write!(f, "Ollama error: {}", stderr)
            }
            ModelError::Timeout { secs } => {
                write!(f, "Model invocation timed out after {} seconds", secs)
            }
            ModelError::Io { source } => {
                write!(f, "Model process I/O failed: {}", source)
            }
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::SpawnFailed { source } | ModelError::Io { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// PDF 处理错误
#[derive(Debug)]
pub enum PdfError {
    /// 文本提取失败
    ExtractionFailed { message: String },
    /// 摘要 PDF 生成失败
    RenderFailed { message: String },
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ExtractionFailed { .. } => {
                write!(
                    f,
                    "Failed to read the PDF file. Ensure it contains readable text."
                )
            }
            PdfError::RenderFailed { .. } => {
                write!(f, "Failed to create summary PDF.")
            }
        }
    }
}

impl std::error::Error for PdfError {}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 分片数量为 0，无法分配题目
    ZeroChunkCount,
    /// 输出目录创建失败
    OutputDirCreateFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroChunkCount => {
                write!(f, "分片数量为 0，无法分配题目")
            }
            ConfigError::OutputDirCreateFailed { path, source } => {
                write!(f, "输出目录创建失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建请求校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// 创建空输入错误
    pub fn empty_input(message: impl Into<String>) -> Self {
        AppError::EmptyInput(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }

    /// 创建模型进程启动错误
    pub fn model_spawn_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Model(ModelError::SpawnFailed {
            source: Box::new(source),
        })
    }

    /// 创建模型进程 IO 错误
    pub fn model_io_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Model(ModelError::Io {
            source: Box::new(source),
        })
    }

    /// 创建 PDF 文本提取错误
    pub fn pdf_extraction_failed(message: impl Into<String>) -> Self {
        AppError::Pdf(PdfError::ExtractionFailed {
            message: message.into(),
        })
    }

    /// 创建摘要 PDF 生成错误
    pub fn pdf_render_failed(message: impl Into<String>) -> Self {
        AppError::Pdf(PdfError::RenderFailed {
            message: message.into(),
        })
    }
}

// ========== HTTP 响应映射 ==========

impl AppError {
    /// 错误对应的日志级别
    fn level(&self) -> tracing::Level {
        match self {
            AppError::Validation(_) => tracing::Level::WARN,
            _ => tracing::Level::ERROR,
        }
    }

    /// 错误对应的 HTTP 状态码
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 记录错误日志（内部细节只进日志，不进响应体）
    fn log(&self) {
        match self.level() {
            tracing::Level::WARN => tracing::warn!(error = %self, detail = ?self),
            _ => tracing::error!(error = %self, detail = ?self),
        }
    }
}

impl IntoResponse for AppError {
    /// 记录日志并转换为 Axum 响应，响应体固定为 `{"error": message}`
    fn into_response(self) -> Response {
        self.log();
        let body = json!({ "error": self.to_string() });
        (self.status_code(), Json(body)).into_response()
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
