/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP 服务监听地址
    pub bind_host: String,
    /// HTTP 服务监听端口
    pub bind_port: u16,
    /// Ollama 模型名称
    pub model_name: String,
    /// 文本分片的最大字符数
    pub chunk_size: usize,
    /// 未指定时的默认出题数量
    pub default_num_questions: usize,
    /// 单个请求内同时进行的模型调用数量
    pub max_concurrent_invocations: usize,
    /// 单次模型调用的超时秒数（0 表示不限时）
    pub model_timeout_secs: u64,
    /// 摘要 PDF 输出目录
    pub summary_output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            bind_port: 5000,
            model_name: "llama3.2:latest".to_string(),
            chunk_size: 2000,
            default_num_questions: 10,
            max_concurrent_invocations: 8,
            model_timeout_secs: 300,
            summary_output_dir: "summaries".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            bind_host: std::env::var("BIND_HOST").unwrap_or(default.bind_host),
            bind_port: std::env::var("BIND_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.bind_port),
            model_name: std::env::var("OLLAMA_MODEL").unwrap_or(default.model_name),
            chunk_size: std::env::var("CHUNK_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.chunk_size),
            default_num_questions: std::env::var("DEFAULT_NUM_QUESTIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.default_num_questions),
            max_concurrent_invocations: std::env::var("MAX_CONCURRENT_INVOCATIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_invocations),
            model_timeout_secs: std::env::var("MODEL_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.model_timeout_secs),
            summary_output_dir: std::env::var("SUMMARY_OUTPUT_DIR").unwrap_or(default.summary_output_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
