//! 应用装配与启动
//!
//! 持有配置和路由，负责启动检查和 HTTP 服务的生命周期

use crate::api::{self, AppState};
use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::infrastructure::{check_ollama_installed, ModelInvoker, OllamaInvoker};
use crate::orchestrator::QuizPipeline;
use anyhow::Result;
use axum::Router;
use std::fs;
use std::sync::Arc;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    router: Router,
}

impl App {
    /// 初始化应用
    ///
    /// 做一次性的启动检查（ollama 是否可用、输出目录是否存在），
    /// 然后装配流水线和路由
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        // 尽早失败：模型不可用时不启动服务
        check_ollama_installed().await?;
        info!("✓ 检测到 ollama");

        fs::create_dir_all(&config.summary_output_dir).map_err(|e| {
            AppError::Config(ConfigError::OutputDirCreateFailed {
                path: config.summary_output_dir.clone(),
                source: Box::new(e),
            })
        })?;

        let invoker: Arc<dyn ModelInvoker> = Arc::new(OllamaInvoker::new(&config));
        let pipeline = Arc::new(QuizPipeline::new(&config, invoker));

        let state = AppState {
            pipeline,
            config: config.clone(),
        };
        let router = api::router(state);

        Ok(Self { config, router })
    }

    /// 运行 HTTP 服务，直到进程退出
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.bind_host, self.config.bind_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("🚀 服务已启动，监听 {}", addr);
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 PDF 测验服务启动 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("🤖 模型: {}", config.model_name);
    info!("📐 分片大小: {} 字符", config.chunk_size);
    info!("📊 单请求最大并发调用数: {}", config.max_concurrent_invocations);
    info!("{}", "=".repeat(60));
}
