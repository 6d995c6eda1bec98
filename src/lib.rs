//! # PDF Quiz Server
//!
//! 接收 PDF、提取文本、调用本地大模型生成摘要和选择题测验、
//! 并对用户作答评分的 HTTP 服务
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 封装外部依赖，只暴露能力
//! - `OllamaInvoker` - 模型调用能力（本地 ollama 子进程）
//! - `pdf_extractor` - PDF 文本提取能力
//! - `SummaryRenderer` - 摘要 PDF 渲染能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个输入
//! - `chunker` - 文本分片能力
//! - `distributor` - 题目分配能力
//! - `prompts` - 提示词构建能力
//! - `scorer` - 答案键解析与评分能力
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/fanout` - 并行扇出执行器，管理批次并发
//! - `orchestrator/pipeline` - 完整的摘要 + 出题流水线
//!
//! ### ④ 接口层（API）
//! - `api/` - HTTP 路由与处理器，只做校验和响应组装
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ModelInvoker, OllamaInvoker};
pub use orchestrator::{PipelineOutput, QuizPipeline};
