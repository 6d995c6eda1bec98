//! HTTP 接口层
//!
//! 路由组装和处理器共享状态

pub mod handlers;

use crate::config::Config;
use crate::orchestrator::QuizPipeline;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// 上传体积上限（PDF 可能不小，默认 2MB 不够用）
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// 处理器共享状态
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<QuizPipeline>,
    pub config: Config,
}

/// 组装路由
///
/// CORS 全放开，与前端的跨域访问方式保持一致
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/process-pdf", post(handlers::process_pdf))
        .route("/generate-quiz", post(handlers::generate_quiz))
        .route("/submit-quiz", post(handlers::submit_quiz))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
