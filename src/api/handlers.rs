//! HTTP 请求处理器
//!
//! 处理器只做请求校验和响应组装，业务流程全部委托给编排层。
//! 错误通过 `AppError` 的 `IntoResponse` 统一映射为 `{"error": message}`。

use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{
    GenerateQuizRequest, GenerateQuizResponse, ProcessPdfResponse, SubmitQuizRequest,
    SubmitQuizResponse,
};
use crate::services::{parse_answer_key, score};
use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

/// `GET /` - 服务信息
pub async fn index() -> &'static str {
    "PDF quiz server: POST /process-pdf, /generate-quiz, /submit-quiz"
}

/// `POST /process-pdf`
///
/// multipart 表单：`file`（PDF，必填）、`num_questions`（整数，可缺省）。
/// 成功返回摘要、测验文本和摘要 PDF 路径。
pub async fn process_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ProcessPdfResponse>> {
    let mut pdf_bytes: Option<Vec<u8>> = None;
    let mut num_questions = state.config.default_num_questions;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("file") => {
                let is_pdf = field
                    .content_type()
                    .map(|ct| ct == "application/pdf")
                    .unwrap_or(false);
                if !is_pdf {
                    return Err(AppError::validation(
                        "Invalid file type. Please upload a PDF.",
                    ));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read upload: {}", e)))?;
                pdf_bytes = Some(bytes.to_vec());
            }
            Some("num_questions") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read field: {}", e)))?;
                num_questions = text.trim().parse().map_err(|_| {
                    AppError::validation("'num_questions' must be an integer.")
                })?;
            }
            _ => {}
        }
    }

    let pdf_bytes = pdf_bytes.ok_or_else(|| AppError::validation("No file provided"))?;

    info!(
        "📥 收到 PDF 处理请求: {} 字节, {} 道题",
        pdf_bytes.len(),
        num_questions
    );

    let output = state.pipeline.process_pdf(&pdf_bytes, num_questions).await?;

    Ok(Json(ProcessPdfResponse {
        summary: output.summary,
        quiz: output.quiz,
        summary_pdf_path: output.summary_pdf_path,
    }))
}

/// `POST /generate-quiz`
///
/// 不上传文本，直接按主题出题。`num_questions` 必填，`topic` 缺省为
/// "general knowledge"。
pub async fn generate_quiz(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuizRequest>,
) -> AppResult<Json<GenerateQuizResponse>> {
    let num_questions = request.num_questions.ok_or_else(|| {
        AppError::validation("Please provide 'num_questions' in the request body.")
    })?;
    let topic = request
        .topic
        .unwrap_or_else(|| "general knowledge".to_string());

    info!("📥 收到出题请求: {} 道关于 '{}' 的题目", num_questions, topic);

    let quiz = state
        .pipeline
        .generate_topic_quiz(num_questions, &topic)
        .await?;

    info!("✓ 出题完成");
    Ok(Json(GenerateQuizResponse { quiz }))
}

/// `POST /submit-quiz`
///
/// 从提交的测验文本中重建答案键并对用户作答评分。
pub async fn submit_quiz(
    Json(request): Json<SubmitQuizRequest>,
) -> AppResult<Json<SubmitQuizResponse>> {
    let (Some(quiz), Some(answers)) = (request.quiz, request.answers) else {
        return Err(AppError::validation(
            "Please provide 'quiz' (questions with correct answers) and 'answers' (user responses).",
        ));
    };

    let answer_key = parse_answer_key(&quiz);
    let result = score(&answer_key, &answers)?;

    info!("✓ 评分完成: {}", result.score_line());

    Ok(Json(SubmitQuizResponse {
        score: result.score_line(),
        percentage: result.percentage(),
        feedback: result.feedback,
    }))
}
