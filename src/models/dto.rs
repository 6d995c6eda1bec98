//! HTTP 接口的数据结构定义

use crate::services::QuestionFeedback;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// `POST /process-pdf` 的响应
#[derive(Debug, Serialize)]
pub struct ProcessPdfResponse {
    /// 完整摘要
    pub summary: String,
    /// 完整测验文本
    pub quiz: String,
    /// 摘要 PDF 的落盘路径
    pub summary_pdf_path: String,
}

/// `POST /generate-quiz` 的请求体
///
/// 字段用 Option 接收，缺失 `num_questions` 时由处理器返回 400
/// 而不是交给反序列化层拒绝
#[derive(Debug, Deserialize)]
pub struct GenerateQuizRequest {
    pub num_questions: Option<usize>,
    /// 出题主题，缺省为 "general knowledge"
    pub topic: Option<String>,
}

/// `POST /generate-quiz` 的响应
#[derive(Debug, Serialize)]
pub struct GenerateQuizResponse {
    pub quiz: String,
}

/// `POST /submit-quiz` 的请求体
///
/// 测验不做持久化，评分时由调用方重新提交完整测验文本
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    /// 含正确答案的测验文本
    pub quiz: Option<String>,
    /// 用户作答：题号字符串 -> 选项字母
    pub answers: Option<HashMap<String, String>>,
}

/// `POST /submit-quiz` 的响应
#[derive(Debug, Serialize)]
pub struct SubmitQuizResponse {
    /// "答对数/总数"
    pub score: String,
    /// 两位小数的百分比，如 "66.67%"
    pub percentage: String,
    /// 逐题反馈
    pub feedback: BTreeMap<String, QuestionFeedback>,
}
