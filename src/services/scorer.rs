//! 测验解析与评分服务 - 业务能力层
//!
//! 两个能力：
//! 1. 从模型生成的测验文本中提取答案键（题号 -> 正确选项）
//! 2. 用答案键给用户提交的作答评分
//!
//! ## 已知脆弱点
//!
//! 题号是按 `Answer:` 行的出现顺序隐式分配的（第 N 行即第 N 题），
//! 解析器不读取题干行上的编号。模型输出漏掉或多出一行答案时，
//! 后续所有题号会整体错位。这是与既有格式兼容的遗留行为，保留不改。

use crate::error::{AppError, AppResult};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// 答案标记行的字面前缀
const ANSWER_MARKER: &str = "Answer:";

/// 单题反馈
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuestionFeedback {
    /// "Correct" 或 "Incorrect"
    pub result: String,
    /// 作答错误时回显的用户答案（已归一化）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_answer: Option<String>,
    /// 作答错误时给出的正确答案
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

impl QuestionFeedback {
    fn correct() -> Self {
        Self {
            result: "Correct".to_string(),
            your_answer: None,
            correct_answer: None,
        }
    }

    fn incorrect(your_answer: String, correct_answer: String) -> Self {
        Self {
            result: "Incorrect".to_string(),
            your_answer: Some(your_answer),
            correct_answer: Some(correct_answer),
        }
    }
}

/// 评分结果
#[derive(Debug, Clone, Serialize)]
pub struct ScoringResult {
    /// 答对题数
    pub correct_count: usize,
    /// 答案键中的总题数（不是用户提交的作答数）
    pub total: usize,
    /// 按题号的逐题反馈（只包含答案键中存在的题）
    pub feedback: BTreeMap<String, QuestionFeedback>,
}

impl ScoringResult {
    /// 格式化为 "答对数/总数"
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.correct_count, self.total)
    }

    /// 格式化为两位小数的百分比，如 "66.67%"
    ///
    /// 前置条件：`total > 0`。[`score`] 构造的结果一定满足
    /// （空答案键在评分前就被拒绝），手工构造时需自行保证
    pub fn percentage(&self) -> String {
        debug_assert!(self.total > 0, "total 为 0 时百分比无定义");
        format!(
            "{:.2}%",
            (self.correct_count as f64 / self.total as f64) * 100.0
        )
    }
}

/// 从测验文本中提取答案键
///
/// 逐行扫描：去除首尾空白后以 `Answer:` 开头的行，取第一个冒号之后的
/// 子串并去除空白，记为当前题的正确答案；题号从 1 开始按出现顺序递增。
///
/// # 参数
/// - `quiz_text`: 模型生成的测验文本
///
/// # 返回
/// 题号到正确选项的有序映射；没有答案行时为空映射
pub fn parse_answer_key(quiz_text: &str) -> BTreeMap<u32, String> {
    let mut answer_key = BTreeMap::new();
    let mut current_question: u32 = 1;

    for line in quiz_text.lines() {
        let line = line.trim();
        if line.starts_with(ANSWER_MARKER) {
            if let Some((_, rest)) = line.split_once(':') {
                answer_key.insert(current_question, rest.trim().to_string());
                current_question += 1;
            }
        }
    }

    answer_key
}

/// 用答案键给用户作答评分
///
/// 用户提交的题号不在答案键中时直接跳过（不计对也不计错，不产生反馈）。
/// 比较前双方都做归一化（去空白 + 大写）。`total` 取答案键的条目数。
///
/// # 参数
/// - `answer_key`: 题号到正确选项的映射
/// - `user_answers`: 用户提交的作答（题号字符串 -> 选项）
///
/// # 返回
/// 评分结果；答案键为空时返回错误（避免除零），由调用方转为 HTTP 错误响应
pub fn score(
    answer_key: &BTreeMap<u32, String>,
    user_answers: &HashMap<String, String>,
) -> AppResult<ScoringResult> {
    if answer_key.is_empty() {
        return Err(AppError::empty_input(
            "The quiz text contains no answer lines; nothing to score.",
        ));
    }

    let total = answer_key.len();
    let mut correct_count = 0;
    let mut feedback = BTreeMap::new();

    for (question_num, user_answer) in user_answers {
        let correct_answer = question_num
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|n| answer_key.get(&n));

        let Some(correct_answer) = correct_answer else {
            // 题号不在答案键中，跳过
            continue;
        };

        let normalized_user = user_answer.trim().to_uppercase();
        if normalized_user == correct_answer.trim().to_uppercase() {
            correct_count += 1;
            feedback.insert(question_num.clone(), QuestionFeedback::correct());
        } else {
            feedback.insert(
                question_num.clone(),
                QuestionFeedback::incorrect(normalized_user, correct_answer.clone()),
            );
        }
    }

    Ok(ScoringResult {
        correct_count,
        total,
        feedback,
    })
}
