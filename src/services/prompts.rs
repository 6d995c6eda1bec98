//! 提示词构建服务 - 业务能力层
//!
//! 只负责构建发送给模型的 JSON 提示词信封
//!
//! 信封格式为 `{"content": 指令, "chunk": 文本片段}`，
//! 题干/选项/答案的输出格式约定写在指令内，解析端只依赖 `Answer:` 行

use serde_json::json;

/// 构建摘要提示词
pub fn summarize_prompt(chunk: &str) -> String {
    json!({
        "content": "Summarize the following text into structured paragraphs:",
        "chunk": chunk
    })
    .to_string()
}

/// 构建基于文本分片的出题提示词
///
/// # 参数
/// - `chunk`: 出题依据的文本分片
/// - `num_questions`: 本分片分配到的题数
pub fn quiz_chunk_prompt(chunk: &str, num_questions: usize) -> String {
    json!({
        "content": format!(
            "Generate {num_questions} multiple-choice questions (MCQs) based on the following text. \
             Return the questions and answers in the format:\n\
             1. Question\nA. Option 1\nB. Option 2\nC. Option 3\nD. Option 4\nAnswer: Correct Option\n\n\
             Ensure clarity and relevance to the given content."
        ),
        "chunk": chunk
    })
    .to_string()
}

/// 构建基于主题的出题提示词（无文本输入）
///
/// # 参数
/// - `num_questions`: 题数
/// - `topic`: 出题主题
pub fn topic_quiz_prompt(num_questions: usize, topic: &str) -> String {
    json!({
        "content": format!(
            "Generate {num_questions} multiple-choice questions (MCQs) on the topic '{topic}'. \
             Ensure each question has 4 options labeled A, B, C, and D, and provide the correct answer after each question. \
             Format:\n1. Question\nA. Option 1\nB. Option 2\nC. Option 3\nD. Option 4\nAnswer: Correct Option\n\n"
        )
    })
    .to_string()
}
