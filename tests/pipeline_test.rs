//! 流水线集成测试
//!
//! 用注入的 mock 模型验证编排逻辑：分片顺序、题目分配、整批失败语义。
//! 带 `#[ignore]` 的用例需要本机运行着服务和 ollama，
//! 手动运行：cargo test -- --ignored

use async_trait::async_trait;
use pdf_quiz_server::services::{parse_answer_key, score};
use pdf_quiz_server::{AppError, AppResult, Config, ModelInvoker, QuizPipeline};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// 把提示词信封拆开并回显的 mock 模型
///
/// - 摘要提示词 -> `S<分片内容>`
/// - 出题提示词 -> `Q{题数}<分片内容>`
struct EchoInvoker;

#[async_trait]
impl ModelInvoker for EchoInvoker {
    async fn invoke(&self, prompt: &str) -> AppResult<String> {
        let envelope: Value =
            serde_json::from_str(prompt).map_err(|e| AppError::internal(e.to_string()))?;
        let content = envelope["content"].as_str().unwrap_or_default();
        let chunk = envelope["chunk"].as_str().unwrap_or_default();

        if content.starts_with("Summarize") {
            Ok(format!("S<{}>", chunk))
        } else {
            // "Generate {n} multiple-choice questions ..."
            let count = content.split_whitespace().nth(1).unwrap_or("?");
            Ok(format!("Q{}<{}>", count, chunk))
        }
    }
}

/// 遇到包含指定子串的分片就失败的 mock 模型
struct FailingInvoker {
    poison: &'static str,
}

#[async_trait]
impl ModelInvoker for FailingInvoker {
    async fn invoke(&self, prompt: &str) -> AppResult<String> {
        if prompt.contains(self.poison) {
            Err(AppError::internal("模型调用失败（注入）"))
        } else {
            Ok("ok".to_string())
        }
    }
}

fn test_config(output_dir: &std::path::Path) -> Config {
    Config {
        chunk_size: 10,
        max_concurrent_invocations: 4,
        summary_output_dir: output_dir.display().to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_summarize_preserves_chunk_order() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = QuizPipeline::new(&test_config(dir.path()), Arc::new(EchoInvoker));

    // chunk_size 10: "aaaa bbbb" | "cccc"
    let summary = pipeline.summarize("aaaa bbbb cccc").await.unwrap();
    assert_eq!(summary, "S<aaaa bbbb>\n\nS<cccc>");
}

#[tokio::test]
async fn test_summarize_empty_text_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = QuizPipeline::new(&test_config(dir.path()), Arc::new(EchoInvoker));

    let result = pipeline.summarize("   ").await;
    assert!(matches!(result, Err(AppError::EmptyInput(_))));
}

#[tokio::test]
async fn test_generate_quiz_distributes_question_counts() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = QuizPipeline::new(&test_config(dir.path()), Arc::new(EchoInvoker));

    // 两个分片，3 道题 -> 前面的分片分到 2 道
    let quiz = pipeline.generate_quiz("aaaa bbbb cccc", 3).await.unwrap();
    assert_eq!(quiz, "Q2<aaaa bbbb>\n\nQ1<cccc>");
}

#[tokio::test]
async fn test_generate_quiz_invokes_zero_question_chunks_too() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = QuizPipeline::new(&test_config(dir.path()), Arc::new(EchoInvoker));

    // 两个分片只有 1 道题：第二个分片分到 0 道，但仍然会被调用
    let quiz = pipeline.generate_quiz("aaaa bbbb cccc", 1).await.unwrap();
    assert_eq!(quiz, "Q1<aaaa bbbb>\n\nQ0<cccc>");
}

#[tokio::test]
async fn test_failed_chunk_fails_the_whole_summarization() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = QuizPipeline::new(
        &test_config(dir.path()),
        Arc::new(FailingInvoker { poison: "cccc" }),
    );

    let result = pipeline.summarize("aaaa bbbb cccc dddd").await;
    assert!(result.is_err(), "第二个分片失败必须导致整批失败");
}

#[tokio::test]
async fn test_generated_quiz_text_round_trips_through_scorer() {
    // 模拟模型按约定格式产出的两个测验分片拼接后的文本
    let quiz_text = "\
1. First question?
A. x
B. y
C. z
D. w
Answer: B

2. Second question?
A. x
B. y
C. z
D. w
Answer: D
";

    let answer_key = parse_answer_key(quiz_text);
    assert_eq!(answer_key.len(), 2);

    let answers = HashMap::from([
        ("1".to_string(), "b".to_string()),
        ("2".to_string(), "A".to_string()),
    ]);
    let result = score(&answer_key, &answers).unwrap();

    assert_eq!(result.score_line(), "1/2");
    assert_eq!(result.percentage(), "50.00%");
}

/// 需要本机运行着服务（cargo run）和 ollama
#[tokio::test]
#[ignore]
async fn test_live_generate_quiz_endpoint() {
    let _ = tracing_subscriber::fmt::try_init();

    let client = reqwest::Client::new();
    let response = client
        .post("http://127.0.0.1:5000/generate-quiz")
        .json(&serde_json::json!({ "num_questions": 2, "topic": "geography" }))
        .send()
        .await
        .expect("请求失败，请确认服务已启动");

    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    let quiz = body["quiz"].as_str().unwrap();
    println!("生成的测验:\n{}", quiz);
    assert!(!quiz.is_empty());
}
