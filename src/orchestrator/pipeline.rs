//! 测验流水线 - 编排层
//!
//! ## 职责
//!
//! 编排"PDF -> 摘要 -> 测验"的完整流程：
//!
//! 1. 提取 PDF 文本并校验非空
//! 2. 切分原文 -> 并行摘要各分片 -> 按分片顺序拼接
//! 3. 渲染摘要 PDF（每请求唯一路径）
//! 4. 重新切分摘要 -> 计算题目分配 -> 并行出题 -> 按分片顺序拼接
//!
//! 每个阶段快速失败并中止整个请求，不返回部分结果。
//! 两个扇出阶段彼此串行，阶段内部全并行。
//! 不持有任何进程级共享状态，全部并发都以请求为作用域。

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::pdf_extractor;
use crate::infrastructure::{ModelInvoker, SummaryRenderer};
use crate::orchestrator::fanout::run_all;
use crate::services::{chunker, distributor, prompts};
use std::sync::Arc;
use tracing::{debug, info};

/// 流水线产出
#[derive(Debug)]
pub struct PipelineOutput {
    /// 拼接后的完整摘要
    pub summary: String,
    /// 拼接后的完整测验文本
    pub quiz: String,
    /// 摘要 PDF 的落盘路径
    pub summary_pdf_path: String,
}

/// 测验流水线
///
/// - 只做流程编排，不关心模型如何被调用
/// - 模型调用通过 [`ModelInvoker`] 能力接口注入
pub struct QuizPipeline {
    invoker: Arc<dyn ModelInvoker>,
    renderer: SummaryRenderer,
    chunk_size: usize,
    max_concurrent: usize,
    verbose_logging: bool,
}

impl QuizPipeline {
    /// 创建新的流水线
    pub fn new(config: &Config, invoker: Arc<dyn ModelInvoker>) -> Self {
        Self {
            invoker,
            renderer: SummaryRenderer::new(config),
            chunk_size: config.chunk_size,
            max_concurrent: config.max_concurrent_invocations,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 处理一份上传的 PDF：提取、摘要、渲染、出题
    ///
    /// # 参数
    /// - `pdf_bytes`: 上传的 PDF 文件内容
    /// - `num_questions`: 请求的总题数
    pub async fn process_pdf(
        &self,
        pdf_bytes: &[u8],
        num_questions: usize,
    ) -> AppResult<PipelineOutput> {
        let text = pdf_extractor::extract_text(pdf_bytes)?;
        if text.is_empty() {
            return Err(AppError::empty_input(
                "The PDF file is empty or contains non-extractable text.",
            ));
        }

        let summary = self.summarize(&text).await?;
        info!("✓ 摘要生成完成，共 {} 字符", summary.len());

        let pdf_path = self.renderer.render(&summary)?;

        let quiz = self.generate_quiz(&summary, num_questions).await?;
        info!("✓ 全部测验分片生成完成");

        Ok(PipelineOutput {
            summary,
            quiz,
            summary_pdf_path: pdf_path.display().to_string(),
        })
    }

    /// 对长文本做分片摘要
    ///
    /// 各分片并行调用模型，结果按原文分片顺序用空行拼接
    pub async fn summarize(&self, text: &str) -> AppResult<String> {
        let chunks = chunker::chunk_text(text, self.chunk_size);
        if chunks.is_empty() {
            return Err(AppError::empty_input(
                "No valid text chunks found for summarization.",
            ));
        }

        info!("📄 文本切分为 {} 个分片进行摘要", chunks.len());
        if self.verbose_logging {
            for (index, chunk) in chunks.iter().enumerate() {
                info!("[分片 {}] 长度: {} 字符", index + 1, chunk.len());
            }
        }

        let invoker = self.invoker.clone();
        let summaries = run_all(chunks, self.max_concurrent, move |index, chunk| {
            let invoker = invoker.clone();
            async move {
                debug!("[分片 {}] 开始摘要...", index + 1);
                invoker.invoke(&prompts::summarize_prompt(&chunk)).await
            }
        })
        .await?;

        Ok(summaries.join("\n\n"))
    }

    /// 基于摘要生成测验
    ///
    /// 摘要重新切分后，把总题数摊到各分片，逐分片并行出题。
    /// 分配到 0 题的分片同样会发起调用（与既有行为一致）。
    pub async fn generate_quiz(&self, summary: &str, num_questions: usize) -> AppResult<String> {
        let chunks = chunker::chunk_text(summary, self.chunk_size);
        if chunks.is_empty() {
            return Err(AppError::empty_input(
                "The summary is empty; cannot generate a quiz.",
            ));
        }

        let distribution = distributor::distribute_questions(num_questions, chunks.len())?;
        info!(
            "📋 摘要切分为 {} 个分片，题目分配: {:?}",
            chunks.len(),
            distribution
        );

        let inputs: Vec<(String, usize)> = chunks.into_iter().zip(distribution).collect();

        let invoker = self.invoker.clone();
        let outputs = run_all(inputs, self.max_concurrent, move |index, (chunk, count)| {
            let invoker = invoker.clone();
            async move {
                debug!("[分片 {}] 生成 {} 道题...", index + 1, count);
                invoker.invoke(&prompts::quiz_chunk_prompt(&chunk, count)).await
            }
        })
        .await?;

        Ok(outputs.join("\n\n"))
    }

    /// 基于主题直接出题（不经过 PDF / 摘要）
    pub async fn generate_topic_quiz(
        &self,
        num_questions: usize,
        topic: &str,
    ) -> AppResult<String> {
        info!("📝 正在生成 {} 道关于 '{}' 的题目", num_questions, topic);
        self.invoker
            .invoke(&prompts::topic_quiz_prompt(num_questions, topic))
            .await
    }
}
