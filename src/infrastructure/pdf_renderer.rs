//! 摘要 PDF 渲染 - 基础设施层
//!
//! 基于 `lopdf` 把摘要文本排成简单的逐行 PDF 文档。
//! 每个请求使用独立的随机文件名，避免并发请求互相覆盖。
//!
//! 版式是固定的（Letter 纸、Helvetica、每行最多 90 字符），
//! 渲染格式本身不是本服务的关注点。

use crate::config::Config;
use crate::error::{AppError, AppResult};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Letter 纸宽（pt）
const PAGE_WIDTH: i64 = 612;
/// Letter 纸高（pt）
const PAGE_HEIGHT: i64 = 792;
/// 页边距（pt）
const MARGIN: i64 = 40;
/// 行距（pt）
const LEADING: i64 = 15;
/// 单行最多保留的字符数，超出截断
const MAX_LINE_CHARS: usize = 90;

/// 摘要 PDF 渲染器
pub struct SummaryRenderer {
    output_dir: PathBuf,
}

impl SummaryRenderer {
    /// 从配置创建渲染器
    pub fn new(config: &Config) -> Self {
        Self {
            output_dir: PathBuf::from(&config.summary_output_dir),
        }
    }

    /// 使用自定义输出目录创建
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 将摘要文本渲染为 PDF 并写入磁盘
    ///
    /// # 参数
    /// - `summary`: 摘要文本，按 `\n` 分行排版
    ///
    /// # 返回
    /// 生成文件的路径，文件名含每请求唯一的 uuid
    pub fn render(&self, summary: &str) -> AppResult<PathBuf> {
        let path = self
            .output_dir
            .join(format!("summary_{}.pdf", Uuid::new_v4()));

        let lines: Vec<String> = summary
            .split('\n')
            .map(|line| line.chars().take(MAX_LINE_CHARS).collect())
            .collect();

        write_document(&lines, &path)?;

        info!("✓ 摘要 PDF 已生成: {}", path.display());
        Ok(path)
    }
}

/// 构建并保存 PDF 文档
fn write_document(lines: &[String], path: &Path) -> AppResult<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    // 首行基线在 height - margin，写到距底边 margin 处换页
    let lines_per_page = (((PAGE_HEIGHT - 2 * MARGIN) / LEADING) + 1) as usize;

    let mut kids: Vec<Object> = Vec::new();
    let mut pages = lines.chunks(lines_per_page);
    // 空摘要也要产出一个空白页
    let first_page: &[String] = pages.next().unwrap_or(&[]);

    for page_lines in std::iter::once(first_page).chain(pages) {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 11.into()]),
            Operation::new("TL", vec![LEADING.into()]),
            Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN).into()]),
        ];
        for line in page_lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| AppError::pdf_render_failed(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path)
        .map_err(|e| AppError::pdf_render_failed(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_writes_a_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SummaryRenderer::with_output_dir(dir.path());

        let path = renderer
            .render("First paragraph of the summary.\n\nSecond paragraph.")
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_handles_empty_summary() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SummaryRenderer::with_output_dir(dir.path());

        let path = renderer.render("").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_paths_are_unique_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SummaryRenderer::with_output_dir(dir.path());

        let first = renderer.render("same text").unwrap();
        let second = renderer.render("same text").unwrap();
        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
    }

    #[test]
    fn test_long_summary_spans_multiple_pages() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SummaryRenderer::with_output_dir(dir.path());

        let summary = vec!["line"; 200].join("\n");
        let path = renderer.render(&summary).unwrap();

        let doc = Document::load(&path).unwrap();
        assert!(doc.get_pages().len() > 1);
    }
}
