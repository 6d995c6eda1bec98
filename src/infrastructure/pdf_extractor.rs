//! PDF 文本提取 - 基础设施层
//!
//! 基于 `pdf-extract`，直接从上传的内存字节中提取文本，
//! 不落临时文件

use crate::error::{AppError, AppResult};
use tracing::info;

/// 从 PDF 字节中提取并清洗文本
///
/// # 参数
/// - `bytes`: 完整的 PDF 文件内容
///
/// # 返回
/// 清洗后的文本；PDF 损坏或不可解析时返回提取错误。
/// 注意：返回空字符串不算错误，由调用方判断是否可用
pub fn extract_text(bytes: &[u8]) -> AppResult<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::pdf_extraction_failed(e.to_string()))?;

    info!("✓ PDF 文本提取完成，原始长度: {} 字符", text.len());

    Ok(clean_text(&text))
}

/// 清洗提取出的文本：去掉 NUL 字符并修剪首尾空白
fn clean_text(text: &str) -> String {
    text.replace('\u{0}', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_strips_nul_and_whitespace() {
        assert_eq!(clean_text("  hello\u{0} world\u{0}  \n"), "hello world");
        assert_eq!(clean_text("\u{0}\u{0}"), "");
    }

    #[test]
    fn test_invalid_bytes_report_extraction_error() {
        let result = extract_text(b"this is not a pdf");
        assert!(matches!(
            result,
            Err(AppError::Pdf(crate::error::PdfError::ExtractionFailed { .. }))
        ));
    }
}
