//! 文本分片服务 - 业务能力层
//!
//! 只负责"把长文本切成有界分片"能力，不关心流程
//!
//! 分片是模型调用的工作单元：按空白字符切词后贪心装包，
//! 保证每个分片不超过最大长度（唯一例外：单个超长词独占一个分片，词不被拆开）

/// 将文本切分为长度受限、按词对齐的分片
///
/// 装包代价模型：当前分片内每个词计 `len(word) + 1`（词后跟一个空格），
/// 再加入下一个词会超过 `max_length` 时强制开启新分片。
///
/// # 参数
/// - `text`: 原始文本
/// - `max_length`: 单个分片的最大字符数
///
/// # 返回
/// 按原文顺序排列的分片列表；空输入返回空列表
pub fn chunk_text(text: &str, max_length: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    // current 的装包代价：sum(len(w) + 1)
    let mut current_cost = 0usize;

    for word in text.split_whitespace() {
        if current_cost + word.len() + 1 <= max_length {
            current_cost += word.len() + 1;
            current.push(word);
        } else {
            if !current.is_empty() {
                chunks.push(current.join(" "));
            }
            current_cost = word.len() + 1;
            current = vec![word];
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_produces_no_chunks() {
        assert!(chunk_text("", 2000).is_empty());
        assert!(chunk_text("   \n\t  ", 2000).is_empty());
    }

    #[test]
    fn test_single_chunk_when_text_fits() {
        let chunks = chunk_text("hello world", 2000);
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_rejoined_chunks_reproduce_word_sequence() {
        let text = "the quick brown fox jumps over the lazy dog and keeps running far away";
        let chunks = chunk_text(text, 20);

        let rejoined = chunks.join(" ");
        let original_words: Vec<&str> = text.split_whitespace().collect();
        let rejoined_words: Vec<&str> = rejoined.split_whitespace().collect();
        assert_eq!(original_words, rejoined_words);
    }

    #[test]
    fn test_no_chunk_exceeds_max_length() {
        let text = "aaa bbb ccc ddd eee fff ggg hhh iii jjj kkk lll mmm nnn";
        for max_length in [8, 12, 20, 33] {
            for chunk in chunk_text(text, max_length) {
                assert!(
                    chunk.len() <= max_length,
                    "分片 {:?} 超过了上限 {}",
                    chunk,
                    max_length
                );
            }
        }
    }

    #[test]
    fn test_boundary_forced_before_overflow() {
        // "aaaa"(5) + "bbbb"(5) = 10 <= 10，"cccc" 会溢出
        let chunks = chunk_text("aaaa bbbb cccc", 10);
        assert_eq!(chunks, vec!["aaaa bbbb".to_string(), "cccc".to_string()]);
    }

    #[test]
    fn test_overlength_word_gets_its_own_chunk() {
        let chunks = chunk_text("short uncharacteristically short", 10);
        assert_eq!(
            chunks,
            vec![
                "short".to_string(),
                "uncharacteristically".to_string(),
                "short".to_string(),
            ]
        );
    }

    #[test]
    fn test_overlength_word_at_start() {
        let chunks = chunk_text("uncharacteristically short", 10);
        assert_eq!(
            chunks,
            vec!["uncharacteristically".to_string(), "short".to_string()]
        );
    }
}
