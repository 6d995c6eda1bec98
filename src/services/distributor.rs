//! 题目分配服务 - 业务能力层
//!
//! 只负责"把总题数尽可能均匀地摊到 N 个分片上"能力

use crate::error::{AppError, AppResult, ConfigError};

/// 将总题数分配到各分片
///
/// 确定性算法：`base = total / chunk_count`，前 `total % chunk_count` 个分片
/// 各多分得一题。保证 `sum(分配结果) == total`，且任意两项相差至多 1。
///
/// # 参数
/// - `total`: 请求的总题数
/// - `chunk_count`: 分片数量
///
/// # 返回
/// 长度为 `chunk_count` 的分配列表；`chunk_count == 0` 时返回配置错误，
/// 调用方必须保证至少存在一个分片
pub fn distribute_questions(total: usize, chunk_count: usize) -> AppResult<Vec<usize>> {
    if chunk_count == 0 {
        return Err(AppError::Config(ConfigError::ZeroChunkCount));
    }

    let base = total / chunk_count;
    let remainder = total % chunk_count;

    Ok((0..chunk_count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect())
}
