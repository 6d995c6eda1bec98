//! 并行扇出执行器 - 编排层
//!
//! ## 职责
//!
//! 把一批相互独立的输入并发地交给同一个异步操作处理，
//! 并按**输入顺序**（而不是完成顺序）收集全部结果。
//!
//! ## 并发模型
//!
//! - 每个输入一个 tokio 任务，用 Semaphore 限制同时在飞的数量
//! - 任务之间没有共享可变状态，各自只产出自己下标位置的结果
//! - 任意一个任务失败，整批以该错误失败，不返回部分结果
//!
//! 摘要扇出和出题扇出走的是同一条路径。

use crate::error::{AppError, AppResult};
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error};

/// 对一批输入并发执行同一个异步操作
///
/// # 参数
/// - `inputs`: 输入序列，决定结果的顺序
/// - `max_concurrent`: 同时在飞的任务上限（按 1 下限截断）
/// - `f`: 对单个输入的异步操作，收到 (下标, 输入)
///
/// # 返回
/// 与输入下标对齐的结果序列；任一任务失败时返回下标最小的那个错误
pub async fn run_all<T, R, F, Fut>(
    inputs: Vec<T>,
    max_concurrent: usize,
    f: F,
) -> AppResult<Vec<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(usize, T) -> Fut,
    Fut: Future<Output = AppResult<R>> + Send + 'static,
{
    if inputs.is_empty() {
        return Ok(Vec::new());
    }

    let total = inputs.len();
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut handles = Vec::with_capacity(total);

    for (index, input) in inputs.into_iter().enumerate() {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| AppError::internal(format!("并发许可获取失败: {}", e)))?;

        let task = f(index, input);
        handles.push(tokio::spawn(async move {
            let _permit = permit;
            task.await
        }));
    }

    debug!("扇出批次: {} 个任务已全部派发", total);

    // 等整批结束后再按输入顺序检查，保证错误取下标最小者
    let mut results = Vec::with_capacity(total);
    for (index, joined) in join_all(handles).await.into_iter().enumerate() {
        match joined {
            Ok(Ok(value)) => results.push(value),
            Ok(Err(e)) => {
                error!("[任务 {}/{}] 执行失败: {}", index + 1, total, e);
                return Err(e);
            }
            Err(e) => {
                error!("[任务 {}/{}] 任务调度失败: {}", index + 1, total, e);
                return Err(AppError::internal(format!("任务执行失败: {}", e)));
            }
        }
    }

    Ok(results)
}
