//! Ollama 模型调用客户端 - 基础设施层
//!
//! 封装对本地 `ollama run <model>` 子进程的一次性调用：
//! 提示词写入 stdin，stdout 为模型输出，非零退出码视为调用失败。
//!
//! 模型调用被抽象为 [`ModelInvoker`] 能力接口，
//! 上层（编排层、并发执行器）不依赖具体实现，测试时可注入 mock。

use crate::config::Config;
use crate::error::{AppError, AppResult, ModelError};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error};

/// 模型调用能力接口
///
/// 一次调用 = 一次请求/响应交换：提示词进，原始文本出。
/// 调用可能很慢（秒级），且每次调用独立可失败。
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// 发送提示词并返回模型的原始响应文本（已去除首尾空白）
    async fn invoke(&self, prompt: &str) -> AppResult<String>;
}

/// 基于本地 ollama 子进程的模型调用客户端
pub struct OllamaInvoker {
    model_name: String,
    timeout_secs: u64,
}

impl OllamaInvoker {
    /// 从配置创建客户端
    pub fn new(config: &Config) -> Self {
        Self {
            model_name: config.model_name.clone(),
            timeout_secs: config.model_timeout_secs,
        }
    }
}

#[async_trait]
impl ModelInvoker for OllamaInvoker {
    async fn invoke(&self, prompt: &str) -> AppResult<String> {
        debug!("正在调用 ollama，模型: {}", self.model_name);

        let mut child = Command::new("ollama")
            .args(["run", &self.model_name])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(AppError::model_spawn_failed)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AppError::internal("模型进程的 stdin 不可用"))?;
        stdin
            .write_all(prompt.as_bytes())
            .await
            .map_err(AppError::model_io_failed)?;
        // 关闭 stdin，通知子进程输入结束
        drop(stdin);

        let output = if self.timeout_secs > 0 {
            match tokio::time::timeout(
                Duration::from_secs(self.timeout_secs),
                child.wait_with_output(),
            )
            .await
            {
                Ok(result) => result.map_err(AppError::model_io_failed)?,
                Err(_) => {
                    error!("模型调用超时 ({}秒)，模型: {}", self.timeout_secs, self.model_name);
                    return Err(AppError::Model(ModelError::Timeout {
                        secs: self.timeout_secs,
                    }));
                }
            }
        } else {
            child
                .wait_with_output()
                .await
                .map_err(AppError::model_io_failed)?
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Ollama 调用失败 (stderr): {}", stderr);
            return Err(AppError::Model(ModelError::InvocationFailed { stderr }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// 检查 ollama 是否已安装并在 PATH 中
///
/// 启动时调用一次，尽早失败
pub async fn check_ollama_installed() -> AppResult<()> {
    let which = if cfg!(windows) { "where" } else { "which" };

    let output = Command::new(which)
        .arg("ollama")
        .output()
        .await
        .map_err(AppError::model_io_failed)?;

    if !output.status.success() {
        error!("未检测到 ollama，请先安装并加入 PATH");
        return Err(AppError::Model(ModelError::NotInstalled));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 需要本机安装 ollama，手动运行：cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_invoke_against_local_ollama() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::default();
        let invoker = OllamaInvoker::new(&config);

        let response = invoker
            .invoke("Reply with the single word: pong")
            .await
            .expect("ollama 调用失败");

        println!("ollama 响应: {}", response);
        assert!(!response.is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn test_check_ollama_installed() {
        assert!(check_ollama_installed().await.is_ok());
    }
}
