//! # Tauri 命令层
//!
//! ## 设计思路
//!
//! 命令层只做 IPC 参数接收与结果返回，渲染逻辑全部在 `MarkedView` 中。
//! 渲染包含阻塞的文件读取，所以先在锁内拿到后台任务，释放锁后再等待，
//! 最后重新加锁保存并分发结果。并发请求乱序完成时，过期结果由视图按序号丢弃。

use std::sync::{Mutex, MutexGuard};

use tauri::{State, WebviewWindow, Wry};

use crate::error::AppError;
use crate::preview::CapabilityTier;
use crate::view::{MarkedView, load_markdown_or_empty};

/// 预览服务状态，作为 Tauri `State` 注入。
pub struct PreviewServiceState {
    view: Mutex<MarkedView<WebviewWindow<Wry>>>,
}

impl PreviewServiceState {
    /// 以目标窗口为宿主创建服务状态。Tauri 的 webview 支持直接执行脚本。
    pub fn new(window: WebviewWindow<Wry>) -> Self {
        Self::with_tier(window, CapabilityTier::Modern)
    }

    pub fn with_tier(window: WebviewWindow<Wry>, tier: CapabilityTier) -> Self {
        Self {
            view: Mutex::new(MarkedView::new(window, tier)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MarkedView<WebviewWindow<Wry>>>, AppError> {
        self.view
            .lock()
            .map_err(|_| AppError::State("预览视图锁已中毒".to_string()))
    }

    async fn render_and_present(&self, text: String) -> Result<(), AppError> {
        let (ticket, job) = self.lock()?.render_async(text);
        let invocation = job.await?;
        self.lock()?.present_rendered(ticket, invocation)?;
        Ok(())
    }
}

/// 渲染 Markdown 文本。
#[tauri::command]
pub async fn preview_set_text(
    state: State<'_, PreviewServiceState>,
    text: String,
) -> Result<(), AppError> {
    state.render_and_present(text).await
}

/// 从本地路径加载 Markdown 并渲染。
#[tauri::command]
pub async fn preview_load_path(
    state: State<'_, PreviewServiceState>,
    path: String,
) -> Result<(), AppError> {
    let text = tauri::async_runtime::spawn_blocking(move || load_markdown_or_empty(&path))
        .await
        .map_err(|e| AppError::State(format!("后台读取任务失败: {}", e)))?;
    state.render_and_present(text).await
}

/// 禁用代码块滚动（单向）。
#[tauri::command]
pub fn preview_disable_code_scroll(state: State<'_, PreviewServiceState>) -> Result<(), AppError> {
    state.lock()?.disable_code_scroll();
    Ok(())
}

/// 页面加载完成后由前端调用，重放最近一次预览。
#[tauri::command]
pub fn preview_page_finished(state: State<'_, PreviewServiceState>) -> Result<(), AppError> {
    state.lock()?.on_page_finished()?;
    Ok(())
}
