//! # 脚本宿主适配
//!
//! ## 设计思路
//!
//! 宿主只需要提供两种能力：导航到伪地址（Legacy 档）或直接执行脚本（Modern 档）。
//! `dispatch` 根据调用字符串自带的档位选择其中一种，视图层不关心宿主细节。
//!
//! ## 实现思路
//!
//! - `ScriptHost`：宿主 trait，默认实现 `dispatch`
//! - `RecordingHost`：把调用记录在内存中，用于无界面环境与测试
//! - 启用 `tauri` feature 时，为 `tauri::WebviewWindow` 实现 `ScriptHost`

use std::sync::Mutex;

use crate::preview::{CapabilityTier, InvocationString, PreviewError};

/// 脚本执行宿主。
pub trait ScriptHost {
    /// Legacy 档：导航到 `javascript:` 伪地址。
    fn navigate(&self, url: &str) -> Result<(), PreviewError>;

    /// Modern 档：在已加载页面中直接执行脚本。
    fn evaluate_script(&self, script: &str) -> Result<(), PreviewError>;

    /// 按调用字符串的档位分发。
    fn dispatch(&self, invocation: &InvocationString) -> Result<(), PreviewError> {
        match invocation.tier() {
            CapabilityTier::Legacy => self.navigate(invocation.as_str()),
            CapabilityTier::Modern => self.evaluate_script(invocation.as_str()),
        }
    }
}

impl<H: ScriptHost + ?Sized> ScriptHost for &H {
    fn navigate(&self, url: &str) -> Result<(), PreviewError> {
        (**self).navigate(url)
    }

    fn evaluate_script(&self, script: &str) -> Result<(), PreviewError> {
        (**self).evaluate_script(script)
    }
}

/// 宿主收到的一次调用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Navigate(String),
    Evaluate(String),
}

impl HostCall {
    pub fn script(&self) -> &str {
        match self {
            Self::Navigate(script) | Self::Evaluate(script) => script,
        }
    }
}

/// 记录型宿主：只保存调用，不执行。
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回目前为止的调用快照。
    pub fn calls(&self) -> Vec<HostCall> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, call: HostCall) -> Result<(), PreviewError> {
        self.calls
            .lock()
            .map_err(|_| PreviewError::Host("调用记录锁已中毒".to_string()))?
            .push(call);
        Ok(())
    }
}

impl ScriptHost for RecordingHost {
    fn navigate(&self, url: &str) -> Result<(), PreviewError> {
        self.record(HostCall::Navigate(url.to_string()))
    }

    fn evaluate_script(&self, script: &str) -> Result<(), PreviewError> {
        self.record(HostCall::Evaluate(script.to_string()))
    }
}

#[cfg(feature = "tauri")]
impl<R: tauri::Runtime> ScriptHost for tauri::WebviewWindow<R> {
    fn navigate(&self, url: &str) -> Result<(), PreviewError> {
        let parsed = tauri::Url::parse(url)
            .map_err(|e| PreviewError::Host(format!("无法解析脚本地址：{}", e)))?;
        let mut window = self.clone();
        tauri::WebviewWindow::navigate(&mut window, parsed)
            .map_err(|e| PreviewError::Host(format!("导航执行脚本失败：{}", e)))
    }

    fn evaluate_script(&self, script: &str) -> Result<(), PreviewError> {
        self.eval(script)
            .map_err(|e| PreviewError::Host(format!("执行脚本失败：{}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_invocation_is_navigated() {
        let host = RecordingHost::new();
        let call = InvocationString::build("x", false, CapabilityTier::Legacy);

        host.dispatch(&call).expect("dispatch failed");

        assert_eq!(
            host.calls(),
            vec![HostCall::Navigate("javascript:preview('x', false)".to_string())]
        );
    }

    #[test]
    fn modern_invocation_is_evaluated() {
        let host = RecordingHost::new();
        let call = InvocationString::build("x", true, CapabilityTier::Modern);

        (&host).dispatch(&call).expect("dispatch failed");

        assert_eq!(host.calls()[0].script(), "preview('x', true)");
        assert!(matches!(host.calls()[0], HostCall::Evaluate(_)));
    }
}
