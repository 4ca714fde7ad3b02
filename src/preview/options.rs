//! # 渲染选项
//!
//! `code_scroll_disabled` 是单向开关：默认 `false`，只能被置为 `true`，
//! 没有任何恢复为 `false` 的入口。

/// 渲染选项。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    code_scroll_disabled: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 禁用预览中代码块的横向滚动。重复调用无副作用。
    pub fn disable_code_scroll(&mut self) {
        if !self.code_scroll_disabled {
            log::debug!("🔒 已禁用预览代码块滚动");
        }
        self.code_scroll_disabled = true;
    }

    pub fn code_scroll_disabled(&self) -> bool {
        self.code_scroll_disabled
    }
}
