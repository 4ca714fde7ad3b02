//! # 脚本调用构建
//!
//! ## 设计思路
//!
//! 页面脚本暴露全局函数 `preview(markdown, disableCodeScroll)`，函数名与参数个数固定。
//! 宿主能力分两档：
//! - `Legacy`：只能通过导航 `javascript:` 伪地址执行脚本，需要前缀
//! - `Modern`：可直接执行脚本，不需要前缀
//!
//! 档位在宿主初始化时确定一次，之后显式传入，不做全局版本查询。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PreviewError;

/// 页面脚本约定的入口函数名。
pub const PREVIEW_FUNCTION: &str = "preview";

/// 低于该 API 级别的宿主只支持导航式执行。
pub const DIRECT_EVAL_MIN_API_LEVEL: u32 = 19;

/// 宿主脚本执行能力档位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityTier {
    Legacy,
    #[default]
    Modern,
}

impl CapabilityTier {
    /// 根据宿主 API 级别选择档位。
    pub fn from_api_level(level: u32) -> Self {
        if level < DIRECT_EVAL_MIN_API_LEVEL {
            Self::Legacy
        } else {
            Self::Modern
        }
    }

    pub fn from_str(tier: &str) -> Result<Self, PreviewError> {
        match tier.trim().to_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "modern" => Ok(Self::Modern),
            other => Err(PreviewError::Config(format!(
                "未知宿主档位：{}（可选：legacy / modern）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Modern => "modern",
        }
    }

    fn script_prefix(self) -> &'static str {
        match self {
            Self::Legacy => "javascript:",
            Self::Modern => "",
        }
    }
}

/// 最终交给宿主的调用字符串。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationString {
    tier: CapabilityTier,
    script: String,
}

impl InvocationString {
    /// 构建调用字符串。`escaped` 必须已经过 `escape_for_script`。
    ///
    /// # 示例
    /// ```rust
    /// use marked_view::preview::{CapabilityTier, InvocationString};
    ///
    /// let call = InvocationString::build("# hi", true, CapabilityTier::Legacy);
    /// assert_eq!(call.as_str(), "javascript:preview('# hi', true)");
    /// ```
    pub fn build(escaped: &str, code_scroll_disabled: bool, tier: CapabilityTier) -> Self {
        let script = format!(
            "{}{}('{}', {})",
            tier.script_prefix(),
            PREVIEW_FUNCTION,
            escaped,
            code_scroll_disabled
        );
        Self { tier, script }
    }

    pub fn tier(&self) -> CapabilityTier {
        self.tier
    }

    pub fn as_str(&self) -> &str {
        &self.script
    }

    pub fn into_string(self) -> String {
        self.script
    }
}

impl fmt::Display for InvocationString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.script)
    }
}

impl AsRef<str> for InvocationString {
    fn as_ref(&self) -> &str {
        &self.script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_tier_has_javascript_prefix() {
        let call = InvocationString::build("esc", true, CapabilityTier::Legacy);
        assert_eq!(call.as_str(), "javascript:preview('esc', true)");
    }

    #[test]
    fn modern_tier_has_no_prefix() {
        let call = InvocationString::build("esc", false, CapabilityTier::Modern);
        assert_eq!(call.to_string(), "preview('esc', false)");
        assert_eq!(call.tier(), CapabilityTier::Modern);
    }

    #[test]
    fn api_level_selects_tier() {
        assert_eq!(CapabilityTier::from_api_level(18), CapabilityTier::Legacy);
        assert_eq!(CapabilityTier::from_api_level(19), CapabilityTier::Modern);
        assert_eq!(CapabilityTier::from_api_level(34), CapabilityTier::Modern);
    }

    #[test]
    fn tier_parses_from_settings_string() {
        assert_eq!(CapabilityTier::from_str(" Legacy "), Ok(CapabilityTier::Legacy));
        assert_eq!(CapabilityTier::Modern.as_str(), "modern");
        assert!(matches!(
            CapabilityTier::from_str("ancient"),
            Err(PreviewError::Config(_))
        ));
    }
}
