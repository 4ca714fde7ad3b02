//! 预览设置模块
//!
//! # 设计思路
//!
//! 设置文件是一个 JSON 对象，只描述两件事：
//! - 是否禁用代码块滚动（只能打开，不能在运行中关闭）
//! - 宿主档位（显式指定，或由宿主 API 级别推导）
//!
//! # 实现思路
//!
//! - 文件不存在时返回默认值；JSON 格式错误返回 `AppError::Settings`。
//! - `apply_to` 只会调用视图的单向开关，不会把已禁用的滚动恢复。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::host::ScriptHost;
use crate::preview::{CapabilityTier, ImageReader};
use crate::view::MarkedView;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSettings {
    #[serde(default)]
    pub code_scroll_disabled: bool,
    #[serde(default)]
    pub host_api_level: Option<u32>,
    #[serde(default)]
    pub tier: Option<CapabilityTier>,
}

impl PreviewSettings {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("设置文件不存在，使用默认设置：{}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 显式档位优先，其次按 API 级别推导，默认 Modern。
    pub fn resolve_tier(&self) -> CapabilityTier {
        match (self.tier, self.host_api_level) {
            (Some(tier), _) => tier,
            (None, Some(level)) => CapabilityTier::from_api_level(level),
            (None, None) => CapabilityTier::default(),
        }
    }

    pub fn apply_to<H: ScriptHost, R: ImageReader>(&self, view: &mut MarkedView<H, R>) {
        if self.code_scroll_disabled {
            view.disable_code_scroll();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let settings =
            PreviewSettings::load_from_path(dir.path().join("settings.json")).expect("load failed");
        assert_eq!(settings, PreviewSettings::default());
        assert_eq!(settings.resolve_tier(), CapabilityTier::Modern);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("settings.json");
        let settings = PreviewSettings {
            code_scroll_disabled: true,
            host_api_level: Some(16),
            tier: None,
        };

        settings.save_to_path(&path).expect("save failed");
        let loaded = PreviewSettings::load_from_path(&path).expect("load failed");

        assert_eq!(loaded, settings);
        assert_eq!(loaded.resolve_tier(), CapabilityTier::Legacy);
    }

    #[test]
    fn explicit_tier_overrides_api_level() {
        let settings: PreviewSettings =
            serde_json::from_str(r#"{"host_api_level": 10, "tier": "modern"}"#).expect("parse failed");
        assert_eq!(settings.resolve_tier(), CapabilityTier::Modern);
    }

    #[test]
    fn malformed_json_is_settings_error() {
        let dir = tempfile::tempdir().expect("create temp dir failed");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").expect("write failed");

        assert!(matches!(
            PreviewSettings::load_from_path(&path),
            Err(AppError::Settings(_))
        ));
    }

    #[test]
    fn applying_defaults_never_clears_sticky_flag() {
        let mut view = MarkedView::new(RecordingHost::new(), CapabilityTier::Modern);
        view.disable_code_scroll();

        PreviewSettings::default().apply_to(&mut view);

        assert!(view.code_scroll_disabled());
    }
}
