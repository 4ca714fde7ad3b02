//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 预览链路中的所有“失败”都用同一个枚举承载，但语义分为两类：
//! - 真正的失败：图片读取失败（文件不存在 / I/O 错误）、宿主执行失败、配置错误
//! - 无操作信号：没有图片语法、图片来源不可内联
//!
//! 内联阶段会把前两种以外的分支全部“就地恢复”，调用方拿到的永远是可渲染文本。

/// 预览链路统一错误类型。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    #[error("图片文件不存在：{0}")]
    FileNotFound(String),

    #[error("图片读取失败：{0}")]
    Io(String),

    #[error("文本中没有图片引用")]
    NoImageMatch,

    #[error("图片来源不可内联：{0}")]
    IneligibleImageSource(String),

    #[error("脚本宿主错误：{0}")]
    Host(String),

    #[error("配置错误：{0}")]
    Config(String),

    #[error("后台渲染任务失败：{0}")]
    Background(String),
}

impl PreviewError {
    /// 稳定错误码，供日志与 IPC 层区分分支。
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "file_not_found",
            Self::Io(_) => "io_failure",
            Self::NoImageMatch => "no_image_match",
            Self::IneligibleImageSource(_) => "ineligible_image_source",
            Self::Host(_) => "host",
            Self::Config(_) => "config",
            Self::Background(_) => "background",
        }
    }

    /// 内联阶段可就地恢复（回退为原文）的错误。
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_)
                | Self::Io(_)
                | Self::NoImageMatch
                | Self::IneligibleImageSource(_)
        )
    }

    pub(crate) fn from_io(path: &str, error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound(path.to_string()),
            _ => Self::Io(format!("{}（{}）", path, error)),
        }
    }
}

impl From<PreviewError> for String {
    fn from(error: PreviewError) -> Self {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_io_error_maps_to_file_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(
            PreviewError::from_io("a.png", &err),
            PreviewError::FileNotFound("a.png".to_string())
        );
    }

    #[test]
    fn other_io_errors_map_to_io_failure() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let mapped = PreviewError::from_io("a.png", &err);
        assert_eq!(mapped.code(), "io_failure");
        assert!(mapped.is_recoverable());
    }

    #[test]
    fn host_and_config_errors_are_not_recoverable() {
        assert!(!PreviewError::Host("x".into()).is_recoverable());
        assert!(!PreviewError::Config("x".into()).is_recoverable());
    }
}
