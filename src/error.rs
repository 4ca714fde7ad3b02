//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 预览链路内部使用 `PreviewError`，对外入口（命令层、CLI、设置读写）统一返回 `AppError`。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `PreviewError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，满足 IPC 返回值要求。

use serde::Serialize;

use crate::preview::PreviewError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 预览渲染或宿主分发失败
    #[error("{0}")]
    Preview(#[from] PreviewError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件读写失败
    #[error("设置错误: {0}")]
    Settings(String),

    /// 共享状态不可用（锁中毒等）
    #[error("状态不可用: {0}")]
    State(String),
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
