//! # Markdown 预览桥：库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              Webview 页面 (marked.js 等渲染脚本)          │
//! │                                                          │
//! │        window.preview(markdown, disableCodeScroll)       │
//! └───────────────────────────┬──────────────────────────────┘
//!                             ↑ javascript: 导航 / 直接 eval
//! ┌───────────────────────────┼──────────────────────────────┐
//! │                     后端 (Rust)                          │
//! │                                                          │
//! │  ┌─ host ─────────── ScriptHost（Recording / Tauri）      │
//! │  │                                                       │
//! │  ├─ view ─────────── MarkedView（选项 + 最近一次调用）    │
//! │  │                                                       │
//! │  ├─ preview ──────── 内联图片 → 转义 → 构建调用           │
//! │  │                                                       │
//! │  ├─ settings ─────── JSON 设置读写                        │
//! │  └─ error ────────── AppError (统一错误类型)              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`preview`] | 文本到脚本调用的转换流水线 |
//! | [`view`] | 预览会话状态、加载入口、就绪重放 |
//! | [`host`] | 脚本宿主 trait 与适配实现 |
//! | [`settings`] | 预览设置的读取、保存与应用 |
//! | `commands` | Tauri 命令（`tauri` feature） |

pub mod error;
pub mod host;
pub mod preview;
pub mod settings;
pub mod view;

#[cfg(feature = "tauri")]
pub mod commands;
