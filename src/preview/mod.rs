//! # 预览渲染模块（preview）
//!
//! ## 设计思路
//!
//! 该模块把“Markdown 文本 → 宿主脚本调用”拆成几个单一职责的子模块：
//!
//! - `inliner`：查找第一处本地图片并替换为 Base64 Data URI
//! - `escape`：为单引号脚本字面量做最小转义
//! - `invocation`：按宿主能力档位构建 `preview(...)` 调用
//! - `pipeline`：固定顺序编排以上三步，并提供后台执行入口
//! - `reader`：文件读取协作者（可替换为内存实现）
//! - `loader`：Markdown 文件按行加载
//! - `options/source/error`：选项、中间模型、错误
//!
//! ## 新同事快速上手
//!
//! ```text
//! MarkedView::set_text
//!    ↓
//! pipeline.rs（编排）
//!    ├─ inliner.rs（正则命中 → reader 读取 → Base64）
//!    ├─ escape.rs（\n / ' / \r）
//!    └─ invocation.rs（javascript: 前缀与否）
//!    ↓
//! InvocationString → ScriptHost
//! ```
//!
//! 所有图片相关失败都在内联阶段就地恢复，调用方永远拿到可执行的调用字符串。

mod error;
mod escape;
mod inliner;
mod invocation;
mod loader;
mod options;
mod pipeline;
mod reader;
mod source;

pub use error::PreviewError;
pub use escape::escape_for_script;
pub use inliner::{ImageInliner, find_first_image};
pub use invocation::{CapabilityTier, DIRECT_EVAL_MIN_API_LEVEL, InvocationString, PREVIEW_FUNCTION};
pub use loader::{read_markdown, read_markdown_path};
pub use options::RenderOptions;
pub use pipeline::{RenderPipeline, render};
pub use reader::{FsImageReader, ImageReader, MemoryImageReader};
pub use source::{EncodedImage, ImageKind, ImageReference};
