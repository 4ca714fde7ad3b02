//! # 渲染流水线
//!
//! ## 设计思路
//!
//! 顺序固定为：内联图片 → 转义 → 构建调用。
//! 转义必须在内联之后，Base64 负载只包含 `[A-Za-z0-9+/=]`，转义不会改动它。
//!
//! ## 实现思路
//!
//! - `render` 同步阻塞执行（包含一次文件读取）
//! - `render_async` 把整条链路放到 tokio 阻塞线程池，结果再交回调用方线程

use super::{
    CapabilityTier, FsImageReader, ImageInliner, ImageReader, InvocationString, PreviewError,
    escape_for_script,
};

/// 渲染流水线，组合内联器、转义与调用构建。
#[derive(Debug, Clone, Default)]
pub struct RenderPipeline<R = FsImageReader> {
    inliner: ImageInliner<R>,
}

impl RenderPipeline<FsImageReader> {
    pub fn new() -> Self {
        Self {
            inliner: ImageInliner::new(),
        }
    }
}

impl<R: ImageReader> RenderPipeline<R> {
    pub fn with_reader(reader: R) -> Self {
        Self {
            inliner: ImageInliner::with_reader(reader),
        }
    }

    /// 把 Markdown 文本转换为宿主调用字符串。
    ///
    /// # 示例
    /// ```rust
    /// use marked_view::preview::{CapabilityTier, RenderPipeline};
    ///
    /// let call = RenderPipeline::new().render("it's\n", false, CapabilityTier::Modern);
    /// assert_eq!(call.as_str(), "preview('it\\'s\\n', false)");
    /// ```
    pub fn render(
        &self,
        text: &str,
        code_scroll_disabled: bool,
        tier: CapabilityTier,
    ) -> InvocationString {
        let inlined = self.inliner.inline(text);
        let escaped = escape_for_script(&inlined);
        let invocation = InvocationString::build(&escaped, code_scroll_disabled, tier);

        log::debug!(
            "🧾 生成预览调用 - 档位: {} 原文长度: {} 调用长度: {}",
            tier.as_str(),
            text.len(),
            invocation.as_str().len()
        );

        invocation
    }
}

impl<R> RenderPipeline<R>
where
    R: ImageReader + Clone + Send + Sync + 'static,
{
    /// 在阻塞线程池中执行 `render`，避免文件读取阻塞调用方。
    pub async fn render_async(
        &self,
        text: String,
        code_scroll_disabled: bool,
        tier: CapabilityTier,
    ) -> Result<InvocationString, PreviewError> {
        let pipeline = self.clone();
        tokio::task::spawn_blocking(move || pipeline.render(&text, code_scroll_disabled, tier))
            .await
            .map_err(|e| PreviewError::Background(e.to_string()))
    }
}

/// 使用本地文件系统执行一次完整渲染。
pub fn render(text: &str, code_scroll_disabled: bool, tier: CapabilityTier) -> InvocationString {
    RenderPipeline::new().render(text, code_scroll_disabled, tier)
}
