//! # Markdown 预览视图
//!
//! ## 设计思路
//!
//! `MarkedView` 是一次预览会话的唯一状态持有者：
//! - 渲染选项（`code_scroll_disabled` 单向开关）
//! - 宿主档位（初始化时确定，之后不变）
//! - 最近一次生成的调用字符串（`preview_text`），宿主就绪时原样重放
//!
//! ## 实现思路
//!
//! - 所有写入都经过 `&mut self`，调用字符串在一次赋值中整体替换，不存在读到一半的状态
//! - 后台渲染领取递增的 `RenderTicket`；完成时若已有更新的渲染发起，结果直接丢弃，
//!   保证保存的调用始终对应最后提交的文本
//! - 每次渲染后立即分发；宿主尚未就绪导致的丢失由 `on_page_finished` 重放兜底
//! - 文件加载失败只记录日志并渲染空文档

use std::io::Read;
use std::path::Path;

use crate::host::ScriptHost;
use crate::preview::{
    CapabilityTier, FsImageReader, ImageReader, InvocationString, PreviewError, RenderOptions,
    RenderPipeline, read_markdown, read_markdown_path,
};

/// 从路径加载 Markdown，失败时记录日志并返回空文本。
pub fn load_markdown_or_empty(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match read_markdown_path(path) {
        Ok(text) => text,
        Err(err) => {
            log::error!("❌ 读取 Markdown 文件失败 - 路径: {} 错误: {}", path.display(), err);
            String::new()
        }
    }
}

/// 一次渲染请求的序号，越大越新。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderTicket(u64);

/// Markdown 预览视图。
pub struct MarkedView<H, R = FsImageReader> {
    host: H,
    pipeline: RenderPipeline<R>,
    tier: CapabilityTier,
    options: RenderOptions,
    preview_text: Option<InvocationString>,
    latest_ticket: RenderTicket,
}

impl<H: ScriptHost> MarkedView<H, FsImageReader> {
    /// 使用本地文件系统读取图片。
    ///
    /// # 示例
    /// ```rust
    /// use marked_view::host::RecordingHost;
    /// use marked_view::preview::CapabilityTier;
    /// use marked_view::view::MarkedView;
    ///
    /// let mut view = MarkedView::new(RecordingHost::new(), CapabilityTier::Modern);
    /// view.set_text("# hello")?;
    /// assert_eq!(view.host().calls().len(), 1);
    /// # Ok::<(), marked_view::preview::PreviewError>(())
    /// ```
    pub fn new(host: H, tier: CapabilityTier) -> Self {
        Self::with_pipeline(host, tier, RenderPipeline::new())
    }

    /// 根据宿主 API 级别确定档位。
    pub fn for_api_level(host: H, api_level: u32) -> Self {
        Self::new(host, CapabilityTier::from_api_level(api_level))
    }
}

impl<H: ScriptHost, R: ImageReader> MarkedView<H, R> {
    pub fn with_pipeline(host: H, tier: CapabilityTier, pipeline: RenderPipeline<R>) -> Self {
        log::debug!("🪟 创建预览视图 - 档位: {}", tier.as_str());
        Self {
            host,
            pipeline,
            tier,
            options: RenderOptions::new(),
            preview_text: None,
            latest_ticket: RenderTicket(0),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn tier(&self) -> CapabilityTier {
        self.tier
    }

    pub fn code_scroll_disabled(&self) -> bool {
        self.options.code_scroll_disabled()
    }

    /// 最近一次生成的调用字符串。
    pub fn preview_text(&self) -> Option<&InvocationString> {
        self.preview_text.as_ref()
    }

    /// 禁用代码块滚动，只影响之后的渲染。
    pub fn disable_code_scroll(&mut self) {
        self.options.disable_code_scroll();
    }

    /// 按当前选项与档位渲染，不修改视图状态。
    pub fn render(&self, text: &str) -> InvocationString {
        self.pipeline
            .render(text, self.options.code_scroll_disabled(), self.tier)
    }

    fn issue_ticket(&mut self) -> RenderTicket {
        self.latest_ticket = RenderTicket(self.latest_ticket.0 + 1);
        self.latest_ticket
    }

    /// 保存调用字符串并立即分发给宿主。
    ///
    /// 直接提交的结果视为最新，尚未完成的后台渲染随之作废。
    pub fn present(&mut self, invocation: InvocationString) -> Result<(), PreviewError> {
        self.issue_ticket();
        self.store_and_dispatch(invocation)
    }

    /// 提交后台渲染结果。序号落后于最新请求时丢弃，返回 `Ok(false)`。
    pub fn present_rendered(
        &mut self,
        ticket: RenderTicket,
        invocation: InvocationString,
    ) -> Result<bool, PreviewError> {
        if ticket < self.latest_ticket {
            log::debug!(
                "⏭️ 丢弃过期渲染结果 - 序号: {} 最新: {}",
                ticket.0,
                self.latest_ticket.0
            );
            return Ok(false);
        }
        self.store_and_dispatch(invocation)?;
        Ok(true)
    }

    fn store_and_dispatch(&mut self, invocation: InvocationString) -> Result<(), PreviewError> {
        let invocation = self.preview_text.insert(invocation);
        self.host.dispatch(invocation)
    }

    /// 渲染 Markdown 文本。
    pub fn set_text(&mut self, text: &str) -> Result<(), PreviewError> {
        let invocation = self.render(text);
        self.present(invocation)
    }

    /// 从路径加载 Markdown 并渲染；读取失败时渲染空文档。
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), PreviewError> {
        let text = load_markdown_or_empty(path);
        self.set_text(&text)
    }

    /// 从已打开的文件句柄加载 Markdown 并渲染；读取失败时渲染空文档。
    pub fn load_from_file<F: Read>(&mut self, file: F) -> Result<(), PreviewError> {
        let text = read_markdown(file).unwrap_or_else(|err| {
            log::error!("❌ 读取 Markdown 内容失败：{}", err);
            String::new()
        });
        self.set_text(&text)
    }

    /// 宿主页面加载完成：重放最近一次调用。
    pub fn on_page_finished(&self) -> Result<(), PreviewError> {
        match &self.preview_text {
            Some(invocation) => {
                log::debug!("🔁 页面就绪，重放预览调用");
                self.host.dispatch(invocation)
            }
            None => Ok(()),
        }
    }
}

impl<H, R> MarkedView<H, R>
where
    H: ScriptHost,
    R: ImageReader + Clone + Send + Sync + 'static,
{
    /// 发起后台渲染，返回本次请求的序号与渲染任务。
    ///
    /// 任务不借用视图，可以在释放锁之后再等待；结果交给 `present_rendered` 提交。
    pub fn render_async(
        &mut self,
        text: String,
    ) -> (
        RenderTicket,
        impl Future<Output = Result<InvocationString, PreviewError>> + Send + use<H, R>,
    ) {
        let ticket = self.issue_ticket();
        let pipeline = self.pipeline.clone();
        let code_scroll_disabled = self.options.code_scroll_disabled();
        let tier = self.tier;
        let job = async move { pipeline.render_async(text, code_scroll_disabled, tier).await };
        (ticket, job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, RecordingHost};
    use crate::preview::MemoryImageReader;

    fn memory_view(tier: CapabilityTier) -> MarkedView<RecordingHost, MemoryImageReader> {
        let reader = MemoryImageReader::new().with_file("img.png", vec![0x01, 0x02]);
        MarkedView::with_pipeline(RecordingHost::new(), tier, RenderPipeline::with_reader(reader))
    }

    #[test]
    fn page_finished_before_any_render_dispatches_nothing() {
        let view = memory_view(CapabilityTier::Modern);
        view.on_page_finished().expect("replay failed");
        assert!(view.host().calls().is_empty());
    }

    #[test]
    fn set_text_stores_and_dispatches() {
        let mut view = memory_view(CapabilityTier::Modern);
        view.set_text("![x](img.png)").expect("set_text failed");

        let expected = "preview('![x](data:image/png;base64,AQI=)', false)";
        assert_eq!(view.preview_text().map(|p| p.as_str()), Some(expected));
        assert_eq!(view.host().calls(), vec![HostCall::Evaluate(expected.to_string())]);
    }

    #[test]
    fn page_finished_replays_last_invocation() {
        let mut view = memory_view(CapabilityTier::Legacy);
        view.set_text("first").expect("set_text failed");
        view.set_text("second").expect("set_text failed");
        view.on_page_finished().expect("replay failed");

        let calls = view.host().calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[2],
            HostCall::Navigate("javascript:preview('second', false)".to_string())
        );
    }

    #[test]
    fn code_scroll_flag_applies_to_later_renders() {
        let mut view = memory_view(CapabilityTier::Modern);
        view.set_text("a").expect("set_text failed");
        view.disable_code_scroll();
        view.set_text("a").expect("set_text failed");

        let calls = view.host().calls();
        assert_eq!(calls[0].script(), "preview('a', false)");
        assert_eq!(calls[1].script(), "preview('a', true)");
        assert!(view.code_scroll_disabled());
    }

    #[test]
    fn missing_markdown_file_renders_empty_document() {
        let mut view = memory_view(CapabilityTier::Modern);
        view.load_from_path("/no/such/file.md").expect("load failed");
        assert_eq!(
            view.preview_text().map(|p| p.as_str()),
            Some("preview('', false)")
        );
    }

    #[test]
    fn load_from_file_normalizes_lines() {
        let mut view = memory_view(CapabilityTier::Modern);
        view.load_from_file(std::io::Cursor::new("# t\r\nit's"))
            .expect("load failed");
        assert_eq!(
            view.preview_text().map(|p| p.as_str()),
            Some("preview('# t\\nit\\'s\\n', false)")
        );
    }

    #[test]
    fn api_level_constructor_picks_tier() {
        let view = MarkedView::for_api_level(RecordingHost::new(), 16);
        assert_eq!(view.tier(), CapabilityTier::Legacy);
    }

    #[tokio::test]
    async fn render_async_then_present() {
        let mut view = memory_view(CapabilityTier::Modern);
        let (ticket, job) = view.render_async("![x](img.png)".to_string());
        let invocation = job.await.expect("background render failed");
        assert!(view.present_rendered(ticket, invocation).expect("present failed"));

        assert_eq!(
            view.host().calls()[0].script(),
            "preview('![x](data:image/png;base64,AQI=)', false)"
        );
    }

    #[tokio::test]
    async fn slower_older_render_does_not_overwrite_newer() {
        let mut view = memory_view(CapabilityTier::Modern);
        let (first_ticket, first_job) = view.render_async("first".to_string());
        let (second_ticket, second_job) = view.render_async("second".to_string());

        let second = second_job.await.expect("background render failed");
        assert!(view.present_rendered(second_ticket, second).expect("present failed"));
        let first = first_job.await.expect("background render failed");
        assert!(!view.present_rendered(first_ticket, first).expect("present failed"));

        assert_eq!(
            view.preview_text().map(|p| p.as_str()),
            Some("preview('second', false)")
        );
        assert_eq!(view.host().calls().len(), 1);

        view.on_page_finished().expect("replay failed");
        assert_eq!(view.host().calls()[1].script(), "preview('second', false)");
    }

    #[tokio::test]
    async fn direct_set_text_supersedes_pending_render() {
        let mut view = memory_view(CapabilityTier::Modern);
        let (ticket, job) = view.render_async("background".to_string());
        view.set_text("direct").expect("set_text failed");

        let late = job.await.expect("background render failed");
        assert!(!view.present_rendered(ticket, late).expect("present failed"));
        assert_eq!(
            view.preview_text().map(|p| p.as_str()),
            Some("preview('direct', false)")
        );
    }

    #[test]
    fn tickets_increase_per_request() {
        let mut view = memory_view(CapabilityTier::Modern);
        let (a, _) = view.render_async("a".to_string());
        let (b, _) = view.render_async("b".to_string());
        assert!(a < b);
    }
}
