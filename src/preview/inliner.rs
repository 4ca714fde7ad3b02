//! # 图片内联模块
//!
//! ## 设计思路
//!
//! 在文本进入脚本调用之前，把本地图片引用替换为 Base64 Data URI，
//! 使页面脚本无需任何文件访问权限即可显示图片。
//!
//! ## 实现思路
//!
//! 1. 非贪婪正则只取**第一处** `![alt](path)`，每次调用只处理一张图片
//! 2. 远程地址或不支持的扩展名直接放行
//! 3. 通过 `ImageReader` 读取完整字节，失败时记录日志并返回原文
//! 4. 标准 Base64（无换行）编码并加 MIME 前缀
//! 5. 对全文做子串替换：所有出现 `path` 的位置都会被替换

use base64::{Engine as _, engine::general_purpose};
use once_cell::sync::Lazy;
use regex::Regex;

use super::source::{EncodedImage, ImageReference};
use super::{FsImageReader, ImageReader, PreviewError};

/// `.` 不跨行，`(.*?)` 保证取到最短的 alt 与 path。
static IMAGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());

/// 查找文本中的第一处图片引用。
pub fn find_first_image(text: &str) -> Option<ImageReference<'_>> {
    let captures = IMAGE_PATTERN.captures(text)?;
    Some(ImageReference {
        alt_text: captures.get(1).map_or("", |m| m.as_str()),
        path: captures.get(2).map_or("", |m| m.as_str()),
    })
}

/// 图片内联器。
///
/// 不持有任何跨调用状态，编码结果每次重新计算。
#[derive(Debug, Clone, Default)]
pub struct ImageInliner<R = FsImageReader> {
    reader: R,
}

impl ImageInliner<FsImageReader> {
    pub fn new() -> Self {
        Self {
            reader: FsImageReader,
        }
    }
}

impl<R: ImageReader> ImageInliner<R> {
    pub fn with_reader(reader: R) -> Self {
        Self { reader }
    }

    /// 内联第一处本地图片，任何失败都回退为原文。
    ///
    /// # 示例
    /// ```rust
    /// use marked_view::preview::ImageInliner;
    ///
    /// let inliner = ImageInliner::new();
    /// let text = "![logo](https://example.com/logo.png)";
    /// assert_eq!(inliner.inline(text), text);
    /// ```
    pub fn inline(&self, text: &str) -> String {
        match self.try_inline(text) {
            Ok(inlined) => inlined,
            Err(PreviewError::NoImageMatch) => text.to_string(),
            Err(err @ PreviewError::IneligibleImageSource(_)) => {
                log::debug!("⏭️ 跳过图片内联：{}", err);
                text.to_string()
            }
            Err(err) => {
                log::warn!("⚠️ 图片内联失败，保留原始引用：{}", err);
                text.to_string()
            }
        }
    }

    /// 与 `inline` 相同，但把跳过或失败的原因以错误形式返回。
    pub fn try_inline(&self, text: &str) -> Result<String, PreviewError> {
        let reference = find_first_image(text).ok_or(PreviewError::NoImageMatch)?;
        let (encoded, byte_len) = self.encode_with_len(&reference)?;

        log::info!(
            "🖼️ 已内联图片 - 路径: {} 字节数: {}",
            reference.path,
            byte_len
        );

        Ok(text.replace(reference.path, &encoded.data_uri))
    }

    /// 读取并编码单个图片引用。
    pub fn encode(&self, reference: &ImageReference<'_>) -> Result<EncodedImage, PreviewError> {
        self.encode_with_len(reference).map(|(encoded, _)| encoded)
    }

    /// 编码结果与原始字节数。
    fn encode_with_len(
        &self,
        reference: &ImageReference<'_>,
    ) -> Result<(EncodedImage, usize), PreviewError> {
        let kind = reference.classify()?;
        let bytes = self.reader.read_all_bytes(reference.path)?;

        warn_on_signature_mismatch(reference.path, kind.sniff_mime(), &bytes);

        let mut data_uri = String::with_capacity(kind.data_uri_prefix().len() + bytes.len() * 4 / 3 + 4);
        data_uri.push_str(kind.data_uri_prefix());
        general_purpose::STANDARD.encode_string(&bytes, &mut data_uri);

        Ok((EncodedImage { kind, data_uri }, bytes.len()))
    }
}

/// 扩展名决定 MIME，文件签名只用于诊断。
fn warn_on_signature_mismatch(path: &str, expected_mime: &str, bytes: &[u8]) {
    if bytes.is_empty() {
        log::debug!("图片文件为空，将输出空负载：{}", path);
        return;
    }

    match infer::get(bytes) {
        Some(kind) if kind.mime_type() != expected_mime => {
            log::warn!(
                "⚠️ 图片签名与扩展名不一致 - 路径: {} 扩展名: {} 实际: {}",
                path,
                expected_mime,
                kind.mime_type()
            );
        }
        Some(_) => {}
        None => log::debug!("无法识别图片签名：{}", path),
    }
}
