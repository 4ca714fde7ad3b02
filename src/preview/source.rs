//! # 图片引用与中间模型
//!
//! ## 设计思路
//!
//! 将“文本中的图片引用”和“内联结果”解耦：
//! - `ImageReference` 表示一次正则命中（只在内联过程中存在）
//! - `ImageKind` 表示按扩展名判定出的可内联格式
//! - `EncodedImage` 表示已编码的 Data URI，用完即弃，不做跨调用缓存

use super::PreviewError;

/// Markdown 图片引用 `![alt](path)` 的一次命中。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference<'a> {
    /// 替代文本（下游不使用）。
    pub alt_text: &'a str,
    /// 图片路径，可能是 URL 或本地路径。
    pub path: &'a str,
}

/// 可内联的图片格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
}

impl ImageKind {
    /// 按扩展名（区分大小写、严格后缀匹配）判定格式。
    pub fn from_path(path: &str) -> Option<Self> {
        if path.ends_with(".png") {
            Some(Self::Png)
        } else if path.ends_with(".jpg") || path.ends_with(".jpeg") {
            Some(Self::Jpeg)
        } else if path.ends_with(".gif") {
            Some(Self::Gif)
        } else {
            None
        }
    }

    /// Data URI 前缀。JPEG 固定输出 `image/jpg`，与页面脚本约定一致。
    pub fn data_uri_prefix(self) -> &'static str {
        match self {
            Self::Png => "data:image/png;base64,",
            Self::Jpeg => "data:image/jpg;base64,",
            Self::Gif => "data:image/gif;base64,",
        }
    }

    /// 与 `infer` 嗅探结果比对用的标准 MIME。
    pub(crate) fn sniff_mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }
}

impl<'a> ImageReference<'a> {
    pub fn is_remote(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }

    /// 判定引用是否可内联：远程地址与不支持的扩展名都返回
    /// `PreviewError::IneligibleImageSource`。
    pub fn classify(&self) -> Result<ImageKind, PreviewError> {
        if self.is_remote() {
            return Err(PreviewError::IneligibleImageSource(format!(
                "远程地址不内联：{}",
                self.path
            )));
        }

        ImageKind::from_path(self.path).ok_or_else(|| {
            PreviewError::IneligibleImageSource(format!("不支持的扩展名：{}", self.path))
        })
    }
}

/// 已编码的 Data URI。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub kind: ImageKind,
    pub data_uri: String,
}
