//! # 文件读取协作者
//!
//! ## 设计思路
//!
//! 内联器只依赖 `ImageReader` trait，不直接调用 `std::fs`。
//! 生产环境使用 `FsImageReader`，测试可以注入内存实现，避免依赖真实磁盘。

use std::collections::HashMap;

use super::PreviewError;

/// 读取图片完整字节的协作者。
///
/// 失败只会是 `FileNotFound` 或 `Io`，内联器对两者一视同仁。
pub trait ImageReader {
    fn read_all_bytes(&self, path: &str) -> Result<Vec<u8>, PreviewError>;
}

/// 基于本地文件系统的读取实现。
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageReader;

impl ImageReader for FsImageReader {
    fn read_all_bytes(&self, path: &str) -> Result<Vec<u8>, PreviewError> {
        std::fs::read(path).map_err(|e| PreviewError::from_io(path, &e))
    }
}

/// 内存读取实现，按路径字符串精确查找。
#[derive(Debug, Clone, Default)]
pub struct MemoryImageReader {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryImageReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), bytes.into());
        self
    }
}

impl ImageReader for MemoryImageReader {
    fn read_all_bytes(&self, path: &str) -> Result<Vec<u8>, PreviewError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| PreviewError::FileNotFound(path.to_string()))
    }
}

impl<R: ImageReader + ?Sized> ImageReader for &R {
    fn read_all_bytes(&self, path: &str) -> Result<Vec<u8>, PreviewError> {
        (**self).read_all_bytes(path)
    }
}
