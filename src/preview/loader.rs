//! # Markdown 文件加载
//!
//! ## 设计思路
//!
//! 按行读取文件，每行统一以 `\n` 结尾（`\r\n` 被规范化），
//! 非法 UTF-8 以替换字符解码。读取失败由调用方决定如何降级：
//! 视图层会记录日志并渲染空文档。

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use super::PreviewError;

/// 从路径加载 Markdown 文本。
pub fn read_markdown_path(path: impl AsRef<Path>) -> Result<String, PreviewError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let file = File::open(path).map_err(|e| PreviewError::from_io(&display, &e))?;
    read_markdown(file).map_err(|err| match err {
        PreviewError::Io(detail) => PreviewError::Io(format!("{}：{}", display, detail)),
        other => other,
    })
}

/// 从任意字节源加载 Markdown 文本。
pub fn read_markdown<R: Read>(source: R) -> Result<String, PreviewError> {
    let mut reader = BufReader::new(source);
    let mut text = String::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| PreviewError::Io(e.to_string()))?;
        if read == 0 {
            break;
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }

        text.push_str(&String::from_utf8_lossy(&line));
        text.push('\n');
    }

    Ok(text)
}
