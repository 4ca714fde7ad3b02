//! # 脚本字符串转义
//!
//! 把文本放进单引号脚本字面量之前的最小转义：
//! 换行 → `\n`，单引号 → `\'`，最后删除所有 `\r`。
//! 不做反斜杠加倍，也不做 HTML 实体转义。

/// 按固定顺序执行三次全量替换。
///
/// # 示例
/// ```rust
/// use marked_view::preview::escape_for_script;
///
/// assert_eq!(escape_for_script("it's\r\nok"), "it\\'s\\nok");
/// ```
pub fn escape_for_script(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\'', "\\'")
        .replace('\r', "")
}
