//! Slug 生成器
//! 从技术展示名称派生机器安全标识符：小写化后，`[a-z0-9]` 之外的
//! 每个字符替换为一个连字符（逐字符替换，不折叠连续连字符）。
//! 纯函数，确定性，无 locale 依赖。

pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect()
}
