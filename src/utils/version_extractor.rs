//! 版本提取工具模块
//! 从正则捕获结果中按模板拼装版本号，兼容 \1/\2 与 $1/$2 两种分组引用格式，
//! 自动过滤无效版本（未替换/残留占位符/空白）

use regex::Captures;

/// 版本提取工具类
pub struct VersionExtractor;

impl VersionExtractor {
    /// 从正则捕获结果中提取有效版本号
    ///
    /// 返回 None 的情形：模板为空白、没有任何分组发生过有效替换、
    /// 结果为空或仍残留 `\`/`$` 占位符
    pub fn extract(template: &str, captures: &Captures) -> Option<String> {
        if template.trim().is_empty() {
            return None;
        }

        let mut version = template.to_string();
        let mut replaced = false;

        // 分组 0 是整体匹配，不参与版本提取
        for group_index in 1..captures.len() {
            let placeholder_backslash = format!("\\{}", group_index);
            let placeholder_dollar = format!("${}", group_index);

            if let Some(matched) = captures.get(group_index) {
                let matched_str = matched.as_str().trim();
                version = version.replace(&placeholder_backslash, matched_str);
                version = version.replace(&placeholder_dollar, matched_str);
                replaced = true;
            } else {
                // 分组未参与匹配时清空对应占位符
                version = version.replace(&placeholder_backslash, "");
                version = version.replace(&placeholder_dollar, "");
            }
        }

        let final_version = version.trim().to_string();
        let is_valid = replaced
            && !final_version.is_empty()
            && !final_version.contains('\\')
            && !final_version.contains('$');

        is_valid.then_some(final_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_extract_with_dollar_placeholder() {
        let regex = Regex::new(r"core-js@(\d+\.\d+\.\d+)").unwrap();
        let captures = regex.captures("https://unpkg.com/core-js@3.30.1/x.js").unwrap();
        assert_eq!(
            VersionExtractor::extract("$1", &captures),
            Some("3.30.1".to_string())
        );
    }

    #[test]
    fn test_extract_with_backslash_placeholder() {
        let regex = Regex::new(r"fbevents\.js\?v=(\d+\.\d+\.\d+)").unwrap();
        let captures = regex.captures("/fbevents.js?v=2.9.15").unwrap();
        assert_eq!(
            VersionExtractor::extract("\\1", &captures),
            Some("2.9.15".to_string())
        );
    }

    #[test]
    fn test_extract_unmatched_optional_group() {
        // 分组存在但未参与匹配：无有效版本
        let regex = Regex::new(r"nginx(?:/([\d.]+))?").unwrap();
        let captures = regex.captures("nginx").unwrap();
        assert_eq!(VersionExtractor::extract("$1", &captures), None);
    }

    #[test]
    fn test_extract_residual_placeholder_rejected() {
        let regex = Regex::new(r"react-router@(\d+\.\d+\.\d+)").unwrap();
        let captures = regex.captures("react-router@6.4.1").unwrap();
        // $9 没有对应分组，占位符残留 → None
        assert_eq!(VersionExtractor::extract("$9", &captures), None);
    }

    #[test]
    fn test_extract_blank_template() {
        let regex = Regex::new(r"(\d+)").unwrap();
        let captures = regex.captures("v42").unwrap();
        assert_eq!(VersionExtractor::extract("  ", &captures), None);
    }
}
