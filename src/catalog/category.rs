//! 技术分类固定枚举
//! 目录中每条签名必须归属其中之一；未知分类在加载期 fail-fast

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CatalogError;

/// 技术分类（封闭枚举，序列化为 kebab-case 标识符）
/// 枚举声明顺序即结果桶的稳定输出顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Frameworks,
    Libraries,
    UiFrameworks,
    Styling,
    Hosting,
    Cdn,
    Analytics,
    Payment,
    Security,
    Paas,
    Tools,
    ReverseProxies,
    CustomerData,
    TagManagers,
    Advertising,
    LiveChat,
    Editors,
    IssueTrackers,
    WebServers,
    StaticGenerators,
    Performance,
    Pwa,
    Misc,
}

impl Category {
    /// 全部分类，按声明顺序
    pub const ALL: [Category; 23] = [
        Category::Frameworks,
        Category::Libraries,
        Category::UiFrameworks,
        Category::Styling,
        Category::Hosting,
        Category::Cdn,
        Category::Analytics,
        Category::Payment,
        Category::Security,
        Category::Paas,
        Category::Tools,
        Category::ReverseProxies,
        Category::CustomerData,
        Category::TagManagers,
        Category::Advertising,
        Category::LiveChat,
        Category::Editors,
        Category::IssueTrackers,
        Category::WebServers,
        Category::StaticGenerators,
        Category::Performance,
        Category::Pwa,
        Category::Misc,
    ];

    /// kebab-case 标识符（与序列化形式一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Frameworks => "frameworks",
            Category::Libraries => "libraries",
            Category::UiFrameworks => "ui-frameworks",
            Category::Styling => "styling",
            Category::Hosting => "hosting",
            Category::Cdn => "cdn",
            Category::Analytics => "analytics",
            Category::Payment => "payment",
            Category::Security => "security",
            Category::Paas => "paas",
            Category::Tools => "tools",
            Category::ReverseProxies => "reverse-proxies",
            Category::CustomerData => "customer-data",
            Category::TagManagers => "tag-managers",
            Category::Advertising => "advertising",
            Category::LiveChat => "live-chat",
            Category::Editors => "editors",
            Category::IssueTrackers => "issue-trackers",
            Category::WebServers => "web-servers",
            Category::StaticGenerators => "static-generators",
            Category::Performance => "performance",
            Category::Pwa => "pwa",
            Category::Misc => "misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| CatalogError::UnknownCategory {
                tech: String::new(),
                category: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_categories_roundtrip() {
        // 每个分类的标识符都能解析回自身
        for cat in Category::ALL {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), cat);
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!("blockchain".parse::<Category>().is_err());
        assert!("Frameworks".parse::<Category>().is_err()); // 大小写敏感
    }

    #[test]
    fn test_category_count_is_closed() {
        assert_eq!(Category::ALL.len(), 23);
    }

    #[test]
    fn test_serialize_matches_as_str() {
        let json = serde_json::to_string(&Category::UiFrameworks).unwrap();
        assert_eq!(json, "\"ui-frameworks\"");
    }
}
