//! Keyword tables behind the relevance classifier.
//!
//! Every entry is matched as a lower-cased substring of the lower-cased title and/or
//! channel name. Entries must therefore be lower case.

use crate::models::Topic;

/// A title needs at least one of these to count as ETF content.
pub const ETF_KEYWORDS: &[&str] = &[
    "etf", "0050", "0056", "00878", "00919", "00929", "006208", "00713", "台灣50", "高股息",
    "元大", "富邦", "國泰", "群益", "復華", "投資", "理財", "股市", "存股", "配息", "除息",
];

/// Entertainment vocabulary. Shared by the topical and the region check.
pub const ENTERTAINMENT_KEYWORDS: &[&str] = &[
    "poetry", "music", "dance", "game", "funny", "gaming", "遊戲", "舞蹈", "搞笑", "音樂", "歌曲",
    "動漫", "綜藝",
];

/// Channels dropped by the topical check (tip-selling and re-upload channels).
pub const ETF_EXCLUDED_CHANNELS: &[&str] = &[
    "股票老師帶單",
    "飆股密碼",
    "財經新聞搬運站",
    "etf懶人精華",
    "存股社團招募",
];

/// Channels dropped by the region check. Kept apart from [`ETF_EXCLUDED_CHANNELS`]:
/// the two lists were curated separately and intentionally diverge.
pub const REGION_EXCLUDED_CHANNELS: &[&str] = &[
    "股票老師帶單",
    "飆股密碼",
    "財經八卦王",
    "全球華人理財台",
    "海外華人投資",
];

/// Characters that only occur in Simplified Chinese text.
pub const SIMPLIFIED_ONLY_CHARS: &[char] = &[
    '国', '这', '们', '说', '时', '会', '经', '发', '财', '资', '买', '卖', '价', '险', '开', '关',
    '现', '对', '实', '产', '间', '进', '长', '东', '车', '电', '银', '证', '务', '币', '亿', '为',
    '个', '变', '还', '过', '让', '从', '网', '视', '频', '讲', '养', '涨', '盘',
];

/// Hong Kong, Macau, Singapore, Malaysia and Mainland vocabulary.
pub const NON_TAIWAN_REGION_TERMS: &[&str] = &[
    "香港", "港股", "港幣", "恒生", "澳門", "新加坡", "星洲", "獅城", "馬來西亞", "大馬", "吉隆坡",
    "令吉", "內地", "大a", "基民", "北向資金",
];

pub fn topic_keywords(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Active => &[
            "主動式", "主動型", "主動etf", "active", "經理人", "00980a", "00981a", "00982a",
            "00985a",
        ],
        Topic::MultiAsset => &[
            "多資產", "多重資產", "資產配置", "股債", "平衡型", "配置型", "00865b", "00720b",
        ],
        Topic::MarketCap => &[
            "市值型", "市值", "0050", "006208", "00922", "00923", "00692", "台灣50", "大盤",
        ],
        Topic::Dividend => &[
            "高股息", "0056", "00878", "00919", "00929", "00713", "00915", "配息", "除息", "存股",
        ],
        Topic::ChinaExposure => &[
            "中國", "陸股", "滬深", "a股", "中概", "00752", "006207", "00739", "0061", "00882",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_lowercase(table: &[&str]) -> bool {
        table.iter().all(|k| k.to_lowercase() == *k)
    }

    #[test]
    fn tables_are_stored_lower_case() {
        assert!(all_lowercase(ETF_KEYWORDS));
        assert!(all_lowercase(ENTERTAINMENT_KEYWORDS));
        assert!(all_lowercase(ETF_EXCLUDED_CHANNELS));
        assert!(all_lowercase(REGION_EXCLUDED_CHANNELS));
        assert!(all_lowercase(NON_TAIWAN_REGION_TERMS));
        for topic in Topic::ALL {
            assert!(all_lowercase(topic_keywords(topic)), "{topic:?}");
        }
    }

    #[test]
    fn every_topic_lists_fund_tickers() {
        for topic in Topic::ALL {
            assert!(
                topic_keywords(topic)
                    .iter()
                    .any(|k| k.starts_with("00")),
                "{topic:?} has no ticker"
            );
        }
    }

    #[test]
    fn excluded_channel_tables_differ() {
        assert_ne!(ETF_EXCLUDED_CHANNELS, REGION_EXCLUDED_CHANNELS);
    }

    #[test]
    fn simplified_table_leaves_traditional_finance_terms_alone() {
        let traditional = "台灣投資理財證券經濟開盤價大跌";
        assert!(!traditional.chars().any(|c| SIMPLIFIED_ONLY_CHARS.contains(&c)));
    }
}
