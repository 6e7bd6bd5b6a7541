use crate::models::{SearchIntent, Topic, VideoRecord};
use crate::services::keywords::{
    topic_keywords, ENTERTAINMENT_KEYWORDS, ETF_EXCLUDED_CHANNELS, ETF_KEYWORDS,
    NON_TAIWAN_REGION_TERMS, REGION_EXCLUDED_CHANNELS, SIMPLIFIED_ONLY_CHARS,
};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static HAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Han}").unwrap());
static KANA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Hiragana}\p{Katakana}]").unwrap());
static HANGUL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Hangul}").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    NoEtfKeyword,
    Entertainment,
    ExcludedChannel,
    NoHanCharacters,
    Japanese,
    Korean,
    SimplifiedChinese,
    NonTaiwanRegion,
    RegionExcludedChannel,
    OffTopic(Topic),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NoEtfKeyword => f.write_str("no ETF keyword"),
            RejectReason::Entertainment => f.write_str("entertainment content"),
            RejectReason::ExcludedChannel => f.write_str("excluded channel"),
            RejectReason::NoHanCharacters => f.write_str("no Chinese characters"),
            RejectReason::Japanese => f.write_str("Japanese kana"),
            RejectReason::Korean => f.write_str("Korean hangul"),
            RejectReason::SimplifiedChinese => f.write_str("simplified Chinese"),
            RejectReason::NonTaiwanRegion => f.write_str("non-Taiwan region"),
            RejectReason::RegionExcludedChannel => f.write_str("region-excluded channel"),
            RejectReason::OffTopic(topic) => write!(f, "off topic {topic:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Lower-cased views of the fields the checks look at.
struct MatchText {
    title: String,
    channel: String,
    combined: String,
}

impl MatchText {
    fn new(record: &VideoRecord) -> Self {
        let title = record.title.to_lowercase();
        let channel = record.channel_title.to_lowercase();
        let combined = format!("{title} {channel}");
        Self {
            title,
            channel,
            combined,
        }
    }
}

fn check_etf_topic(text: &MatchText) -> Result<(), RejectReason> {
    if !contains_any(&text.title, ETF_KEYWORDS) {
        return Err(RejectReason::NoEtfKeyword);
    }
    if contains_any(&text.combined, ENTERTAINMENT_KEYWORDS) {
        return Err(RejectReason::Entertainment);
    }
    if contains_any(&text.channel, ETF_EXCLUDED_CHANNELS)
        || contains_any(&text.title, ETF_EXCLUDED_CHANNELS)
    {
        return Err(RejectReason::ExcludedChannel);
    }
    Ok(())
}

fn check_taiwan_chinese(text: &MatchText) -> Result<(), RejectReason> {
    let combined = text.combined.as_str();
    if !HAN_RE.is_match(combined) {
        return Err(RejectReason::NoHanCharacters);
    }
    if KANA_RE.is_match(combined) {
        return Err(RejectReason::Japanese);
    }
    if HANGUL_RE.is_match(combined) {
        return Err(RejectReason::Korean);
    }
    if combined.chars().any(|c| SIMPLIFIED_ONLY_CHARS.contains(&c)) {
        return Err(RejectReason::SimplifiedChinese);
    }
    if contains_any(combined, NON_TAIWAN_REGION_TERMS) {
        return Err(RejectReason::NonTaiwanRegion);
    }
    if contains_any(combined, ENTERTAINMENT_KEYWORDS) {
        return Err(RejectReason::Entertainment);
    }
    if contains_any(&text.channel, REGION_EXCLUDED_CHANNELS) {
        return Err(RejectReason::RegionExcludedChannel);
    }
    Ok(())
}

fn check_topic(text: &MatchText, topic: Topic) -> Result<(), RejectReason> {
    if contains_any(&text.combined, topic_keywords(topic)) {
        Ok(())
    } else {
        Err(RejectReason::OffTopic(topic))
    }
}

fn run_checks(text: &MatchText, intent: &SearchIntent) -> Result<(), RejectReason> {
    if intent.filter_etf {
        check_etf_topic(text)?;
    }
    if intent.filter_taiwan_chinese {
        check_taiwan_chinese(text)?;
    }
    if let Some(topic) = intent.topic {
        check_topic(text, topic)?;
    }
    Ok(())
}

/// Run every check the intent enables; the first failing one decides the verdict.
pub fn classify_with_reason(record: &VideoRecord, intent: &SearchIntent) -> Verdict {
    match run_checks(&MatchText::new(record), intent) {
        Ok(()) => Verdict::Accepted,
        Err(reason) => Verdict::Rejected(reason),
    }
}

pub fn classify(record: &VideoRecord, intent: &SearchIntent) -> bool {
    classify_with_reason(record, intent) == Verdict::Accepted
}
