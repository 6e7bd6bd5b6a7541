use crate::models::{SearchIntent, SortSignal, Topic};

/// Rankings sent back to chat users are kept short.
pub const CHAT_RESULT_LIMIT: usize = 5;

const GREETING_PHRASES: &[&str] = &["嗨", "你好", "開始"];
/// Latin greetings only count as whole words, so "china" is not a "hi".
const GREETING_WORDS: &[&str] = &["hi", "hello"];
const EDUCATION_KEYWORDS: &[&str] = &["教學", "教育", "education"];

pub const GREETING_TEXT: &str = "🤖 YouTube ETF 影片排行\n\n\
我會幫你找出最近的台灣ETF熱門影片！\n\n\
• 「觀看次數」最多人看的ETF影片\n\
• 「互動數」按讚與留言最多的影片\n\
• 「24小時」過去一天的影片\n\
• 「一週」過去七天的影片\n\
• 「說明」查看完整說明";

pub const HELP_TEXT: &str = "📖 功能說明\n\n\
• 觀看次數：依每日觀看數排序\n\
• 互動數：依按讚數加兩倍留言數排序\n\
• 24小時 / 一週：調整搜尋的時間範圍\n\
• 加上主題（主動、配置、市值、高股息、陸股）只看該類ETF\n\
• 加上「教學」改搜尋新聞與教育類頻道\n\n\
隨時輸入「嗨」重新開始！";

pub const EMPTY_RESULT_TEXT: &str =
    "抱歉，目前沒有找到相關的ETF影片 😅\n\n請試試輸入「說明」查看使用方式！";

#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    Greeting,
    Help,
    Rank(SearchIntent),
}

fn ranking(window_hours: u32, sort_by: SortSignal) -> SearchIntent {
    SearchIntent {
        window_hours,
        limit: CHAT_RESULT_LIMIT,
        sort_by,
        ..SearchIntent::default()
    }
}

fn is_greeting(text: &str) -> bool {
    GREETING_PHRASES.iter().any(|p| text.contains(p))
        || text
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| GREETING_WORDS.contains(&word))
}

/// The topic named earliest in the message.
fn mentioned_topic(text: &str) -> Option<Topic> {
    Topic::ALL
        .into_iter()
        .filter_map(|topic| {
            let first = topic.aliases().iter().filter_map(|a| text.find(a)).min()?;
            Some((first, topic))
        })
        .min_by_key(|(position, _)| *position)
        .map(|(_, topic)| topic)
}

/// Map a chat message onto a command. Checks run in a fixed order and the first
/// match wins, so "24小時互動" ranks by engagement over 48 hours.
pub fn parse_command(message: &str) -> ChatCommand {
    let text = message.trim().to_lowercase();
    let has = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    let base = if is_greeting(&text) {
        return ChatCommand::Greeting;
    } else if has(&["觀看次數", "view"]) {
        ranking(48, SortSignal::ViewPerDay)
    } else if has(&["互動", "engagement"]) {
        ranking(48, SortSignal::EngagementScore)
    } else if has(&["24小時", "24"]) {
        ranking(24, SortSignal::ViewPerDay)
    } else if has(&["一週", "7天", "週"]) {
        ranking(168, SortSignal::ViewPerDay)
    } else if has(&["說明", "help"]) {
        return ChatCommand::Help;
    } else {
        ranking(48, SortSignal::ViewPerDay)
    };

    ChatCommand::Rank(SearchIntent {
        topic: mentioned_topic(&text),
        education_mode: has(EDUCATION_KEYWORDS),
        ..base
    })
}
