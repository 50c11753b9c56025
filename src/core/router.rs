//! 把聊天文字轉成指令。純函式，不會失敗。

use crate::domain::model::DivinationRequest;
use crate::utils::error::UserInputError;

pub const HELP_MESSAGE: &str = "📖 【梅花易數占卜使用說明】

🎯 快速占卜：
直接輸入問題即可，例如：
• 「我的工作運勢如何？」
• 「這段感情會有結果嗎？」

🔮 指定起卦方式：

1️⃣ 輸入「占卜 [問題]」
   例如：占卜 我該換工作嗎？

2️⃣ 輸入「數字占卜 [數字1] [數字2]」
   例如：數字占卜 168 888

3️⃣ 輸入「時間占卜」
   以當前時間起卦

━━━━━━━━━━━━━━━━
💡 小提示：心誠則靈
━━━━━━━━━━━━━━━━";

pub const PROMPT_MESSAGE: &str = "🔮 請告訴我您想占問的事情，例如：

「占卜 我的工作運勢如何？」
「占卜 這段感情會有結果嗎？」

或輸入：
「數字占卜 123 456」
「時間占卜」";

pub const WELCOME_BANNER: &str = "🔮 梅花易數占卜機器人\n\n";

pub const NUMBER_QUESTION: &str = "請為我解讀這組數字的卦象";
pub const TIME_QUESTION: &str = "請為我解讀當下的運勢";
pub const RANDOM_QUESTION: &str = "請為我解讀整體運勢";

const HELP_COMMANDS: [&str; 5] = ["使用說明", "說明", "help", "?", "？"];
const PROMPT_COMMANDS: [&str; 3] = ["占卜", "起卦", "卜卦"];
const TIME_COMMANDS: [&str; 2] = ["時間占卜", "時間起卦"];
const RANDOM_COMMANDS: [&str; 2] = ["隨機占卜", "隨機起卦"];
const NUMBER_PREFIX: &str = "數字占卜";
const QUESTION_PREFIXES: [&str; 2] = ["占卜 ", "占卜："];
const QUESTION_MARKERS: [&str; 10] = [
    "？", "?", "嗎", "呢", "如何", "怎麼", "會不會", "能不能", "可以", "應該",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Help,
    Prompt,
    Welcome,
    Divine(DivinationRequest),
    InvalidInput(UserInputError),
}

pub fn route(text: &str) -> Route {
    let message = text.trim();

    if HELP_COMMANDS.contains(&message) {
        return Route::Help;
    }
    if PROMPT_COMMANDS.contains(&message) {
        return Route::Prompt;
    }
    if let Some(question) = QUESTION_PREFIXES
        .iter()
        .find_map(|prefix| message.strip_prefix(prefix))
    {
        return Route::Divine(DivinationRequest::by_random(question.trim()));
    }
    if let Some(rest) = message.strip_prefix(NUMBER_PREFIX) {
        return match parse_number_arguments(rest) {
            Ok((first, second, question)) => Route::Divine(DivinationRequest::by_numbers(
                first,
                second,
                question.unwrap_or_else(|| NUMBER_QUESTION.to_string()),
            )),
            Err(e) => Route::InvalidInput(e),
        };
    }
    if TIME_COMMANDS.contains(&message) {
        return Route::Divine(DivinationRequest::by_time(TIME_QUESTION));
    }
    if RANDOM_COMMANDS.contains(&message) {
        return Route::Divine(DivinationRequest::by_random(RANDOM_QUESTION));
    }
    if QUESTION_MARKERS.iter().any(|marker| message.contains(marker)) {
        return Route::Divine(DivinationRequest::by_random(message));
    }

    Route::Welcome
}

/// 解析「數字占卜」之後的內容：前兩個詞必須是整數，其餘視為問題
pub fn parse_number_arguments(
    rest: &str,
) -> Result<(i64, i64, Option<String>), UserInputError> {
    let rest = rest.trim_start_matches([':', '：']);
    let tokens: Vec<&str> = rest.split_whitespace().collect();

    let mut numbers = [0i64; 2];
    for (slot, token) in numbers.iter_mut().zip(tokens.iter()) {
        *slot = token.parse().map_err(|_| UserInputError::NotAnInteger {
            token: token.to_string(),
        })?;
    }
    if tokens.len() < 2 {
        return Err(UserInputError::MissingArguments {
            found: tokens.len(),
        });
    }

    let question = tokens[2..].join(" ");
    let question = (!question.is_empty()).then_some(question);
    Ok((numbers[0], numbers[1], question))
}
