use crate::core::tables::{hexagram_name, trigram_info, UNKNOWN_HEXAGRAM};
use crate::domain::model::{DerivationResult, FormattedReading, SeedEcho};

pub const DIVIDER: &str = "━━━━━━━━━━━━━━━━";

/// 把起卦結果排成聊天訊息。查不到卦名時填入「未知卦」，不會失敗。
pub fn format_result(result: &DerivationResult) -> FormattedReading {
    let upper = trigram_info(result.upper);
    let lower = trigram_info(result.lower);
    let changed_upper = trigram_info(result.changed_upper);
    let changed_lower = trigram_info(result.changed_lower);

    let primary_name = hexagram_name(result.primary_key()).unwrap_or(UNKNOWN_HEXAGRAM);
    let changed_name = hexagram_name(result.changed_key()).unwrap_or(UNKNOWN_HEXAGRAM);

    let text = format!(
        "\n{DIVIDER}\n🔮 【梅花易數占卜結果】\n{DIVIDER}\n\n\
         📌 本卦：{primary_name}\n   \
         上卦：{}卦 {}（{}・{}・{}）\n   \
         下卦：{}卦 {}（{}・{}・{}）\n\n\
         📌 動爻：第 {} 爻\n\n\
         📌 變卦：{changed_name}\n   \
         上卦：{}卦 {}\n   \
         下卦：{}卦 {}\n\n\
         {DIVIDER}\n",
        upper.name,
        upper.symbol,
        upper.nature,
        upper.attribute,
        upper.element,
        lower.name,
        lower.symbol,
        lower.nature,
        lower.attribute,
        lower.element,
        result.moving_line,
        changed_upper.name,
        changed_upper.symbol,
        changed_lower.name,
        changed_lower.symbol,
    );

    FormattedReading {
        text,
        primary_name,
        changed_name,
        moving_line: result.moving_line,
    }
}

/// 起卦依據的說明行（數字、隨機數或時間）
pub fn format_echo(echo: &SeedEcho) -> String {
    match echo {
        SeedEcho::Numbers { first, second } => format!("🔢 起卦數字：{}、{}", first, second),
        SeedEcho::Random { first, second } => format!("🎲 隨機數字：{}、{}", first, second),
        SeedEcho::Time { label } => format!("🕐 起卦時間：{}", label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::derivation::derive;

    #[test]
    fn test_format_qian() {
        let reading = format_result(&derive(1, 1));
        assert_eq!(reading.primary_name, "乾為天");
        assert_eq!(reading.changed_name, "天火同人");
        assert_eq!(reading.moving_line.position(), 2);
        assert!(reading.text.contains("📌 本卦：乾為天"));
        assert!(reading.text.contains("上卦：乾卦 ☰（天・剛健・金）"));
        assert!(reading.text.contains("📌 動爻：第 2 爻"));
        assert!(reading.text.contains("📌 變卦：天火同人"));
        assert!(reading.text.contains("下卦：離卦 ☲"));
        assert!(reading.text.starts_with('\n'));
        assert!(reading.text.ends_with(&format!("{DIVIDER}\n")));
    }

    #[test]
    fn test_format_echo_variants() {
        assert_eq!(
            format_echo(&SeedEcho::Random {
                first: 3,
                second: 999
            }),
            "🎲 隨機數字：3、999"
        );
        assert_eq!(
            format_echo(&SeedEcho::Time {
                label: "2024年3月15日 14時".to_string()
            }),
            "🕐 起卦時間：2024年3月15日 14時"
        );
    }
}
