//! 八卦與六十四卦靜態對照表。
//!
//! 所有表格都是編譯期常數，以 `Trigram::index()` 索引，執行期不會修改。

use crate::domain::model::{HexagramKey, Trigram};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrigramInfo {
    pub name: &'static str,
    pub symbol: &'static str,
    pub nature: &'static str,
    pub attribute: &'static str,
    pub element: &'static str,
}

#[rustfmt::skip]
const TRIGRAMS: [TrigramInfo; 8] = [
    TrigramInfo { name: "乾", symbol: "☰", nature: "天", attribute: "剛健", element: "金" },
    TrigramInfo { name: "兌", symbol: "☱", nature: "澤", attribute: "喜悅", element: "金" },
    TrigramInfo { name: "離", symbol: "☲", nature: "火", attribute: "光明", element: "火" },
    TrigramInfo { name: "震", symbol: "☳", nature: "雷", attribute: "震動", element: "木" },
    TrigramInfo { name: "巽", symbol: "☴", nature: "風", attribute: "順入", element: "木" },
    TrigramInfo { name: "坎", symbol: "☵", nature: "水", attribute: "陷險", element: "水" },
    TrigramInfo { name: "艮", symbol: "☶", nature: "山", attribute: "止靜", element: "土" },
    TrigramInfo { name: "坤", symbol: "☷", nature: "地", attribute: "順承", element: "土" },
];

/// 三爻由上而下，1 為陽爻、0 為陰爻
const LINE_PATTERNS: [[u8; 3]; 8] = [
    [1, 1, 1],
    [0, 1, 1],
    [1, 0, 1],
    [0, 0, 1],
    [1, 1, 0],
    [0, 1, 0],
    [1, 0, 0],
    [0, 0, 0],
];

/// `HEXAGRAMS[upper][lower]`
#[rustfmt::skip]
const HEXAGRAMS: [[&str; 8]; 8] = [
    ["乾為天", "天澤履", "天火同人", "天雷無妄", "天風姤", "天水訟", "天山遯", "天地否"],
    ["澤天夬", "兌為澤", "澤火革", "澤雷隨", "澤風大過", "澤水困", "澤山咸", "澤地萃"],
    ["火天大有", "火澤睽", "離為火", "火雷噬嗑", "火風鼎", "火水未濟", "火山旅", "火地晉"],
    ["雷天大壯", "雷澤歸妹", "雷火豐", "震為雷", "雷風恆", "雷水解", "雷山小過", "雷地豫"],
    ["風天小畜", "風澤中孚", "風火家人", "風雷益", "巽為風", "風水渙", "風山漸", "風地觀"],
    ["水天需", "水澤節", "水火既濟", "水雷屯", "水風井", "坎為水", "水山蹇", "水地比"],
    ["山天大畜", "山澤損", "山火賁", "山雷頤", "山風蠱", "山水蒙", "艮為山", "山地剝"],
    ["地天泰", "地澤臨", "地火明夷", "地雷復", "地風升", "地水師", "地山謙", "坤為地"],
];

pub const UNKNOWN_HEXAGRAM: &str = "未知卦";

pub fn trigram_info(trigram: Trigram) -> &'static TrigramInfo {
    &TRIGRAMS[trigram.index()]
}

pub fn trigram_lines(trigram: Trigram) -> [u8; 3] {
    LINE_PATTERNS[trigram.index()]
}

/// 以 `上爻<<2 | 中爻<<1 | 下爻` 為索引的反查表
const BITS_TO_TRIGRAM: [Trigram; 8] = [
    Trigram::KUN,
    Trigram::ZHEN,
    Trigram::KAN,
    Trigram::DUI,
    Trigram::GEN,
    Trigram::LI,
    Trigram::XUN,
    Trigram::QIAN,
];

fn pattern_bits(trigram: Trigram) -> u8 {
    let [top, middle, bottom] = trigram_lines(trigram);
    (top << 2) | (middle << 1) | bottom
}

/// 翻轉某一爻（`bit_index` 與 `LINE_PATTERNS` 同序，0 為第一個位置）
pub fn flip_line(trigram: Trigram, bit_index: usize) -> Trigram {
    let mask = 1u8 << (2 - bit_index % 3);
    BITS_TO_TRIGRAM[usize::from((pattern_bits(trigram) ^ mask) & 0b111)]
}

pub fn hexagram_name(key: HexagramKey) -> Option<&'static str> {
    HEXAGRAMS
        .get(key.upper.index())
        .and_then(|row| row.get(key.lower.index()))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn t(n: u8) -> Trigram {
        Trigram::new(n).unwrap()
    }

    #[test]
    fn test_hexagram_table_is_total_and_unique() {
        let mut names = HashSet::new();
        for upper in Trigram::all() {
            for lower in Trigram::all() {
                let name = hexagram_name(HexagramKey::new(upper, lower)).unwrap();
                assert_ne!(name, UNKNOWN_HEXAGRAM);
                names.insert(name);
            }
        }
        assert_eq!(names.len(), 64);
    }

    #[test]
    fn test_pure_hexagrams_on_diagonal() {
        assert_eq!(hexagram_name(HexagramKey::new(t(1), t(1))), Some("乾為天"));
        assert_eq!(hexagram_name(HexagramKey::new(t(8), t(8))), Some("坤為地"));
        assert_eq!(hexagram_name(HexagramKey::new(t(8), t(1))), Some("地天泰"));
        assert_eq!(hexagram_name(HexagramKey::new(t(1), t(8))), Some("天地否"));
    }

    #[test]
    fn test_line_patterns_cover_all_combinations() {
        let patterns: HashSet<[u8; 3]> = Trigram::all().map(trigram_lines).collect();
        assert_eq!(patterns.len(), 8);
        assert!(patterns.iter().flatten().all(|&line| line <= 1));
    }

    #[test]
    fn test_bits_table_agrees_with_line_patterns() {
        for trigram in Trigram::all() {
            let bits = pattern_bits(trigram);
            assert_eq!(BITS_TO_TRIGRAM[usize::from(bits)], trigram);
        }
    }

    #[test]
    fn test_flip_line_matches_pattern_lookup() {
        for trigram in Trigram::all() {
            for bit in 0..3 {
                let mut lines = trigram_lines(trigram);
                lines[bit] = 1 - lines[bit];
                assert_eq!(trigram_lines(flip_line(trigram, bit)), lines);
                assert_ne!(flip_line(trigram, bit), trigram);
            }
        }
        // 乾 [1,1,1] 翻第二位 -> [1,0,1] 離
        assert_eq!(flip_line(t(1), 1), t(3));
    }

    #[test]
    fn test_trigram_attributes() {
        let kan = trigram_info(t(6));
        assert_eq!(kan.name, "坎");
        assert_eq!(kan.symbol, "☵");
        assert_eq!(kan.nature, "水");
        assert_eq!(kan.element, "水");
    }
}
