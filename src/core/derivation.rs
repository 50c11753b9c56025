//! 起卦：由兩個種子數推得本卦、動爻與變卦。

use crate::core::seed::{moving_line_from_sum, trigram_from_seed};
use crate::core::tables::{flip_line, trigram_lines};
use crate::domain::model::{DerivationResult, MovingLine, SeedEcho, Trigram};

/// 上卦取 `seed1`，下卦取 `seed2`，動爻取兩數之和。
/// 動爻在 1-3 時變下卦，4-6 時變上卦，只會翻轉六爻中的一爻。
pub fn derive(seed1: i64, seed2: i64) -> DerivationResult {
    let upper = trigram_from_seed(seed1);
    let lower = trigram_from_seed(seed2);
    let moving_line = moving_line_from_sum(seed1, seed2);

    let (changed_upper, changed_lower) = change(upper, lower, moving_line);

    tracing::debug!(
        "derived upper={} lower={} moving_line={} changed=({}, {})",
        upper,
        lower,
        moving_line,
        changed_upper,
        changed_lower
    );

    DerivationResult {
        upper,
        lower,
        moving_line,
        changed_upper,
        changed_lower,
        echo: SeedEcho::Numbers {
            first: seed1,
            second: seed2,
        },
    }
}

/// 求變卦的上下卦
pub fn change(upper: Trigram, lower: Trigram, moving_line: MovingLine) -> (Trigram, Trigram) {
    if moving_line.in_lower() {
        (upper, flip_line(lower, moving_line.bit_index()))
    } else {
        (flip_line(upper, moving_line.bit_index()), lower)
    }
}

/// 六爻圖形，前三位為上卦、後三位為下卦
pub fn hexagram_lines(upper: Trigram, lower: Trigram) -> [u8; 6] {
    let [a, b, c] = trigram_lines(upper);
    let [d, e, f] = trigram_lines(lower);
    [a, b, c, d, e, f]
}
