//! 數字轉八卦與動爻。
//!
//! 種子可以是任何 `i64`，負數以歐幾里得餘數處理（`rem_euclid`），
//! 所以 -1 與 7 落在同一個卦，週期性在 0 兩側都成立。

use crate::domain::model::{MovingLine, Trigram};

pub fn trigram_from_seed(seed: i64) -> Trigram {
    Trigram::from_residue(seed.rem_euclid(i64::from(Trigram::COUNT)) as u64)
}

pub fn moving_line_from_seed(seed: i64) -> MovingLine {
    MovingLine::from_residue(seed.rem_euclid(i64::from(MovingLine::COUNT)) as u64)
}

/// 以兩數之和定動爻。先各自取餘數再相加，避免 `i64` 溢位。
pub fn moving_line_from_sum(first: i64, second: i64) -> MovingLine {
    let modulus = i64::from(MovingLine::COUNT);
    let sum = first.rem_euclid(modulus) + second.rem_euclid(modulus);
    moving_line_from_seed(sum)
}
