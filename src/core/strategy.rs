//! 三種起卦方式：指定數字、當下時間、隨機數字。

use crate::core::derivation::derive;
use crate::domain::model::{DerivationResult, SeedEcho};
use crate::domain::ports::SeedSource;
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::ops::RangeInclusive;

/// 隨機起卦的取數範圍
pub const RANDOM_SEED_RANGE: RangeInclusive<i64> = 1..=999;

pub fn by_numbers(first: i64, second: i64) -> DerivationResult {
    derive(first, second)
}

/// 時辰序數 1..=12，由 `((hour + 1) / 2) % 12` 而得，餘 0 記為 12
pub fn double_hour_index(hour: u32) -> u32 {
    match ((hour + 1) / 2) % 12 {
        0 => 12,
        n => n,
    }
}

/// 年月日之和為上卦數，再加時辰為下卦數
pub fn time_seeds(moment: NaiveDateTime) -> (i64, i64) {
    let first = i64::from(moment.year()) + i64::from(moment.month()) + i64::from(moment.day());
    let second = first + i64::from(double_hour_index(moment.hour()));
    (first, second)
}

pub fn by_time(moment: NaiveDateTime) -> DerivationResult {
    let (first, second) = time_seeds(moment);
    let label = format!(
        "{}年{}月{}日 {}時",
        moment.year(),
        moment.month(),
        moment.day(),
        moment.hour()
    );
    derive(first, second).with_echo(SeedEcho::Time { label })
}

pub fn by_random(source: &dyn SeedSource) -> DerivationResult {
    let (first, second) = source.draw();
    tracing::debug!("random seeds drawn: {} {}", first, second);
    derive(first, second).with_echo(SeedEcho::Random { first, second })
}
