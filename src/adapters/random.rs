use crate::core::strategy::RANDOM_SEED_RANGE;
use crate::domain::ports::SeedSource;
use rand::Rng;

/// 每次從執行緒本地的亂數產生器取兩個 1..=999 的整數
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl SeedSource for ThreadRngSource {
    fn draw(&self) -> (i64, i64) {
        let mut rng = rand::thread_rng();
        (
            rng.gen_range(RANDOM_SEED_RANGE),
            rng.gen_range(RANDOM_SEED_RANGE),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedSeeds(pub i64, pub i64);

impl SeedSource for FixedSeeds {
    fn draw(&self) -> (i64, i64) {
        (self.0, self.1)
    }
}
