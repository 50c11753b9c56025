use serde::{Deserialize, Serialize};
use std::fmt;

/// 先天八卦數，1 乾、2 兌、3 離、4 震、5 巽、6 坎、7 艮、8 坤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Trigram(u8);

impl Trigram {
    pub const COUNT: u8 = 8;

    pub const QIAN: Trigram = Trigram(1);
    pub const DUI: Trigram = Trigram(2);
    pub const LI: Trigram = Trigram(3);
    pub const ZHEN: Trigram = Trigram(4);
    pub const XUN: Trigram = Trigram(5);
    pub const KAN: Trigram = Trigram(6);
    pub const GEN: Trigram = Trigram(7);
    pub const KUN: Trigram = Trigram(8);

    pub fn new(number: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&number).then_some(Self(number))
    }

    /// 1-indexed 餘數：餘 0 對應第 8 卦
    pub fn from_residue(residue: u64) -> Self {
        match (residue % u64::from(Self::COUNT)) as u8 {
            0 => Self(Self::COUNT),
            r => Self(r),
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// 0..8，用來索引靜態表
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = Trigram> {
        (1..=Self::COUNT).map(Trigram)
    }
}

impl TryFrom<u8> for Trigram {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or_else(|| format!("trigram number must be 1..=8, got {}", number))
    }
}

impl fmt::Display for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 動爻位置 1..=6，1-3 在下卦，4-6 在上卦
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct MovingLine(u8);

impl MovingLine {
    pub const COUNT: u8 = 6;

    pub fn new(position: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&position).then_some(Self(position))
    }

    /// 1-indexed 餘數：餘 0 對應第 6 爻
    pub fn from_residue(residue: u64) -> Self {
        match (residue % u64::from(Self::COUNT)) as u8 {
            0 => Self(Self::COUNT),
            r => Self(r),
        }
    }

    pub fn position(self) -> u8 {
        self.0
    }

    pub fn in_lower(self) -> bool {
        self.0 <= 3
    }

    /// 在所屬三爻卦內的位元索引 0..3
    pub fn bit_index(self) -> usize {
        usize::from((self.0 - 1) % 3)
    }

    pub fn all() -> impl Iterator<Item = MovingLine> {
        (1..=Self::COUNT).map(MovingLine)
    }
}

impl TryFrom<u8> for MovingLine {
    type Error = String;

    fn try_from(position: u8) -> Result<Self, Self::Error> {
        Self::new(position).ok_or_else(|| format!("moving line must be 1..=6, got {}", position))
    }
}

impl fmt::Display for MovingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexagramKey {
    pub upper: Trigram,
    pub lower: Trigram,
}

impl HexagramKey {
    pub fn new(upper: Trigram, lower: Trigram) -> Self {
        Self { upper, lower }
    }
}

/// 起卦資訊，只用於顯示，不回饋到推算
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedEcho {
    Numbers { first: i64, second: i64 },
    Random { first: i64, second: i64 },
    Time { label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationResult {
    pub upper: Trigram,
    pub lower: Trigram,
    pub moving_line: MovingLine,
    pub changed_upper: Trigram,
    pub changed_lower: Trigram,
    pub echo: SeedEcho,
}

impl DerivationResult {
    pub fn primary_key(&self) -> HexagramKey {
        HexagramKey::new(self.upper, self.lower)
    }

    pub fn changed_key(&self) -> HexagramKey {
        HexagramKey::new(self.changed_upper, self.changed_lower)
    }

    pub fn with_echo(mut self, echo: SeedEcho) -> Self {
        self.echo = echo;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedReading {
    pub text: String,
    pub primary_name: &'static str,
    pub changed_name: &'static str,
    pub moving_line: MovingLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpretationOutcome {
    Service(String),
    Fallback(String),
}

impl InterpretationOutcome {
    pub fn text(&self) -> &str {
        match self {
            InterpretationOutcome::Service(text) | InterpretationOutcome::Fallback(text) => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, InterpretationOutcome::Fallback(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    NumberSeed,
    TimeSeed,
    RandomSeed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivinationRequest {
    pub command: Command,
    pub arguments: Option<(i64, i64)>,
    pub question: String,
}

impl DivinationRequest {
    pub fn by_numbers(first: i64, second: i64, question: impl Into<String>) -> Self {
        Self {
            command: Command::NumberSeed,
            arguments: Some((first, second)),
            question: question.into(),
        }
    }

    pub fn by_time(question: impl Into<String>) -> Self {
        Self {
            command: Command::TimeSeed,
            arguments: None,
            question: question.into(),
        }
    }

    pub fn by_random(question: impl Into<String>) -> Self {
        Self {
            command: Command::RandomSeed,
            arguments: None,
            question: question.into(),
        }
    }
}
