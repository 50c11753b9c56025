// Adapters layer: concrete implementations of the domain ports (http, clock, randomness, backoff).

pub mod backoff;
pub mod clock;
pub mod gemini;
pub mod random;

pub use backoff::{ImmediateBackoff, TokioBackoff};
pub use clock::{FixedClock, LocalClock};
pub use gemini::GeminiClient;
pub use random::{FixedSeeds, ThreadRngSource};
