//! "Did you know?" weather trivia for the dashboard footer.

use chrono::Utc;

pub const FUN_FACTS: [&str; 5] = [
    "The highest temperature ever recorded on Earth was 56.7°C (134°F) in Death Valley, California!",
    "Snowflakes can take up to an hour to fall from the cloud to the ground!",
    "A bolt of lightning is five times hotter than the surface of the sun.",
    "The coldest temperature ever recorded was -89.2°C (-128.6°F) in Antarctica.",
    "Rain contains vitamin B12, which is vital for the human body (in tiny amounts).",
];

/// Supplies an index into a list of `len` items.
pub trait IndexSource {
    fn pick(&mut self, len: usize) -> usize;
}

impl<F> IndexSource for F
where
    F: FnMut(usize) -> usize,
{
    fn pick(&mut self, len: usize) -> usize {
        self(len)
    }
}

/// Picks from the sub-second part of the wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockIndex;

impl IndexSource for ClockIndex {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        Utc::now().timestamp_subsec_nanos() as usize % len
    }
}

/// Out-of-range indices wrap around.
pub fn pick_fact<S: IndexSource + ?Sized>(source: &mut S) -> &'static str {
    FUN_FACTS[source.pick(FUN_FACTS.len()) % FUN_FACTS.len()]
}
