//! Collision-resistant filenames for stored images.

use rand::Rng;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter value at which the sequence rolls back to 1.
pub const SEQUENCE_WRAP: u32 = 86_400;

/// Thread-safe generator of `<unix_nanos>-<sequence>-<suffix>.png` names.
///
/// The sequence advances with a compare-and-swap loop, so concurrent callers
/// never observe the same value within one wrap period.
#[derive(Debug, Default)]
pub struct FilenameGenerator {
    sequence: AtomicU32,
}

impl FilenameGenerator {
    /// Creates a generator whose first sequence number is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the rolling counter and returns the new value in `1..=SEQUENCE_WRAP`.
    pub fn next_sequence(&self) -> u32 {
        let prev = self
            .sequence
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |cur| {
                Some(if cur >= SEQUENCE_WRAP { 1 } else { cur + 1 })
            })
            .unwrap_or_else(|prev| prev);
        if prev >= SEQUENCE_WRAP {
            1
        } else {
            prev + 1
        }
    }

    /// Produces the next filename.
    pub fn next_name(&self) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let sequence = self.next_sequence();
        let suffix: u32 = rand::rng().random_range(0..999);
        format!("{nanos}-{sequence}-{suffix:03}.png")
    }
}
