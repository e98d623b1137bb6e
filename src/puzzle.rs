//! Helpers for the sliding puzzle page: elapsed-time display and shuffling.

use rand::Rng;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Format elapsed seconds as `M:SS.mmm`, or `H:MM:SS.mmm` past one hour.
///
/// The time is read as a time of day: hours wrap at 24 and negative values
/// count back from midnight. Fractional milliseconds are truncated.
///
/// - `None` → `"0:00.000"`
/// - `10.0` → `"0:10.000"`
/// - `1000.0` → `"16:40.000"`
/// - `4600.0` → `"1:16:40.000"`
pub fn format_time(elapsed_seconds: Option<f64>) -> String {
    let Some(seconds) = elapsed_seconds.filter(|s| s.is_finite()) else {
        return "0:00.000".to_string();
    };

    let total_ms = ((seconds * 1000.0).trunc() as i64).rem_euclid(MS_PER_DAY);
    let ms = total_ms % 1000;
    let secs = (total_ms / 1000) % 60;
    let mins = (total_ms / 60_000) % 60;
    let hours = total_ms / 3_600_000;

    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}.{ms:03}")
    } else {
        format!("{mins}:{secs:02}.{ms:03}")
    }
}

/// Fisher–Yates shuffle of a copy of `items` using the thread-local RNG.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::rng())
}

/// Fisher–Yates shuffle of a copy of `items` drawing from `rng`.
pub fn shuffle_with<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut result = items.to_vec();
    for i in (1..result.len()).rev() {
        let j = rng.random_range(0..=i);
        result.swap(i, j);
    }
    result
}
