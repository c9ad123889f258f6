use chrono::NaiveDateTime;

use crate::errors::CalendarError;

/// Index of the sample closest to `target`. On a tie the earlier index wins.
pub fn nearest_index(
    timestamps: &[NaiveDateTime],
    target: NaiveDateTime,
) -> Result<usize, CalendarError> {
    let mut best: Option<(usize, i64)> = None;
    for (idx, ts) in timestamps.iter().enumerate() {
        let distance = (*ts - target).num_seconds().abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((idx, distance)),
        }
    }
    best.map(|(idx, _)| idx).ok_or_else(|| {
        CalendarError::InvalidInput(format!(
            "no hourly samples to match against {}",
            target
        ))
    })
}
