pub mod models;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use chrono::{FixedOffset, NaiveDate, Offset, Timelike, Utc};
use crate::manager_forecast::models::{DailySummary, ForecastSample};

/// Hours of the day whose samples decide a day's displayed weather condition
const MIDDAY_HOURS: RangeInclusive<u32> = 11..=14;

/// Collapses 3-hour forecast samples into one summary per UTC calendar day.
/// Midday hours are evaluated in UTC, see `aggregate_with_offset`.
///
/// # Arguments
///
/// * 'samples' - forecast samples, in any order
pub fn aggregate(samples: &[ForecastSample]) -> Vec<DailySummary> {
    aggregate_with_offset(samples, Utc.fix())
}

/// Collapses 3-hour forecast samples into one summary per UTC calendar day.
///
/// The first sample seen for a day seeds its temperatures and weather condition. Later samples
/// of the same day widen the min/max temperatures, and those falling between 11:00 and 14:00
/// (inclusive, evaluated in the given offset) replace the condition, the last one winning.
/// Days without any such sample keep the condition of their first sample.
///
/// Summaries are returned ordered by the timestamp of each day's first seen sample. No
/// truncation takes place, there will be one summary for every distinct day in the input.
///
/// # Arguments
///
/// * 'samples' - forecast samples, in any order
/// * 'offset' - offset used when deciding if a sample is a midday sample
pub fn aggregate_with_offset(samples: &[ForecastSample], offset: FixedOffset) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        match index.entry(sample.timestamp.date_naive()) {
            Entry::Vacant(e) => {
                e.insert(days.len());
                days.push(DailySummary::seed(sample));
            }
            Entry::Occupied(e) => {
                let day = &mut days[*e.get()];
                day.temp_min = day.temp_min.min(sample.temp_min);
                day.temp_max = day.temp_max.max(sample.temp_max);

                let hour = sample.timestamp.with_timezone(&offset).hour();
                if MIDDAY_HOURS.contains(&hour) {
                    day.condition = sample.condition.clone();
                }
            }
        }
    }

    days.sort_by_key(|d| d.representative_timestamp);
    days
}
