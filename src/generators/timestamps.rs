use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use serde::Serialize;

use crate::Error;

pub const DEFAULT_MIN_YEAR: i32 = 2017;
pub const SPAN_PADDING_YEARS: i64 = 2;
/// Every year counts as 365 days when sizing the range; leap days are ignored.
pub const DAYS_PER_YEAR: i64 = 365;

/// Bounds that timestamps are drawn between, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(skip)]
    span_micros: i64,
}

impl DateRange {
    /// Starts at midnight on Jan 1 of `min_year` and spans
    /// `max_year - min_year + 2` years of 365 days.
    pub fn for_years(min_year: i32, max_year: i32) -> Result<Self, Error> {
        let start = NaiveDate::from_ymd_opt(min_year, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or(Error::Range(format!("year {} is out of range", min_year)))?;

        let span_years = i64::from(max_year) - i64::from(min_year) + SPAN_PADDING_YEARS;
        if span_years <= 0 {
            return Err(Error::Range(format!(
                "max year {} is too far before min year {}",
                max_year, min_year
            )));
        }

        let end = span_years
            .checked_mul(DAYS_PER_YEAR)
            .and_then(Duration::try_days)
            .and_then(|span| start.checked_add_signed(span))
            .ok_or(Error::Range(format!(
                "a range of {} years from {} overflows",
                span_years, start
            )))?;

        let span_micros = (end - start).num_microseconds().ok_or(Error::Range(format!(
            "range {} to {} is too wide",
            start, end
        )))?;

        Ok(Self {
            start,
            end,
            span_micros,
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, t: &NaiveDateTime) -> bool {
        self.start <= *t && *t <= self.end
    }

    /// `start + (end - start) * u` with `u` uniform in `[0, 1)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDateTime {
        let u: f64 = rng.gen();
        // float rounding may land a hair past the span
        let offset = ((self.span_micros as f64) * u) as i64;
        self.start + Duration::microseconds(offset.min(self.span_micros))
    }
}

pub fn generate_timestamps<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    range: &DateRange,
) -> Vec<NaiveDateTime> {
    (0..count).map(|_| range.sample(rng)).collect()
}

/// Calendar year of the local clock. Read once at startup.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
