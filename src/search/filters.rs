use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use clap::ValueEnum;

/// Filters for one search invocation. Immutable once built.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    /// None means a bare popular-video browse (no `q` parameter upstream).
    pub keyword: Option<String>,
    /// Total results to accumulate across pages, 2..=100.
    pub max_results: u64,
    pub period: UploadPeriod,
    pub duration: DurationClass,
    pub order: SortOrder,
}

/// Lower bound on upload date, resolved against the current UTC clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UploadPeriod {
    All,
    Month,
    Week,
    Today,
}

impl UploadPeriod {
    /// Start of the current day/ISO-week (Monday)/month in UTC, or None for
    /// an unbounded search.
    pub fn published_after(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let midnight = |d: NaiveDate| d.and_time(NaiveTime::MIN).and_utc();
        match self {
            UploadPeriod::All => None,
            UploadPeriod::Month => {
                let first = now.date_naive().with_day(1)?;
                Some(midnight(first))
            }
            UploadPeriod::Week => {
                let monday = now.date_naive()
                    - Duration::days(now.weekday().num_days_from_monday() as i64);
                Some(midnight(monday))
            }
            UploadPeriod::Today => Some(midnight(now.date_naive())),
        }
    }
}

/// Video length classes as the upstream search filter defines them:
/// short < 4 min, medium 4-20 min, long > 20 min.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DurationClass {
    Any,
    Short,
    Medium,
    Long,
}

impl DurationClass {
    pub fn api_value(self) -> &'static str {
        match self {
            DurationClass::Any => "any",
            DurationClass::Short => "short",
            DurationClass::Medium => "medium",
            DurationClass::Long => "long",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    ViewCount,
    Date,
    Relevance,
}

impl SortOrder {
    pub fn api_value(self) -> &'static str {
        match self {
            SortOrder::ViewCount => "viewCount",
            SortOrder::Date => "date",
            SortOrder::Relevance => "relevance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 30, 15).unwrap()
    }

    #[test]
    fn all_period_has_no_lower_bound() {
        assert_eq!(UploadPeriod::All.published_after(at(2026, 8, 26, 9)), None);
    }

    #[test]
    fn today_starts_at_midnight_utc() {
        let start = UploadPeriod::Today.published_after(at(2026, 8, 26, 9)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 26, 0, 0, 0).unwrap());
    }

    #[test]
    fn week_starts_on_monday() {
        // 2026-08-26 is a Wednesday
        let start = UploadPeriod::Week.published_after(at(2026, 8, 26, 9)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0).unwrap());

        // A Monday maps to itself
        let start = UploadPeriod::Week.published_after(at(2026, 8, 24, 23)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0).unwrap());
    }

    #[test]
    fn month_starts_on_the_first() {
        let start = UploadPeriod::Month.published_after(at(2026, 8, 26, 9)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn api_vocabulary() {
        assert_eq!(SortOrder::ViewCount.api_value(), "viewCount");
        assert_eq!(DurationClass::Medium.api_value(), "medium");
    }
}
