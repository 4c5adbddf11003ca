//! ISO week calculations.
//!
//! Maps every ISO-8601 week of a year to the month its Monday falls in. Week 1
//! may start in December of the previous year and the last week may end in
//! January of the next, so a [`WeekEntry`] can name a month outside the
//! target year's own January..December span only through its Monday.

use crate::error::GenerateError;
use crate::models::{WeekEntry, WeekMap};
use chrono::{Datelike, NaiveDate, Weekday};
use tracing::{debug, instrument, trace};

const WORKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Number of ISO weeks in `year` (52 or 53).
///
/// December 28th always lies in the last ISO week of its year.
pub fn weeks_in_year(year: i32) -> Result<u32, GenerateError> {
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|date| date.iso_week().week())
        .ok_or(GenerateError::InvalidYear(year))
}

/// Monday through Friday of ISO week `week` in `year`.
pub fn week_dates(year: i32, week: u32) -> Result<[NaiveDate; 5], GenerateError> {
    let mut dates = [NaiveDate::MIN; 5];
    for (slot, weekday) in dates.iter_mut().zip(WORKDAYS) {
        *slot = NaiveDate::from_isoywd_opt(year, week, weekday)
            .ok_or(GenerateError::InvalidWeek { year, week })?;
    }
    Ok(dates)
}

/// Build the week-to-month mapping for `year`.
///
/// The map holds exactly [`weeks_in_year`] entries, one per ISO week.
#[instrument(level = "debug")]
pub fn build_week_map(year: i32) -> Result<WeekMap, GenerateError> {
    let weeks = weeks_in_year(year)?;
    let mut map = WeekMap::new();

    for week in 1..=weeks {
        let [monday, .., friday] = week_dates(year, week)?;
        let entry = WeekEntry {
            month: monday.month(),
            day_range: (monday.day(), friday.day()),
        };
        trace!(
            week,
            month = entry.month,
            from = entry.day_range.0,
            to = entry.day_range.1,
            "Mapped ISO week"
        );
        map.insert(week, entry);
    }

    debug!(year, weeks, "Built ISO week map");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weeks_in_year_known_values() {
        assert_eq!(weeks_in_year(2015).unwrap(), 53);
        assert_eq!(weeks_in_year(2019).unwrap(), 52);
        assert_eq!(weeks_in_year(2020).unwrap(), 53);
        assert_eq!(weeks_in_year(2021).unwrap(), 52);
        assert_eq!(weeks_in_year(2026).unwrap(), 53);
    }

    #[test]
    fn test_week_map_covers_every_week() {
        for year in 1995..=2035 {
            let map = build_week_map(year).unwrap();
            let weeks = weeks_in_year(year).unwrap();
            assert_eq!(map.len() as u32, weeks, "year {}", year);
            assert_eq!(map.keys().copied().collect::<Vec<_>>(), (1..=weeks).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_week_entries_stay_within_month_bounds() {
        for year in 2015..=2030 {
            for (week, entry) in build_week_map(year).unwrap() {
                assert!((1..=12).contains(&entry.month), "{} week {}", year, week);

                let [monday, .., friday] = week_dates(year, week).unwrap();
                // Monday's day must exist in the recorded month.
                assert!(
                    NaiveDate::from_ymd_opt(monday.year(), entry.month, entry.day_range.0)
                        .is_some()
                );
                assert!(
                    NaiveDate::from_ymd_opt(friday.year(), friday.month(), entry.day_range.1)
                        .is_some()
                );
                assert!((1..=31).contains(&entry.day_range.1));
            }
        }
    }

    #[test]
    fn test_first_week_of_2020_starts_in_previous_december() {
        let map = build_week_map(2020).unwrap();
        assert_eq!(
            map[&1],
            WeekEntry {
                month: 12,
                day_range: (30, 3)
            }
        );

        let [monday, .., friday] = week_dates(2020, 1).unwrap();
        assert_eq!(monday, NaiveDate::from_ymd_opt(2019, 12, 30).unwrap());
        assert_eq!(friday, NaiveDate::from_ymd_opt(2020, 1, 3).unwrap());
    }

    #[test]
    fn test_last_week_of_2020() {
        let map = build_week_map(2020).unwrap();
        assert_eq!(
            map[&53],
            WeekEntry {
                month: 12,
                day_range: (28, 1)
            }
        );
    }

    #[test]
    fn test_week_dates_rejects_missing_week() {
        assert!(matches!(
            week_dates(2021, 53),
            Err(GenerateError::InvalidWeek { year: 2021, week: 53 })
        ));
        assert!(week_dates(2021, 0).is_err());
    }

    #[test]
    fn test_weeks_in_year_rejects_unrepresentable_year() {
        assert!(matches!(
            weeks_in_year(i32::MAX),
            Err(GenerateError::InvalidYear(_))
        ));
    }
}
