//! Month and year scopes that bound every aggregation query.

use std::ops::RangeInclusive;

use serde::Deserialize;
use time::{Date, Month, OffsetDateTime};

use crate::{Error, error::ValidationIssue};

/// The earliest year a scope may refer to.
pub const MIN_YEAR: i32 = 2000;
/// The latest year a scope may refer to.
pub const MAX_YEAR: i32 = 2100;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One calendar month of one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthScope {
    year: i32,
    month: Month,
}

impl MonthScope {
    /// Create a scope from raw request values.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every out of range field if `month`
    /// is not in 1..=12 or `year` is not in [MIN_YEAR]..=[MAX_YEAR].
    pub fn new(month: i64, year: i64) -> Result<Self, Error> {
        let mut issues = Vec::new();

        let month = match u8::try_from(month).ok().and_then(|m| Month::try_from(m).ok()) {
            Some(month) => Some(month),
            None => {
                issues.push(ValidationIssue {
                    path: "month".to_owned(),
                    message: "month must be between 1 and 12".to_owned(),
                });
                None
            }
        };

        let year = match validate_year(year) {
            Ok(year) => Some(year),
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        match (month, year) {
            (Some(month), Some(year)) => Ok(Self { year, month }),
            _ => Err(Error::validation_issues(issues)),
        }
    }

    /// The scope containing `date`.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month number, 1 to 12.
    pub fn month(&self) -> u8 {
        self.month as u8
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Three letter label for the month, e.g. "Jan".
    pub fn label(&self) -> &'static str {
        MONTH_LABELS[usize::from(self.month()) - 1]
    }

    /// The month before this one, rolling back across a year boundary.
    pub fn previous(&self) -> Self {
        match self.month {
            Month::January => Self {
                year: self.year - 1,
                month: Month::December,
            },
            month => Self {
                year: self.year,
                month: month.previous(),
            },
        }
    }

    /// The month after this one, rolling over a year boundary.
    pub fn next(&self) -> Self {
        match self.month {
            Month::December => Self {
                year: self.year + 1,
                month: Month::January,
            },
            month => Self {
                year: self.year,
                month: month.next(),
            },
        }
    }

    /// The month `count` months before this one.
    pub fn minus_months(&self, count: u32) -> Self {
        (0..count).fold(*self, |scope, _| scope.previous())
    }

    /// The first calendar day of the month.
    pub fn first_day(&self) -> Date {
        // Years handled by the app are well within the range `time` supports.
        Date::from_calendar_date(self.year, self.month, 1)
            .expect("the first day of a month is always a valid date")
    }

    /// The last calendar day of the month.
    pub fn last_day(&self) -> Date {
        self.next()
            .first_day()
            .previous_day()
            .expect("the day before the first of a month is always a valid date")
    }

    /// The number of days in the month.
    pub fn days_in_month(&self) -> u8 {
        self.last_day().day()
    }

    /// Inclusive bounds from the first to the last day of the month.
    pub fn date_range(&self) -> RangeInclusive<Date> {
        self.first_day()..=self.last_day()
    }

    /// The date in this month on `day`, clamped to the last day of the month.
    pub fn clamped_date(&self, day: u8) -> Date {
        let day = day.clamp(1, self.days_in_month());

        self.first_day()
            .replace_day(day)
            .expect("a day clamped to the month length is always valid")
    }
}

/// A calendar year used by the trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearScope(i32);

impl YearScope {
    /// Create a scope from a raw request value.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `year` is not in [MIN_YEAR]..=[MAX_YEAR].
    pub fn new(year: i64) -> Result<Self, Error> {
        validate_year(year)
            .map(Self)
            .map_err(|issue| Error::validation_issues(vec![issue]))
    }

    /// The current year in UTC.
    pub fn current() -> Self {
        Self(OffsetDateTime::now_utc().year())
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.0
    }

    /// The twelve months of the year in calendar order.
    pub fn months(&self) -> impl Iterator<Item = MonthScope> {
        let year = self.0;
        let mut month = Month::December;

        (0..12).map(move |_| {
            month = month.next();
            MonthScope { year, month }
        })
    }

    /// Inclusive bounds from 1 January to 31 December.
    pub fn date_range(&self) -> RangeInclusive<Date> {
        let january = MonthScope {
            year: self.0,
            month: Month::January,
        };
        let december = MonthScope {
            year: self.0,
            month: Month::December,
        };

        january.first_day()..=december.last_day()
    }
}

fn validate_year(year: i64) -> Result<i32, ValidationIssue> {
    i32::try_from(year)
        .ok()
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
        .ok_or_else(|| ValidationIssue {
            path: "year".to_owned(),
            message: format!("year must be between {MIN_YEAR} and {MAX_YEAR}"),
        })
}

/// Query parameters for endpoints scoped to a single month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthYearQuery {
    /// The month, 1 to 12.
    pub month: Option<i64>,
    /// The year.
    pub year: Option<i64>,
}

impl TryFrom<MonthYearQuery> for MonthScope {
    type Error = Error;

    fn try_from(query: MonthYearQuery) -> Result<Self, Self::Error> {
        match (query.month, query.year) {
            (Some(month), Some(year)) => MonthScope::new(month, year),
            (month, year) => {
                let mut issues = Vec::new();

                if month.is_none() {
                    issues.push(ValidationIssue {
                        path: "month".to_owned(),
                        message: "month is required".to_owned(),
                    });
                }

                if year.is_none() {
                    issues.push(ValidationIssue {
                        path: "year".to_owned(),
                        message: "year is required".to_owned(),
                    });
                }

                Err(Error::validation_issues(issues))
            }
        }
    }
}

/// Query parameters for the yearly trend endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    /// The year, defaults to the current year.
    pub year: Option<i64>,
}

impl TryFrom<YearQuery> for YearScope {
    type Error = Error;

    fn try_from(query: YearQuery) -> Result<Self, Self::Error> {
        match query.year {
            Some(year) => YearScope::new(year),
            None => Ok(YearScope::current()),
        }
    }
}

#[cfg(test)]
mod month_scope_tests {
    use time::macros::date;

    use crate::Error;

    use super::{MonthScope, MonthYearQuery, YearScope};

    #[test]
    fn rejects_out_of_range_month_and_year() {
        let result = MonthScope::new(13, 1999);

        let Err(Error::Validation { issues, .. }) = result else {
            panic!("want a validation error");
        };
        let paths: Vec<_> = issues.iter().map(|issue| issue.path.as_str()).collect();
        assert_eq!(paths, vec!["month", "year"]);
    }

    #[test]
    fn rejects_month_zero() {
        assert!(MonthScope::new(0, 2024).is_err());
    }

    #[test]
    fn accepts_bounds() {
        assert!(MonthScope::new(1, 2000).is_ok());
        assert!(MonthScope::new(12, 2100).is_ok());
    }

    #[test]
    fn previous_rolls_back_across_year() {
        let january = MonthScope::new(1, 2024).unwrap();

        let previous = january.previous();

        assert_eq!(previous, MonthScope::new(12, 2023).unwrap());
    }

    #[test]
    fn minus_three_months_from_february() {
        let february = MonthScope::new(2, 2024).unwrap();

        assert_eq!(february.minus_months(3), MonthScope::new(11, 2023).unwrap());
    }

    #[test]
    fn date_range_covers_whole_month() {
        let scope = MonthScope::new(2, 2024).unwrap();

        let range = scope.date_range();

        assert_eq!(*range.start(), date!(2024 - 02 - 01));
        assert_eq!(*range.end(), date!(2024 - 02 - 29));
    }

    #[test]
    fn december_ends_on_the_31st() {
        let scope = MonthScope::new(12, 2023).unwrap();

        assert_eq!(scope.last_day(), date!(2023 - 12 - 31));
    }

    #[test]
    fn clamped_date_uses_last_day_for_short_months() {
        let april = MonthScope::new(4, 2024).unwrap();
        let february = MonthScope::new(2, 2023).unwrap();

        assert_eq!(april.clamped_date(31), date!(2024 - 04 - 30));
        assert_eq!(february.clamped_date(30), date!(2023 - 02 - 28));
        assert_eq!(april.clamped_date(15), date!(2024 - 04 - 15));
    }

    #[test]
    fn query_without_month_is_invalid() {
        let query = MonthYearQuery {
            month: None,
            year: Some(2024),
        };

        let result = MonthScope::try_from(query);

        let Err(Error::Validation { issues, .. }) = result else {
            panic!("want a validation error");
        };
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "month");
    }

    #[test]
    fn year_months_are_in_calendar_order() {
        let year = YearScope::new(2024).unwrap();

        let labels: Vec<_> = year.months().map(|month| month.label()).collect();

        assert_eq!(
            labels,
            vec![
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
                "Dec"
            ]
        );
        assert!(year.months().all(|month| month.year() == 2024));
    }

    #[test]
    fn year_out_of_range_is_invalid() {
        assert!(YearScope::new(1999).is_err());
        assert!(YearScope::new(2101).is_err());
    }
}
