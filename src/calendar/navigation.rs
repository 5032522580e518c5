//! Month / exact-day navigation shared by the calendar, diary and to-do views.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = String;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        YearMonth::new(raw.year, raw.month)
            .ok_or_else(|| format!("no such month: {}-{}", raw.year, raw.month))
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Following month; the last representable month is its own successor.
    pub fn succ(self) -> Self {
        let next = if self.month == 12 {
            self.year.checked_add(1).map(|year| (year, 1))
        } else {
            self.month.checked_add(1).map(|month| (self.year, month))
        };
        next.and_then(|(year, month)| Self::new(year, month))
            .unwrap_or(self)
    }

    pub fn pred(self) -> Self {
        let prev = if self.month == 1 {
            self.year.checked_sub(1).map(|year| (year, 12))
        } else {
            self.month.checked_sub(1).map(|month| (self.year, month))
        };
        prev.and_then(|(year, month)| Self::new(year, month))
            .unwrap_or(self)
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        (28..=31)
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(self.year, self.month, day))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Every day of the month in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let Self { year, month } = self;
        (1..=self.last_day().day())
            .filter_map(move |day| NaiveDate::from_ymd_opt(year, month, day))
    }

    pub fn name(self) -> String {
        let name = self
            .month
            .checked_sub(1)
            .and_then(|i| MONTH_NAMES.get(i as usize))
            .copied()
            .unwrap_or("Unknown");
        format!("{name} {}", self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigator {
    Month(YearMonth),
    /// Exact-date filter. `month` is where "back to month view" returns.
    Day { date: NaiveDate, month: YearMonth },
}

impl Navigator {
    pub fn new(today: NaiveDate) -> Self {
        Navigator::Month(YearMonth::of(today))
    }

    /// Month mode steps a month, day mode steps a day. At the ends of the
    /// representable calendar the state stays put.
    pub fn next(&mut self) {
        *self = match *self {
            Navigator::Month(m) => Navigator::Month(m.succ()),
            Navigator::Day { date, month } => match date.succ_opt() {
                Some(date) => Navigator::Day {
                    date,
                    month: follow(month, date),
                },
                None => *self,
            },
        };
    }

    pub fn prev(&mut self) {
        *self = match *self {
            Navigator::Month(m) => Navigator::Month(m.pred()),
            Navigator::Day { date, month } => match date.pred_opt() {
                Some(date) => Navigator::Day {
                    date,
                    month: follow(month, date),
                },
                None => *self,
            },
        };
    }

    pub fn today(&mut self, today: NaiveDate) {
        *self = Navigator::Month(YearMonth::of(today));
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        let month = match *self {
            Navigator::Month(m) => m,
            Navigator::Day { month, .. } => month,
        };
        *self = Navigator::Day { date, month };
    }

    pub fn back_to_month(&mut self) {
        if let Navigator::Day { month, .. } = *self {
            *self = Navigator::Month(month);
        }
    }

    pub fn is_day_filter(&self) -> bool {
        matches!(self, Navigator::Day { .. })
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        match self {
            Navigator::Month(_) => None,
            Navigator::Day { date, .. } => Some(*date),
        }
    }

    pub fn month(&self) -> YearMonth {
        match self {
            Navigator::Month(m) => *m,
            Navigator::Day { month, .. } => *month,
        }
    }

    pub fn includes(&self, date: NaiveDate) -> bool {
        match self {
            Navigator::Month(m) => m.contains(date),
            Navigator::Day { date: selected, .. } => *selected == date,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Navigator::Month(m) => m.name(),
            Navigator::Day { date, .. } => date.format("%B %-d, %Y").to_string(),
        }
    }
}

// Stepping days across a month edge carries the remembered month along.
fn follow(month: YearMonth, date: NaiveDate) -> YearMonth {
    if month.contains(date) {
        month
    } else {
        YearMonth::of(date)
    }
}
