//! Month/year filter window: `[YYYY-MM-01, next-month-01)`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

const MONTH_NAMES_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("invalid month '{0}' (expected YYYY-MM)")]
    InvalidFormat(String),
    #[error("month out of range: {0}")]
    InvalidMonth(u32),
}

/// A calendar month selected on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthWindow {
    year: i32,
    month: u32,
}

impl MonthWindow {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PeriodError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month (inclusive bound).
    pub fn start(&self) -> NaiveDate {
        first_day(self.year, self.month)
    }

    /// First day of the following month (exclusive bound).
    pub fn end_exclusive(&self) -> NaiveDate {
        self.next().start()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date < self.end_exclusive()
    }

    /// Date parameter the API filters by: `YYYY-MM-01`.
    pub fn query_param(&self) -> String {
        self.start().format("%Y-%m-%d").to_string()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Portuguese label, e.g. "março de 2026".
    pub fn label_pt(&self) -> String {
        format!("{} de {}", MONTH_NAMES_PT[(self.month - 1) as usize], self.year)
    }
}

fn first_day(year: i32, month: u32) -> NaiveDate {
    // Only reachable with pairs `MonthWindow::new` already accepted.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

impl FromStr for MonthWindow {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| PeriodError::InvalidFormat(s.to_string()))?;
        let digits = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
        if y.len() != 4 || m.is_empty() || m.len() > 2 || !digits(y) || !digits(m) {
            return Err(PeriodError::InvalidFormat(s.to_string()));
        }
        let year: i32 = y
            .parse()
            .map_err(|_| PeriodError::InvalidFormat(s.to_string()))?;
        let month: u32 = m
            .parse()
            .map_err(|_| PeriodError::InvalidFormat(s.to_string()))?;
        Self::new(year, month)
    }
}

impl fmt::Display for MonthWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let w: MonthWindow = "2026-03".parse().unwrap();
        assert_eq!(w.year(), 2026);
        assert_eq!(w.month(), 3);
        assert_eq!(w.to_string(), "2026-03");
        assert_eq!(w.query_param(), "2026-03-01");
        assert_eq!("2026-3".parse::<MonthWindow>().unwrap(), w);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("2026-13".parse::<MonthWindow>(), Err(PeriodError::InvalidMonth(13)));
        assert_eq!("2026-00".parse::<MonthWindow>(), Err(PeriodError::InvalidMonth(0)));
        assert!(matches!("março".parse::<MonthWindow>(), Err(PeriodError::InvalidFormat(_))));
        assert!(matches!("26-03".parse::<MonthWindow>(), Err(PeriodError::InvalidFormat(_))));
        assert!(matches!("2026-03-01".parse::<MonthWindow>(), Err(PeriodError::InvalidFormat(_))));
        assert!(matches!("2026-+3".parse::<MonthWindow>(), Err(PeriodError::InvalidFormat(_))));
        assert!(matches!("+202-03".parse::<MonthWindow>(), Err(PeriodError::InvalidFormat(_))));
        assert!(matches!("2026- 3".parse::<MonthWindow>(), Err(PeriodError::InvalidFormat(_))));
    }

    #[test]
    fn test_half_open_bounds() {
        let w = MonthWindow::new(2026, 2).unwrap();
        assert_eq!(w.start(), date(2026, 2, 1));
        assert_eq!(w.end_exclusive(), date(2026, 3, 1));
        assert!(w.contains(date(2026, 2, 28)));
        assert!(!w.contains(date(2026, 3, 1)));
        assert!(!w.contains(date(2026, 1, 31)));
    }

    #[test]
    fn test_december_rolls_over() {
        let w = MonthWindow::new(2025, 12).unwrap();
        assert_eq!(w.end_exclusive(), date(2026, 1, 1));
        assert_eq!(w.next(), MonthWindow::new(2026, 1).unwrap());
        assert_eq!(MonthWindow::new(2026, 1).unwrap().previous(), w);
    }

    #[test]
    fn test_label_pt() {
        assert_eq!(MonthWindow::new(2026, 3).unwrap().label_pt(), "março de 2026");
        assert_eq!(MonthWindow::containing(date(2024, 12, 25)).label_pt(), "dezembro de 2024");
    }
}
