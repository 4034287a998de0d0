//! Month grid used by the admin calendar and the public date picker.

use chrono::{Datelike, Months, NaiveDate};
use uuid::Uuid;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::models::{Booking, BookingStatus};

/// Bookings listed inline in a day cell before collapsing into "+N mais".
pub const MAX_VISIBLE_BOOKINGS: usize = 3;

pub const WEEKDAY_LABELS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// A calendar month, held as its first day.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - chrono::Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first - chrono::Days::new(1)
    }

    pub fn prev(&self) -> Self {
        Self {
            first: self.first - Months::new(1),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            first: self.first + Months::new(1),
        }
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Weekday of day 1, Sunday = 0.
    pub fn leading_blanks(&self) -> usize {
        self.first.weekday().num_days_from_sunday() as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.month(), day)
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.first.month0() as usize]
    }

    /// "Março 2026"
    pub fn title(&self) -> String {
        format!("{} {}", self.name(), self.year())
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = *self;
        self.first.iter_days().take_while(move |d| month.contains(*d))
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for CalendarMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("invalid month: {}", s))?;

        let year: i32 = year.parse().map_err(|_| format!("invalid month: {}", s))?;
        let month: u32 = month.parse().map_err(|_| format!("invalid month: {}", s))?;

        Self::new(year, month).ok_or_else(|| format!("invalid month: {}", s))
    }
}

/// What clicking a day does in the admin calendar.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DayAction {
    /// Open the booking form pre-filled with this date.
    Create { date: NaiveDate },
    /// Open the list of bookings for this date.
    Details { date: NaiveDate },
}

#[derive(Debug, Clone)]
pub struct DayCell {
    pub date: NaiveDate,
    pub bookings: Vec<Booking>,
    pub is_today: bool,
    pub is_past: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn visible(&self) -> &[Booking] {
        let end = self.bookings.len().min(MAX_VISIBLE_BOOKINGS);
        &self.bookings[..end]
    }

    pub fn overflow(&self) -> usize {
        self.bookings.len().saturating_sub(MAX_VISIBLE_BOOKINGS)
    }

    pub fn action(&self) -> DayAction {
        if self.bookings.is_empty() {
            DayAction::Create { date: self.date }
        } else {
            DayAction::Details { date: self.date }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Public picker: only today and later.
    pub fn is_selectable(&self) -> bool {
        !self.is_past
    }

    pub fn iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub month: CalendarMonth,
    pub leading_blanks: usize,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    pub fn cell_count(&self) -> usize {
        self.leading_blanks + self.days.len()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days.iter().find(|c| c.date == date)
    }
}

pub fn build_month_grid(
    month: CalendarMonth,
    bookings: &[Booking],
    space_filter: Option<Uuid>,
    today: NaiveDate,
) -> MonthGrid {
    let days = month
        .days()
        .map(|date| DayCell {
            date,
            bookings: bookings
                .iter()
                .filter(|b| b.date == date)
                .filter(|b| space_filter.is_none_or(|id| b.space_id == id))
                .cloned()
                .collect(),
            is_today: date == today,
            is_past: date < today,
        })
        .collect();

    MonthGrid {
        month,
        leading_blanks: month.leading_blanks(),
        days,
    }
}

/// Share of (space, day) slots in `month` taken by a booking that is not
/// cancelled, as a whole percentage.
pub fn occupancy_rate(month: CalendarMonth, bookings: &[Booking], space_count: usize) -> u32 {
    if space_count == 0 {
        return 0;
    }

    let taken: HashSet<(Uuid, NaiveDate)> = bookings
        .iter()
        .filter(|b| b.status != BookingStatus::Cancelled && month.contains(b.date))
        .map(|b| (b.space_id, b.date))
        .collect();

    let slots = space_count as f64 * f64::from(month.days_in_month());
    let rate = (taken.len() as f64 / slots * 100.0).round();

    rate.clamp(0.0, 100.0) as u32
}

pub fn bookings_in_month(month: CalendarMonth, bookings: &[Booking]) -> usize {
    bookings.iter().filter(|b| month.contains(b.date)).count()
}
