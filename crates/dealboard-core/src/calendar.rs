//! Month grid of expected close dates.

use std::collections::BTreeMap;

use jiff::{civil::Date, Span};
use serde::Serialize;

use crate::{
    error::{CrmError, Result},
    models::Deal,
    params::CalendarMonth,
};

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: Date,
    /// False for the leading and trailing days of neighbouring months
    pub in_month: bool,
    pub deals: Vec<Deal>,
}

/// A month laid out in whole weeks, Monday first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthView {
    pub month: CalendarMonth,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// The month containing `date`.
    pub fn containing(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Result<Date> {
        Date::new(self.year, self.month, 1).map_err(|e| {
            CrmError::invalid_input("month")
                .with_reason(format!("{}-{:02} is not a month: {e}", self.year, self.month))
        })
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
}

/// Open deals with a close date, grouped by that date. Won and lost deals
/// are left off the calendar.
pub fn deals_by_date(deals: &[Deal]) -> BTreeMap<Date, Vec<Deal>> {
    let mut by_date: BTreeMap<Date, Vec<Deal>> = BTreeMap::new();
    for deal in deals.iter().filter(|d| d.stage.is_open()) {
        if let Some(date) = deal.expected_close_date {
            by_date.entry(date).or_default().push(deal.clone());
        }
    }
    by_date
}

impl MonthView {
    /// Builds the grid from the Monday on or before the 1st to the Sunday on
    /// or after the last day.
    ///
    /// # Errors
    ///
    /// Returns `CrmError::InvalidInput` if `month` names no real month.
    pub fn build(month: CalendarMonth, deals: &[Deal]) -> Result<Self> {
        let first = month.first_day()?;
        let last = first.last_of_month();
        let lead = first.weekday().to_monday_zero_offset();
        let trail = 6 - last.weekday().to_monday_zero_offset();

        let span_error = |e: jiff::Error| {
            CrmError::invalid_input("month").with_reason(format!("calendar out of range: {e}"))
        };
        let start = first.checked_sub(Span::new().days(lead)).map_err(span_error)?;
        let end = last.checked_add(Span::new().days(trail)).map_err(span_error)?;

        let mut by_date = deals_by_date(deals);
        let days = start
            .series(Span::new().days(1))
            .take_while(|d| *d <= end)
            .map(|date| CalendarDay {
                date,
                in_month: date.year() == month.year && date.month() == month.month,
                deals: by_date.remove(&date).unwrap_or_default(),
            })
            .collect();

        Ok(Self { month, days })
    }

    /// The grid split into rows of seven days.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(7)
    }

    /// Days of the month that have deals closing, in date order.
    pub fn busy_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|d| d.in_month && !d.deals.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::models::Stage;

    fn deal(id: u64, stage: Stage, close: Option<Date>) -> Deal {
        Deal {
            id,
            title: format!("Deal {id}"),
            contact_id: 1,
            value: 100.0,
            currency: "SEK".to_string(),
            stage,
            expected_close_date: close,
            notes: None,
            follow_up: false,
            created_by: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn grid_spans_whole_weeks() {
        // May 2024 starts on a Wednesday and ends on a Friday.
        let view = MonthView::build(CalendarMonth { year: 2024, month: 5 }, &[]).unwrap();

        assert_eq!(view.days.first().unwrap().date, date(2024, 4, 29));
        assert_eq!(view.days.last().unwrap().date, date(2024, 6, 2));
        assert_eq!(view.days.len() % 7, 0);
        assert_eq!(view.weeks().count(), 5);
        assert!(!view.days[0].in_month);
        assert!(view.days[2].in_month);
    }

    #[test]
    fn month_starting_on_monday_has_no_lead() {
        // July 2024 starts on a Monday and ends on a Wednesday.
        let view = MonthView::build(CalendarMonth { year: 2024, month: 7 }, &[]).unwrap();
        assert_eq!(view.days[0].date, date(2024, 7, 1));
        assert_eq!(view.days.last().unwrap().date, date(2024, 8, 4));
    }

    #[test]
    fn closed_and_undated_deals_are_left_off() {
        let deals = vec![
            deal(1, Stage::Potential, Some(date(2024, 5, 10))),
            deal(2, Stage::Placed, Some(date(2024, 5, 10))),
            deal(3, Stage::Won, Some(date(2024, 5, 10))),
            deal(4, Stage::Lost, Some(date(2024, 5, 20))),
            deal(5, Stage::Potential, None),
            deal(6, Stage::Placed, Some(date(2024, 6, 1))),
        ];

        let view = MonthView::build(CalendarMonth { year: 2024, month: 5 }, &deals).unwrap();

        let busy: Vec<(Date, Vec<u64>)> = view
            .busy_days()
            .map(|d| (d.date, d.deals.iter().map(|x| x.id).collect()))
            .collect();
        assert_eq!(busy, vec![(date(2024, 5, 10), vec![1, 2])]);

        // Trailing June days still carry their deals.
        let june_first = view.days.iter().find(|d| d.date == date(2024, 6, 1)).unwrap();
        assert_eq!(june_first.deals.len(), 1);
    }

    #[test]
    fn invalid_month_is_rejected() {
        let result = MonthView::build(CalendarMonth { year: 2024, month: 13 }, &[]);
        assert!(matches!(result, Err(CrmError::InvalidInput { .. })));
    }

    #[test]
    fn month_navigation_wraps_years() {
        let dec = CalendarMonth { year: 2024, month: 12 };
        assert_eq!(dec.next().year, 2025);
        assert_eq!(dec.next().month, 1);
        assert_eq!(dec.next().previous().month, 12);
        assert_eq!(CalendarMonth::containing(date(2024, 3, 9)).month, 3);
    }
}
