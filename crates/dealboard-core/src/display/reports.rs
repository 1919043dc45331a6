//! Display implementations for the dashboard, goals and calendar views.

use std::fmt;

use super::mask::{Mask, MaskedDisplay};
use crate::{
    calendar::MonthView,
    dashboard::DashboardMetrics,
    goals::{GoalStatus, RevenueProgress, WeeklyProgress},
    models::DEFAULT_CURRENCY,
};

impl MaskedDisplay for DashboardMetrics {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
        writeln!(f, "# Dashboard")?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Pipeline value**: {}",
            mask.money(self.pipeline_value, DEFAULT_CURRENCY)
        )?;
        writeln!(f, "- **Active deals**: {}", self.active_deals)?;
        writeln!(f, "- **Won deals**: {}", self.won_deals)?;
        writeln!(f)?;
        writeln!(f, "## Top deals")?;
        writeln!(f)?;

        if self.top_deals.is_empty() {
            writeln!(f, "_No deals yet._")?;
        }
        for (rank, deal) in self.top_deals.iter().enumerate() {
            writeln!(
                f,
                "{}. **{}** · {} · {}",
                rank + 1,
                mask.name(&deal.title),
                deal.stage.label(),
                mask.money(deal.value, &deal.currency)
            )?;
        }
        Ok(())
    }
}

impl MaskedDisplay for RevenueProgress {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
        writeln!(f, "# Revenue goals")?;
        writeln!(f)?;
        writeln!(
            f,
            "Won so far: **{}** ({}/{} goals reached)",
            mask.money(self.won_total, DEFAULT_CURRENCY),
            self.completed(),
            self.goals.len()
        )?;

        for progress in &self.goals {
            writeln!(f)?;
            let state = match progress.status {
                GoalStatus::Completed => "reached".to_string(),
                GoalStatus::Next { remaining } => {
                    format!("{} to go", mask.money(remaining, DEFAULT_CURRENCY))
                }
                GoalStatus::NotStarted => "not started".to_string(),
            };
            writeln!(
                f,
                "## {} · {} · {:.0}%",
                mask.money(progress.goal.target, DEFAULT_CURRENCY),
                state,
                progress.percent.round()
            )?;
            writeln!(f)?;
            for reward in &progress.goal.rewards {
                writeln!(f, "- {reward}")?;
            }
            writeln!(
                f,
                "- _Estimated cost: {}_",
                mask.money(progress.goal.estimated_cost, DEFAULT_CURRENCY)
            )?;
        }
        Ok(())
    }
}

impl MaskedDisplay for WeeklyProgress {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
        writeln!(f, "# Week {} goal", self.week)?;
        writeln!(f)?;
        writeln!(
            f,
            "New contacts since {}, goal {} per person.",
            self.week_start, self.goal
        )?;
        writeln!(f)?;

        if self.members.is_empty() {
            writeln!(f, "_No contacts added this week._")?;
        }
        for member in &self.members {
            let mark = if member.goal_met { "✓" } else { "○" };
            write!(
                f,
                "- {mark} **{}** {}: {}/{}",
                member.initial(),
                mask.text(&member.email),
                member.count,
                self.goal
            )?;
            let missing = member.missing(self.goal);
            if missing > 0 {
                write!(f, " (needs {missing} more)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl MaskedDisplay for MonthView {
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>, mask: Mask) -> fmt::Result {
        writeln!(f, "# {}-{:02}", self.month.year, self.month.month)?;
        writeln!(f)?;
        writeln!(f, "| Mon | Tue | Wed | Thu | Fri | Sat | Sun |")?;
        writeln!(f, "|----:|----:|----:|----:|----:|----:|----:|")?;
        for week in self.weeks() {
            write!(f, "|")?;
            for day in week {
                let marker = if day.deals.is_empty() { "" } else { "*" };
                if day.in_month {
                    write!(f, " {}{marker} |", day.date.day())?;
                } else {
                    write!(f, " _{}_{marker} |", day.date.day())?;
                }
            }
            writeln!(f)?;
        }

        let mut busy = self.busy_days().peekable();
        if busy.peek().is_none() {
            writeln!(f)?;
            return writeln!(f, "_No open deals close this month._");
        }
        for day in busy {
            writeln!(f)?;
            writeln!(f, "## {}", day.date)?;
            writeln!(f)?;
            for deal in &day.deals {
                writeln!(
                    f,
                    "- **{}** `{}` · {} · {}",
                    mask.name(&deal.title),
                    deal.id,
                    deal.stage.label(),
                    mask.money(deal.value, &deal.currency)
                )?;
            }
        }
        Ok(())
    }
}

macro_rules! plain_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.fmt_masked(f, Mask::Off)
                }
            }
        )*
    };
}

plain_display!(DashboardMetrics, RevenueProgress, WeeklyProgress, MonthView);

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{
        display::Masked,
        goals::{default_goals, MemberProgress},
        params::CalendarMonth,
    };

    #[test]
    fn revenue_progress_display() {
        let progress = RevenueProgress::compute(55_000.0, &default_goals());
        let output = progress.to_string();
        assert!(output.contains("Won so far: **55 000 kr** (1/5 goals reached)"));
        assert!(output.contains("## 10 000 kr · reached · 100%"));
        assert!(output.contains("## 100 000 kr · 45 000 kr to go · 50%"));
        assert!(output.contains("## 250 000 kr · not started · 0%"));
        assert!(output.contains("- First company dinner"));
    }

    #[test]
    fn weekly_progress_display() {
        let weekly = WeeklyProgress {
            week: 20,
            week_start: date(2024, 5, 13),
            goal: 1,
            members: vec![
                MemberProgress {
                    email: "anna@example.com".to_string(),
                    count: 2,
                    goal_met: true,
                },
                MemberProgress {
                    email: "bo@example.com".to_string(),
                    count: 0,
                    goal_met: false,
                },
            ],
        };
        let output = weekly.to_string();
        assert!(output.starts_with("# Week 20 goal"));
        assert!(output.contains("- ✓ **A** anna@example.com: 2/1\n"));
        assert!(output.contains("- ○ **B** bo@example.com: 0/1 (needs 1 more)"));
    }

    #[test]
    fn dashboard_display_masks_money() {
        let metrics = DashboardMetrics::from_deals(&[]);
        assert!(metrics.to_string().contains("- **Pipeline value**: 0 kr"));
        assert!(Masked(&metrics, Mask::Demo)
            .to_string()
            .contains("- **Pipeline value**: ████ kr"));
    }

    #[test]
    fn empty_month_display() {
        let view = MonthView::build(CalendarMonth { year: 2024, month: 5 }, &[]).unwrap();
        let output = view.to_string();
        assert!(output.starts_with("# 2024-05"));
        assert!(output.contains("| _29_ | _30_ | 1 | 2 | 3 | 4 | 5 |"));
        assert!(output.contains("_No open deals close this month._"));
    }
}
