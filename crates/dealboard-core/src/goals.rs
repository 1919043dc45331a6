//! Company revenue milestones and the weekly contact goal.

use std::collections::{BTreeMap, BTreeSet};

use jiff::{civil::Date, Span, Zoned};
use serde::Serialize;

use crate::{
    access::{normalize_email, AccessPolicy},
    error::{CrmError, Result},
    models::Contact,
};

/// New contacts each team member should add per week.
pub const WEEKLY_CONTACT_GOAL: u32 = 1;

/// A revenue milestone and what the team gets for reaching it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueGoal {
    /// Won revenue needed, in the default currency
    pub target: f64,
    pub rewards: Vec<String>,
    pub estimated_cost: f64,
}

impl RevenueGoal {
    pub fn new<I, S>(target: f64, rewards: I, estimated_cost: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target,
            rewards: rewards.into_iter().map(Into::into).collect(),
            estimated_cost,
        }
    }
}

/// The standard milestone ladder, lowest first.
pub fn default_goals() -> Vec<RevenueGoal> {
    vec![
        RevenueGoal::new(10_000.0, ["First company dinner"], 1_500.0),
        RevenueGoal::new(100_000.0, ["Dinner with partners"], 8_000.0),
        RevenueGoal::new(
            250_000.0,
            [
                "Driving licence",
                "Team AI tooling subscription",
                "Pay back the founding sponsorship",
            ],
            60_000.0,
        ),
        RevenueGoal::new(500_000.0, ["2x new high-end laptops"], 80_000.0),
        RevenueGoal::new(1_000_000.0, ["Company kick-off trip with partners"], 120_000.0),
    ]
}

/// Where the team stands on one milestone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GoalStatus {
    Completed,
    /// The lowest milestone not yet reached
    Next { remaining: f64 },
    NotStarted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal: RevenueGoal,
    pub status: GoalStatus,
    /// Progress from the previous milestone to this one, `0..=100`
    pub percent: f64,
}

/// Progress along the whole ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueProgress {
    pub won_total: f64,
    pub goals: Vec<GoalProgress>,
}

impl RevenueProgress {
    /// Places `won_total` on a ladder sorted by ascending target.
    pub fn compute(won_total: f64, goals: &[RevenueGoal]) -> Self {
        let next_index = goals.iter().position(|g| won_total < g.target);

        let goals = goals
            .iter()
            .enumerate()
            .map(|(i, goal)| {
                let previous = if i == 0 { 0.0 } else { goals[i - 1].target };
                let status = if won_total >= goal.target {
                    GoalStatus::Completed
                } else if Some(i) == next_index {
                    GoalStatus::Next {
                        remaining: goal.target - won_total,
                    }
                } else {
                    GoalStatus::NotStarted
                };
                let percent = match status {
                    GoalStatus::Completed => 100.0,
                    _ => ((won_total - previous) / (goal.target - previous) * 100.0).clamp(0.0, 100.0),
                };
                GoalProgress {
                    goal: goal.clone(),
                    status,
                    percent,
                }
            })
            .collect();

        Self { won_total, goals }
    }

    /// The milestone currently being worked towards.
    pub fn next(&self) -> Option<&GoalProgress> {
        self.goals
            .iter()
            .find(|g| matches!(g.status, GoalStatus::Next { .. }))
    }

    pub fn completed(&self) -> usize {
        self.goals
            .iter()
            .filter(|g| g.status == GoalStatus::Completed)
            .count()
    }
}

/// One member's contacts this week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberProgress {
    pub email: String,
    pub count: u32,
    pub goal_met: bool,
}

impl MemberProgress {
    /// Upper-case first letter of the email, used as an avatar.
    pub fn initial(&self) -> char {
        self.email
            .chars()
            .next()
            .map_or('?', |c| c.to_ascii_uppercase())
    }

    /// Contacts still needed to meet `goal`.
    pub fn missing(&self, goal: u32) -> u32 {
        goal.saturating_sub(self.count)
    }
}

/// Contact-creation progress of the team for the current week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyProgress {
    /// ISO week number
    pub week: i8,
    /// Monday the week started
    pub week_start: Date,
    pub goal: u32,
    /// Sorted by email
    pub members: Vec<MemberProgress>,
}

impl WeeklyProgress {
    /// Counts contacts created since Monday 00:00 of the week containing
    /// `now`, in `now`'s time zone.
    ///
    /// Every member of a restricted `team` is listed, with a zero count if
    /// they added nobody. An open policy lists whoever added contacts.
    ///
    /// # Errors
    ///
    /// Returns `CrmError::Configuration` if the week start cannot be placed
    /// in the time zone.
    pub fn compute(contacts: &[Contact], team: &AccessPolicy, goal: u32, now: &Zoned) -> Result<Self> {
        let today = now.date();
        let offset = today.weekday().to_monday_zero_offset();
        let week_start = today
            .checked_sub(Span::new().days(offset))
            .and_then(|monday| monday.to_zoned(now.time_zone().clone()))
            .map_err(|e| CrmError::Configuration {
                message: format!("Cannot compute start of week: {e}"),
            })?;
        let since = week_start.timestamp();

        let mut counts: BTreeMap<String, u32> = team
            .members()
            .iter()
            .map(|m| (m.clone(), 0))
            .collect();
        let restricted: BTreeSet<String> = counts.keys().cloned().collect();

        for contact in contacts.iter().filter(|c| c.created_at >= since) {
            let Some(author) = contact.created_by.as_deref().map(normalize_email) else {
                continue;
            };
            if !team.is_open() && !restricted.contains(&author) {
                continue;
            }
            *counts.entry(author).or_insert(0) += 1;
        }

        let members = counts
            .into_iter()
            .map(|(email, count)| MemberProgress {
                email,
                count,
                goal_met: count >= goal,
            })
            .collect();

        Ok(Self {
            week: today.iso_week_date().week(),
            week_start: week_start.date(),
            goal,
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;

    #[test]
    fn ladder_marks_completed_next_and_pending() {
        let progress = RevenueProgress::compute(55_000.0, &default_goals());

        assert_eq!(progress.goals[0].status, GoalStatus::Completed);
        assert_eq!(progress.goals[0].percent, 100.0);
        assert_eq!(
            progress.goals[1].status,
            GoalStatus::Next { remaining: 45_000.0 }
        );
        assert_eq!(progress.goals[1].percent, 50.0);
        assert_eq!(progress.goals[2].status, GoalStatus::NotStarted);
        assert_eq!(progress.goals[2].percent, 0.0);
        assert_eq!(progress.completed(), 1);
        assert_eq!(progress.next().unwrap().goal.target, 100_000.0);
    }

    #[test]
    fn exact_target_counts_as_completed() {
        let progress = RevenueProgress::compute(10_000.0, &default_goals());
        assert_eq!(progress.goals[0].status, GoalStatus::Completed);
        assert_eq!(progress.goals[1].percent, 0.0);
    }

    #[test]
    fn everything_completed_has_no_next() {
        let progress = RevenueProgress::compute(2_000_000.0, &default_goals());
        assert_eq!(progress.completed(), 5);
        assert!(progress.next().is_none());
    }

    #[test]
    fn nothing_won_starts_at_first_goal() {
        let progress = RevenueProgress::compute(0.0, &default_goals());
        assert_eq!(progress.next().unwrap().goal.target, 10_000.0);
        assert_eq!(progress.goals[0].percent, 0.0);
    }

    fn contact(created_by: &str, created_at: Timestamp) -> Contact {
        Contact {
            name: "Someone".to_string(),
            created_by: Some(created_by.to_string()),
            created_at,
            updated_at: created_at,
            ..Default::default()
        }
    }

    fn at(s: &str) -> Zoned {
        s.parse().unwrap()
    }

    #[test]
    fn weekly_counts_since_monday_midnight() {
        // Thursday 2024-05-16; the week starts Monday 2024-05-13.
        let now = at("2024-05-16T15:00:00+02:00[+02:00]");
        let team = AccessPolicy::team(["bo@example.com", "anna@example.com"]);
        let contacts = vec![
            contact("anna@example.com", at("2024-05-13T00:00:00+02:00[+02:00]").timestamp()),
            contact("anna@example.com", at("2024-05-15T09:00:00+02:00[+02:00]").timestamp()),
            contact("bo@example.com", at("2024-05-12T23:59:00+02:00[+02:00]").timestamp()),
            contact("eve@example.com", at("2024-05-14T10:00:00+02:00[+02:00]").timestamp()),
        ];

        let weekly = WeeklyProgress::compute(&contacts, &team, WEEKLY_CONTACT_GOAL, &now).unwrap();

        assert_eq!(weekly.week, 20);
        assert_eq!(weekly.week_start, date(2024, 5, 13));
        assert_eq!(
            weekly.members,
            vec![
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
            ]
        );
        assert_eq!(weekly.members[1].initial(), 'B');
        assert_eq!(weekly.members[1].missing(weekly.goal), 1);
    }

    #[test]
    fn weekly_on_sunday_belongs_to_previous_monday() {
        let now = at("2024-05-19T22:00:00+02:00[+02:00]");
        let weekly = WeeklyProgress::compute(&[], &AccessPolicy::open(), 1, &now).unwrap();
        assert_eq!(weekly.week_start, date(2024, 5, 13));
        assert!(weekly.members.is_empty());
    }

    #[test]
    fn open_policy_lists_contributors() {
        let now = at("2024-05-16T15:00:00+02:00[+02:00]");
        let contacts = vec![contact(
            "Jonas@Example.com",
            at("2024-05-14T10:00:00+02:00[+02:00]").timestamp(),
        )];

        let weekly = WeeklyProgress::compute(&contacts, &AccessPolicy::open(), 1, &now).unwrap();

        assert_eq!(weekly.members.len(), 1);
        assert_eq!(weekly.members[0].email, "jonas@example.com");
        assert!(weekly.members[0].goal_met);
    }
}
