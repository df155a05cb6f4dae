use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use super::types::{Goal, GoalProgress};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Progress of a savings goal as seen at `now`.
pub fn goal_progress(goal: &Goal, now: NaiveDateTime) -> GoalProgress {
    let percentage = if goal.target_amount == 0.0 {
        0.0
    } else {
        (goal.current_amount / goal.target_amount * 100.0).min(100.0)
    };
    let remaining = (goal.target_amount - goal.current_amount).max(0.0);
    let completed = goal.target_amount > 0.0 && goal.current_amount >= goal.target_amount;

    let days_remaining = goal.deadline.map(|deadline| days_until(deadline, now));
    let monthly_contribution_needed = goal.deadline.map(|deadline| {
        let months = whole_months_between(now.date(), deadline).max(1);
        remaining / months as f64
    });

    GoalProgress {
        percentage,
        remaining,
        completed,
        days_remaining,
        monthly_contribution_needed,
    }
}

/// Whole days left until the start of `deadline`, rounded up.
pub fn days_until(deadline: NaiveDate, now: NaiveDateTime) -> i64 {
    let delta = deadline.and_time(NaiveTime::MIN) - now;
    (delta.num_milliseconds() as f64 / MILLIS_PER_DAY).ceil() as i64
}

fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months = (to.year() as i64 - from.year() as i64) * 12 + to.month() as i64
        - from.month() as i64;
    if to.day() < from.day() {
        months -= 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::{prop_assert, proptest};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn at(d: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
        d.and_hms_opt(h, min, 0).expect("valid time")
    }

    fn goal(target_amount: f64, current_amount: f64, deadline: Option<NaiveDate>) -> Goal {
        Goal {
            target_amount,
            current_amount,
            deadline,
        }
    }

    #[test]
    fn percentage_and_remaining_for_partial_goal() {
        let now = at(date(2025, 3, 10), 12, 0);
        let progress = goal_progress(&goal(10_000.0, 2_500.0, None), now);
        assert_eq!(progress.percentage, 25.0);
        assert_eq!(progress.remaining, 7_500.0);
        assert!(!progress.completed);
        assert_eq!(progress.days_remaining, None);
        assert_eq!(progress.monthly_contribution_needed, None);
    }

    #[test]
    fn over_funded_goal_caps_at_one_hundred() {
        let now = at(date(2025, 3, 10), 12, 0);
        let progress = goal_progress(&goal(1_000.0, 1_500.0, None), now);
        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.remaining, 0.0);
        assert!(progress.completed);
    }

    #[test]
    fn zero_target_reports_zero_percent() {
        let now = at(date(2025, 3, 10), 12, 0);
        let progress = goal_progress(&goal(0.0, 50.0, None), now);
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.remaining, 0.0);
    }

    #[test]
    fn deadline_tomorrow_is_one_day_away() {
        let today = date(2025, 3, 10);
        let tomorrow = today + Duration::days(1);
        for (h, m) in [(0, 0), (0, 1), (9, 30), (23, 59)] {
            assert_eq!(days_until(tomorrow, at(today, h, m)), 1, "at {h}:{m}");
        }
        let progress = goal_progress(&goal(100.0, 0.0, Some(tomorrow)), at(today, 15, 0));
        assert_eq!(progress.days_remaining, Some(1));
    }

    #[test]
    fn past_deadline_counts_down_below_zero() {
        let now = at(date(2025, 3, 10), 8, 0);
        assert_eq!(days_until(date(2025, 3, 10), now), 0);
        assert_eq!(days_until(date(2025, 3, 8), now), -2);
    }

    #[test]
    fn monthly_contribution_spreads_remaining_over_whole_months() {
        let now = at(date(2025, 1, 15), 10, 0);
        let progress = goal_progress(&goal(12_000.0, 6_000.0, Some(date(2025, 7, 15))), now);
        assert_eq!(progress.monthly_contribution_needed, Some(1_000.0));

        // A deadline inside the current month still needs one contribution.
        let soon = goal_progress(&goal(500.0, 200.0, Some(date(2025, 1, 20))), now);
        assert_eq!(soon.monthly_contribution_needed, Some(300.0));
    }

    #[test]
    fn whole_months_ignores_partial_month() {
        assert_eq!(whole_months_between(date(2025, 1, 31), date(2025, 2, 28)), 0);
        assert_eq!(whole_months_between(date(2024, 11, 1), date(2025, 2, 1)), 3);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_percentage_and_remaining_are_bounded(
            target_cents in 0u64..100_000_000,
            current_cents in 0u64..200_000_000
        ) {
            let now = at(date(2025, 6, 1), 12, 0);
            let progress = goal_progress(
                &goal(target_cents as f64 / 100.0, current_cents as f64 / 100.0, None),
                now,
            );
            prop_assert!((0.0..=100.0).contains(&progress.percentage));
            prop_assert!(progress.remaining >= 0.0);
        }
    }
}
