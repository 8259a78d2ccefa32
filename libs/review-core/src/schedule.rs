//! Review schedule construction and due-date filters.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::priority::{classify, Priority};
use crate::types::{whole_days_between, ItemReviewState, ItemType, MasteryLevel, Sm2Snapshot};

/// One entry of a learner's review schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSchedule {
    pub item_id: String,
    pub item_type: ItemType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastery_level: Option<MasteryLevel>,
    pub next_review_date: DateTime<Utc>,
    pub priority: Priority,
    pub days_until_review: i64,
    pub sm2: Sm2Snapshot,
}

/// Build a schedule sorted by priority, then by due date.
///
/// The sort is stable: entries with equal priority and due date keep their
/// input order.
pub fn build_schedule(
    states: &[ItemReviewState],
    mastery_by_item: &HashMap<String, MasteryLevel>,
    title_by_item: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Vec<ReviewSchedule> {
    let mut schedule: Vec<ReviewSchedule> = states
        .iter()
        .map(|state| {
            let mastery_level = mastery_by_item.get(&state.item_id).copied();
            let days_until_review = whole_days_between(now, state.next_review_date);
            let title = title_by_item
                .get(&state.item_id)
                .cloned()
                .unwrap_or_else(|| format!("Unknown {}", state.item_type.as_str()));

            ReviewSchedule {
                item_id: state.item_id.clone(),
                item_type: state.item_type,
                title,
                mastery_level,
                next_review_date: state.next_review_date,
                priority: classify(mastery_level, days_until_review),
                days_until_review,
                sm2: state.snapshot(),
            }
        })
        .collect();

    sort_by_priority(&mut schedule);
    schedule
}

/// Recompute `days_until_review` and `priority` of a previously built
/// schedule against `now`, then re-sort.
pub fn refresh_schedule(schedule: &[ReviewSchedule], now: DateTime<Utc>) -> Vec<ReviewSchedule> {
    let mut refreshed: Vec<ReviewSchedule> = schedule
        .iter()
        .map(|entry| {
            let days_until_review = whole_days_between(now, entry.next_review_date);
            ReviewSchedule {
                priority: classify(entry.mastery_level, days_until_review),
                days_until_review,
                ..entry.clone()
            }
        })
        .collect();
    sort_by_priority(&mut refreshed);
    refreshed
}

fn sort_by_priority(schedule: &mut [ReviewSchedule]) {
    schedule.sort_by(|a, b| {
        a.priority
            .severity()
            .cmp(&b.priority.severity())
            .then_with(|| a.next_review_date.cmp(&b.next_review_date))
    });
}

/// Entries whose review day is today or earlier (UTC calendar days).
pub fn due_today(schedule: &[ReviewSchedule], now: DateTime<Utc>) -> Vec<ReviewSchedule> {
    let today = now.date_naive();
    schedule
        .iter()
        .filter(|entry| entry.next_review_date.date_naive() <= today)
        .cloned()
        .collect()
}

/// Entries whose review day falls within the next seven days, today included.
pub fn due_this_week(schedule: &[ReviewSchedule], now: DateTime<Utc>) -> Vec<ReviewSchedule> {
    let today = now.date_naive();
    schedule
        .iter()
        .filter(|entry| {
            let days = (entry.next_review_date.date_naive() - today).num_days();
            (0..=7).contains(&days)
        })
        .cloned()
        .collect()
}
