//! Daily drill selection.
//!
//! One forced-practice item is drawn per day from the learner's completion
//! history. The draw favors recently completed and weakly mastered items:
//! recency sets a base weight of 0.4 / 0.3 / 0.2 / 0.1 and mastery scales it.
//! Which concrete drill is presented for the chosen item is left to the
//! caller.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{whole_days_between, CompletionRecord, ItemType, MasteryLevel};

/// Source of uniform draws in `[0, 1)`.
///
/// Callers own seeding.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Adapts any `rand` generator into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// A completed item weighted for the daily draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDrillCandidate {
    pub item_id: String,
    pub item_type: ItemType,
    pub title: String,
    pub completed_at: DateTime<Utc>,
    pub days_since_completion: i64,
    /// Normalized across the candidates of one draw.
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastery_level: Option<MasteryLevel>,
}

/// Whether today's drill is still outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDrillStatus {
    pub required: bool,
    pub completed_today: bool,
}

pub fn recency_weight(days_since: i64) -> f64 {
    match days_since {
        d if d <= 1 => 0.4,
        d if d <= 7 => 0.3,
        d if d <= 30 => 0.2,
        _ => 0.1,
    }
}

pub fn mastery_multiplier(mastery: Option<MasteryLevel>) -> f64 {
    match mastery {
        Some(MasteryLevel::Crawl) => 1.5,
        Some(MasteryLevel::Walk) => 1.2,
        Some(MasteryLevel::RunGuided) | None => 1.0,
        Some(MasteryLevel::RunIndependent) => 0.8,
    }
}

/// Weight every completion and normalize so the weights sum to 1.
pub fn weigh_candidates(completions: &[CompletionRecord], now: DateTime<Utc>) -> Vec<DailyDrillCandidate> {
    let mut candidates: Vec<DailyDrillCandidate> = completions
        .iter()
        .map(|record| {
            let days_since_completion = whole_days_between(record.completed_at, now);
            DailyDrillCandidate {
                item_id: record.item_id.clone(),
                item_type: record.item_type,
                title: record.title.clone(),
                completed_at: record.completed_at,
                days_since_completion,
                weight: recency_weight(days_since_completion) * mastery_multiplier(record.mastery_level),
                mastery_level: record.mastery_level,
            }
        })
        .collect();

    let total: f64 = candidates.iter().map(|c| c.weight).sum();
    if total > 0.0 {
        for candidate in &mut candidates {
            candidate.weight /= total;
        }
    }
    candidates
}

/// Draw one candidate, or `None` when there is no history.
///
/// Weights are accumulated in input order and the first candidate whose
/// cumulative weight reaches the draw wins. If rounding leaves the draw
/// uncovered, the first candidate is returned.
pub fn select_one<S: RandomSource + ?Sized>(
    completions: &[CompletionRecord],
    now: DateTime<Utc>,
    rng: &mut S,
) -> Option<DailyDrillCandidate> {
    let candidates = weigh_candidates(completions, now);
    let index = draw_index(&candidates, rng.next_unit())?;
    candidates.into_iter().nth(index)
}

/// Draw up to `count` candidates with distinct item ids. Every history record
/// of a winning item leaves the pool before the next round.
pub fn select_many<S: RandomSource + ?Sized>(
    completions: &[CompletionRecord],
    count: usize,
    now: DateTime<Utc>,
    rng: &mut S,
) -> Vec<DailyDrillCandidate> {
    let mut remaining = completions.to_vec();
    let mut selected = Vec::with_capacity(count.min(remaining.len()));

    while selected.len() < count && !remaining.is_empty() {
        let candidates = weigh_candidates(&remaining, now);
        let Some(index) = draw_index(&candidates, rng.next_unit()) else {
            break;
        };
        let Some(winner) = candidates.into_iter().nth(index) else {
            break;
        };
        remaining.retain(|record| record.item_id != winner.item_id);
        selected.push(winner);
    }
    selected
}

fn draw_index(candidates: &[DailyDrillCandidate], draw: f64) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    let mut cumulative = 0.0;
    for (index, candidate) in candidates.iter().enumerate() {
        cumulative += candidate.weight;
        if cumulative >= draw {
            return Some(index);
        }
    }
    Some(0)
}

/// Whether a drill was recorded on the same UTC calendar day as `now`.
pub fn has_drill_today(last_drill_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    last_drill_at.is_some_and(|at| at.date_naive() == now.date_naive())
}

/// Daily drill requirement for a learner. Learners with no completed items
/// are never required to drill.
pub fn drill_status(
    completion_count: usize,
    last_drill_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> DailyDrillStatus {
    let completed_today = has_drill_today(last_drill_at, now);
    DailyDrillStatus {
        required: completion_count > 0 && !completed_today,
        completed_today,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    struct Sequence(Vec<f64>, usize);

    impl RandomSource for Sequence {
        fn next_unit(&mut self) -> f64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap()
    }

    fn record(id: &str, days_ago: i64, mastery: Option<MasteryLevel>) -> CompletionRecord {
        CompletionRecord {
            item_id: id.to_string(),
            item_type: ItemType::Drill,
            title: format!("Drill {}", id),
            completed_at: now() - Duration::days(days_ago),
            mastery_level: mastery,
        }
    }

    #[test]
    fn empty_history_selects_nothing() {
        let mut rng = Sequence(vec![0.5], 0);
        assert!(select_one(&[], now(), &mut rng).is_none());
        assert!(select_many(&[], 3, now(), &mut rng).is_empty());
    }

    #[test]
    fn recency_bands() {
        assert_eq!(recency_weight(0), 0.4);
        assert_eq!(recency_weight(1), 0.4);
        assert_eq!(recency_weight(2), 0.3);
        assert_eq!(recency_weight(7), 0.3);
        assert_eq!(recency_weight(30), 0.2);
        assert_eq!(recency_weight(31), 0.1);
    }

    #[test]
    fn weights_are_normalized() {
        let completions = vec![
            record("a", 0, Some(MasteryLevel::Crawl)),
            record("b", 40, Some(MasteryLevel::RunIndependent)),
        ];
        let candidates = weigh_candidates(&completions, now());
        // 0.4 * 1.5 = 0.6 and 0.1 * 0.8 = 0.08
        assert!((candidates[0].weight - 0.6 / 0.68).abs() < 1e-12);
        assert!((candidates[1].weight - 0.08 / 0.68).abs() < 1e-12);
        assert_eq!(candidates[1].days_since_completion, 40);
    }

    #[test]
    fn draw_walks_cumulative_weights_in_order() {
        let completions = vec![record("a", 3, None), record("b", 3, None)];
        let mut low = Sequence(vec![0.2], 0);
        let mut high = Sequence(vec![0.9], 0);
        assert_eq!(select_one(&completions, now(), &mut low).unwrap().item_id, "a");
        assert_eq!(select_one(&completions, now(), &mut high).unwrap().item_id, "b");
    }

    #[test]
    fn uncovered_draw_falls_back_to_first() {
        let completions = vec![record("a", 3, None), record("b", 3, None)];
        let mut rng = Sequence(vec![1.5], 0);
        assert_eq!(select_one(&completions, now(), &mut rng).unwrap().item_id, "a");
    }

    #[test]
    fn select_many_returns_distinct_items() {
        let completions = vec![
            record("a", 0, None),
            record("b", 5, Some(MasteryLevel::Walk)),
            record("c", 20, None),
            record("d", 90, Some(MasteryLevel::RunGuided)),
        ];
        let mut rng = RngSource(ChaCha8Rng::seed_from_u64(7));
        for count in 0..6 {
            let picked = select_many(&completions, count, now(), &mut rng);
            assert_eq!(picked.len(), count.min(completions.len()));
            let unique: HashSet<_> = picked.iter().map(|c| c.item_id.clone()).collect();
            assert_eq!(unique.len(), picked.len());
        }
    }

    #[test]
    fn select_many_removes_winner_each_round() {
        let completions = vec![record("a", 3, None), record("b", 3, None), record("c", 3, None)];
        // Always draw near zero: the first remaining item wins every round.
        let mut rng = Sequence(vec![0.0], 0);
        let picked = select_many(&completions, 3, now(), &mut rng);
        let ids: Vec<_> = picked.iter().map(|c| c.item_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!((picked[1].weight - 0.5).abs() < 1e-12);
        assert_eq!(picked[2].weight, 1.0);
    }

    #[test]
    fn select_many_skips_repeat_completions_of_a_winner() {
        let completions = vec![record("a", 0, None), record("a", 3, None), record("b", 10, None)];
        let mut rng = Sequence(vec![0.0], 0);
        let picked = select_many(&completions, 3, now(), &mut rng);
        let ids: Vec<_> = picked.iter().map(|c| c.item_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(picked[1].weight, 1.0);
    }

    #[test]
    fn empirical_frequency_matches_weight() {
        let completions = vec![
            record("recent", 0, Some(MasteryLevel::Crawl)),
            record("old", 40, Some(MasteryLevel::RunIndependent)),
        ];
        let expected = weigh_candidates(&completions, now())[0].weight;
        let mut rng = RngSource(ChaCha8Rng::seed_from_u64(42));

        let draws = 10_000;
        let hits = (0..draws)
            .filter(|_| {
                select_one(&completions, now(), &mut rng)
                    .map(|c| c.item_id == "recent")
                    .unwrap_or(false)
            })
            .count();
        let frequency = hits as f64 / draws as f64;
        assert!(
            (frequency - expected).abs() < 0.03,
            "frequency {} vs weight {}",
            frequency,
            expected
        );
    }

    #[test]
    fn drill_today_compares_calendar_days() {
        let late_yesterday = Utc.with_ymd_and_hms(2024, 9, 1, 23, 59, 0).unwrap();
        let early_today = Utc.with_ymd_and_hms(2024, 9, 2, 0, 1, 0).unwrap();
        assert!(!has_drill_today(Some(late_yesterday), now()));
        assert!(has_drill_today(Some(early_today), now()));
        assert!(!has_drill_today(None, now()));
    }

    #[test]
    fn new_learners_are_not_required_to_drill() {
        let status = drill_status(0, None, now());
        assert!(!status.required);
        assert!(!status.completed_today);

        let due = drill_status(4, None, now());
        assert!(due.required);

        let done = drill_status(4, Some(now() - Duration::hours(1)), now());
        assert_eq!(
            done,
            DailyDrillStatus {
                required: false,
                completed_today: true
            }
        );
    }
}
