//! Mood rollups: weekly averages, daily chart series, time-of-day and
//! day-of-week patterns, and week-over-week trend classification.
//!
//! Pure functions over an already-materialized record set. `now` is injected
//! so every window is deterministic under test. Empty input degrades to
//! neutral/None defaults — nothing in here returns an error.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::Serialize;

use crate::models::{Mood, MoodRecord};

/// Neutral-equivalent mean used when a window holds no records.
const EMPTY_WINDOW_MEAN: f64 = 50.0;

/// Trend band: deltas within ±5 points count as stable.
const TREND_THRESHOLD: f64 = 5.0;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// Mean score for one calendar day. `score` stays `None` for days without
/// records — "no data" is distinct from "neutral mood" all the way to the
/// client.
#[derive(Debug, Clone, Serialize)]
pub struct DailyScore {
    pub date: NaiveDate,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayOfWeekScore {
    pub day: &'static str,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodStats {
    /// Mean wellbeing score over the last 7 days; 50 when empty.
    pub weekly_average: f64,
    /// Last 7 calendar days, oldest first.
    pub daily_series: Vec<DailyScore>,
    /// Hour of day (0-23) with the highest all-history mean score.
    pub peak_hour: Option<u32>,
    /// Most frequent mood label across all history.
    pub dominant_mood: Option<Mood>,
    pub trend: Trend,
    /// Mean score per day-of-week name, Monday first, across all history.
    pub weekly_pattern: Vec<DayOfWeekScore>,
    pub total_checkins: usize,
}

pub fn aggregate_mood_stats(records: &[MoodRecord], now: DateTime<Utc>) -> MoodStats {
    MoodStats {
        weekly_average: window_mean(records, now - Duration::days(7), now),
        daily_series: daily_series(records, now),
        peak_hour: peak_hour(records),
        dominant_mood: dominant_mood(records),
        trend: trend(records, now),
        weekly_pattern: weekly_pattern(records),
        total_checkins: records.len(),
    }
}

/// Mean score of records with `start < timestamp <= end`; the neutral
/// default when the window is empty.
fn window_mean(records: &[MoodRecord], start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let scores: Vec<f64> = records
        .iter()
        .filter(|r| r.timestamp > start && r.timestamp <= end)
        .map(|r| f64::from(r.mood.score()))
        .collect();
    if scores.is_empty() {
        return EMPTY_WINDOW_MEAN;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

fn daily_series(records: &[MoodRecord], now: DateTime<Utc>) -> Vec<DailyScore> {
    let today = now.date_naive();
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let scores: Vec<f64> = records
                .iter()
                .filter(|r| r.date == date)
                .map(|r| f64::from(r.mood.score()))
                .collect();
            let score = if scores.is_empty() {
                None
            } else {
                Some(scores.iter().sum::<f64>() / scores.len() as f64)
            };
            DailyScore { date, score }
        })
        .collect()
}

fn peak_hour(records: &[MoodRecord]) -> Option<u32> {
    let mut sums = [0.0f64; 24];
    let mut counts = [0usize; 24];
    for r in records {
        let hour = r.timestamp.hour() as usize;
        sums[hour] += f64::from(r.mood.score());
        counts[hour] += 1;
    }

    let mut best: Option<(u32, f64)> = None;
    // Ascending hour scan; strict comparison keeps the earliest hour on ties.
    for hour in 0..24 {
        if counts[hour] == 0 {
            continue;
        }
        let mean = sums[hour] / counts[hour] as f64;
        match best {
            Some((_, top)) if mean <= top => {}
            _ => best = Some((hour as u32, mean)),
        }
    }
    best.map(|(hour, _)| hour)
}

fn dominant_mood(records: &[MoodRecord]) -> Option<Mood> {
    // First-encounter order, so ties resolve stably by occurrence scan, not
    // alphabetically or by enum index.
    let mut counts: Vec<(Mood, usize)> = Vec::new();
    for r in records {
        match counts.iter_mut().find(|(m, _)| *m == r.mood) {
            Some((_, n)) => *n += 1,
            None => counts.push((r.mood, 1)),
        }
    }

    let mut best: Option<(Mood, usize)> = None;
    for (mood, n) in counts {
        match best {
            Some((_, top)) if n <= top => {}
            _ => best = Some((mood, n)),
        }
    }
    best.map(|(mood, _)| mood)
}

fn trend(records: &[MoodRecord], now: DateTime<Utc>) -> Trend {
    let recent = window_mean(records, now - Duration::days(7), now);
    let previous = window_mean(records, now - Duration::days(14), now - Duration::days(7));
    let delta = recent - previous;
    if delta > TREND_THRESHOLD {
        Trend::Improving
    } else if delta < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

fn weekly_pattern(records: &[MoodRecord]) -> Vec<DayOfWeekScore> {
    let mut sums = [0.0f64; 7];
    let mut counts = [0usize; 7];
    for r in records {
        let dow = r.date.weekday().num_days_from_monday() as usize;
        sums[dow] += f64::from(r.mood.score());
        counts[dow] += 1;
    }

    DAY_NAMES
        .iter()
        .enumerate()
        .map(|(i, day)| DayOfWeekScore {
            day,
            score: if counts[i] == 0 {
                None
            } else {
                Some(sums[i] / counts[i] as f64)
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        "2026-08-05T12:00:00Z".parse().unwrap()
    }

    fn record_at(mood: Mood, timestamp: DateTime<Utc>) -> MoodRecord {
        MoodRecord::new("u".into(), mood, None, timestamp)
    }

    fn record_days_ago(mood: Mood, days: i64) -> MoodRecord {
        record_at(mood, fixed_now() - Duration::days(days))
    }

    // ── empty history ────────────────────────────────────────────────────

    #[test]
    fn test_empty_history_degrades_to_defaults() {
        let stats = aggregate_mood_stats(&[], fixed_now());
        assert_eq!(stats.weekly_average, 50.0);
        assert_eq!(stats.daily_series.len(), 7);
        assert!(stats.daily_series.iter().all(|d| d.score.is_none()));
        assert_eq!(stats.peak_hour, None);
        assert_eq!(stats.dominant_mood, None);
        assert_eq!(stats.trend, Trend::Stable);
        assert!(stats.weekly_pattern.iter().all(|d| d.score.is_none()));
        assert_eq!(stats.total_checkins, 0);
    }

    // ── weekly average ───────────────────────────────────────────────────

    #[test]
    fn test_week_of_happy_averages_ninety() {
        let records: Vec<_> = (0..7)
            .map(|_| record_at(Mood::Happy, fixed_now() - Duration::hours(1)))
            .collect();
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.weekly_average, 90.0);
    }

    #[test]
    fn test_records_outside_the_week_are_excluded() {
        let records = vec![
            record_at(Mood::Happy, fixed_now() - Duration::hours(1)),
            record_days_ago(Mood::Sad, 10),
        ];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.weekly_average, 90.0);
    }

    // ── daily series ─────────────────────────────────────────────────────

    #[test]
    fn test_daily_series_is_oldest_first_and_preserves_gaps() {
        let records = vec![record_at(Mood::Calm, fixed_now() - Duration::hours(2))];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.daily_series.len(), 7);
        assert_eq!(
            stats.daily_series[0].date,
            fixed_now().date_naive() - Duration::days(6)
        );
        assert_eq!(stats.daily_series[6].date, fixed_now().date_naive());
        // Only today has data; gaps stay None rather than 0 or 50.
        assert_eq!(stats.daily_series[6].score, Some(75.0));
        assert!(stats.daily_series[..6].iter().all(|d| d.score.is_none()));
    }

    #[test]
    fn test_daily_mean_averages_same_day_records() {
        let records = vec![
            record_at(Mood::Happy, fixed_now() - Duration::hours(1)),
            record_at(Mood::Neutral, fixed_now() - Duration::hours(3)),
        ];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.daily_series[6].score, Some(70.0));
    }

    // ── peak hour ────────────────────────────────────────────────────────

    #[test]
    fn test_peak_hour_reports_highest_mean() {
        let base = fixed_now().date_naive();
        let records = vec![
            record_at(Mood::Sad, base.and_hms_opt(8, 0, 0).unwrap().and_utc()),
            record_at(Mood::Happy, base.and_hms_opt(19, 30, 0).unwrap().and_utc()),
        ];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.peak_hour, Some(19));
    }

    #[test]
    fn test_peak_hour_tie_takes_earliest_hour() {
        let base = fixed_now().date_naive();
        let records = vec![
            record_at(Mood::Happy, base.and_hms_opt(15, 0, 0).unwrap().and_utc()),
            record_at(Mood::Happy, base.and_hms_opt(9, 0, 0).unwrap().and_utc()),
        ];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.peak_hour, Some(9));
    }

    // ── dominant mood ────────────────────────────────────────────────────

    #[test]
    fn test_dominant_mood_is_most_frequent() {
        let records = vec![
            record_days_ago(Mood::Sad, 1),
            record_days_ago(Mood::Happy, 2),
            record_days_ago(Mood::Sad, 3),
        ];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.dominant_mood, Some(Mood::Sad));
    }

    #[test]
    fn test_dominant_mood_tie_is_first_encountered() {
        let records = vec![
            record_days_ago(Mood::Stressed, 1),
            record_days_ago(Mood::Happy, 2),
            record_days_ago(Mood::Stressed, 3),
            record_days_ago(Mood::Happy, 4),
        ];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.dominant_mood, Some(Mood::Stressed));
    }

    // ── trend ────────────────────────────────────────────────────────────

    #[test]
    fn test_identical_windows_are_stable() {
        let records = vec![
            record_days_ago(Mood::Calm, 1),
            record_days_ago(Mood::Calm, 10),
        ];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.trend, Trend::Stable);
    }

    #[test]
    fn test_score_gain_beyond_threshold_is_improving() {
        // previous window mean: anxious = 30; recent: (20+20+90+20)/4 = 37.5.
        let records = vec![
            record_days_ago(Mood::Anxious, 10),
            record_days_ago(Mood::Sad, 1),
            record_days_ago(Mood::Sad, 2),
            record_days_ago(Mood::Happy, 3),
            record_days_ago(Mood::Sad, 4),
        ];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.trend, Trend::Improving);
    }

    #[test]
    fn test_score_drop_beyond_threshold_is_declining() {
        // recent: sad = 20; previous: (30+50)/2 = 40.
        let records = vec![
            record_days_ago(Mood::Sad, 1),
            record_days_ago(Mood::Anxious, 10),
            record_days_ago(Mood::Neutral, 11),
        ];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.trend, Trend::Declining);
    }

    #[test]
    fn test_empty_previous_window_defaults_to_neutral_mean() {
        // Recent week of happy vs an empty previous week (treated as 50).
        let records = vec![record_days_ago(Mood::Happy, 1)];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.trend, Trend::Improving);
    }

    #[test]
    fn test_within_threshold_is_stable() {
        // recent calm (75) vs previous happy/calm mix would exceed; use
        // neutral (50) vs anxious+calm mix (52.5): delta 2.5 -> stable.
        let records = vec![
            record_days_ago(Mood::Neutral, 1),
            record_days_ago(Mood::Anxious, 10),
            record_days_ago(Mood::Calm, 11),
        ];
        let stats = aggregate_mood_stats(&records, fixed_now());
        assert_eq!(stats.trend, Trend::Stable);
    }

    // ── weekly pattern ───────────────────────────────────────────────────

    #[test]
    fn test_weekly_pattern_buckets_by_day_name() {
        // 2026-08-05 is a Wednesday.
        let now = fixed_now();
        assert_eq!(now.date_naive().weekday().num_days_from_monday(), 2);

        let records = vec![record_at(Mood::Happy, now - Duration::hours(1))];
        let stats = aggregate_mood_stats(&records, now);
        assert_eq!(stats.weekly_pattern.len(), 7);
        assert_eq!(stats.weekly_pattern[2].day, "Wednesday");
        assert_eq!(stats.weekly_pattern[2].score, Some(90.0));
        assert!(stats.weekly_pattern[0].score.is_none());
    }
}
