//! Attempt aggregation for quiz statistics.

use crate::models::domain::{QuizAttempt, QuizStats, ScoreDistribution};
use crate::services::grading::{rounded_mean, rounded_percentage};

pub const PASS_THRESHOLD: i32 = 60;

const EXCELLENT_FLOOR: i32 = 90;
const GOOD_FLOOR: i32 = 80;
const AVERAGE_FLOOR: i32 = 70;

/// Summarizes every scored attempt of a single quiz. An empty slice yields all zeros.
pub fn aggregate_stats(attempts: &[QuizAttempt]) -> QuizStats {
    if attempts.is_empty() {
        return QuizStats::default();
    }

    let scores: Vec<i32> = attempts.iter().map(|a| a.score.clamp(0, 100)).collect();

    let mut distribution = ScoreDistribution::default();
    for score in &scores {
        record_score(&mut distribution, *score);
    }

    let passed = scores.iter().filter(|s| **s >= PASS_THRESHOLD).count();

    QuizStats {
        total_attempts: scores.len(),
        average_score: rounded_mean(&scores),
        highest_score: scores.iter().copied().max().unwrap_or(0),
        lowest_score: scores.iter().copied().min().unwrap_or(0),
        pass_rate: rounded_percentage(passed, scores.len()),
        score_distribution: distribution,
    }
}

fn record_score(distribution: &mut ScoreDistribution, score: i32) {
    if score >= EXCELLENT_FLOOR {
        distribution.excellent += 1;
    } else if score >= GOOD_FLOOR {
        distribution.good += 1;
    } else if score >= AVERAGE_FLOOR {
        distribution.average += 1;
    } else {
        distribution.poor += 1;
    }
}
