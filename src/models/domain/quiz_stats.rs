use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub total_attempts: usize,
    pub average_score: i32,
    pub highest_score: i32,
    pub lowest_score: i32,
    pub pass_rate: i32,
    pub score_distribution: ScoreDistribution,
}

/// Attempt counts per score tier. Every attempt lands in exactly one tier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoreDistribution {
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub poor: usize,
}

impl ScoreDistribution {
    pub fn total(&self) -> usize {
        self.excellent + self.good + self.average + self.poor
    }
}
