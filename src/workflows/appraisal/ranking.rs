//! Rank aggregation: collapses raw per-question assessment values into
//! per-criterion rounded average ranks for self- and team-level reporting.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::domain::{Assessment, CriterionId, UserId};
use super::repository::{AssessmentStore, RepositoryError};

/// Error raised by rank aggregation.
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("no self assessment recorded for user {0}")]
    NoSelfAssessment(UserId),
    #[error("multiple self assessments recorded for user {0}")]
    MultipleSelfAssessments(UserId),
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

/// Stateless aggregation engine over the assessment store seam.
pub struct RankingService<S> {
    assessments: Arc<S>,
}

impl<S: AssessmentStore + 'static> RankingService<S> {
    pub fn new(assessments: Arc<S>) -> Self {
        Self { assessments }
    }

    /// Per-criterion rounded average over the user's single self assessment.
    /// Zero averages are kept; zero or multiple self assessments are explicit
    /// error cases.
    pub fn average_by_self(
        &self,
        user: UserId,
    ) -> Result<BTreeMap<CriterionId, i64>, RankingError> {
        let mut found = self.assessments.find_self_by_user(user)?;
        match found.len() {
            0 => Err(RankingError::NoSelfAssessment(user)),
            1 => Ok(rounded_averages(&found.remove(0))),
            _ => Err(RankingError::MultipleSelfAssessments(user)),
        }
    }

    /// Per-criterion rounded averages across the user's team assessments.
    ///
    /// Details are grouped within each assessment independently, never merged
    /// across assessments: when two assessments score the same criterion, the
    /// later one (by assessment id) overwrites the earlier entry. An entry
    /// whose rounded average is exactly zero is treated as absent and never
    /// inserted. Both quirks are inherited behavior, preserved on purpose and
    /// pinned by tests.
    pub fn average_by_team(
        &self,
        user: UserId,
    ) -> Result<BTreeMap<CriterionId, i64>, RankingError> {
        let mut assessments = self.assessments.find_team_by_user(user)?;
        assessments.sort_by_key(|assessment| assessment.id);

        let mut result = BTreeMap::new();
        for assessment in &assessments {
            for (criterion_id, rank) in rounded_averages(assessment) {
                if rank != 0 {
                    result.insert(criterion_id, rank);
                }
            }
        }
        Ok(result)
    }
}

/// Groups one assessment's details by criterion and rounds each group's mean.
fn rounded_averages(assessment: &Assessment) -> BTreeMap<CriterionId, i64> {
    let mut groups: BTreeMap<CriterionId, (i64, u32)> = BTreeMap::new();
    for detail in &assessment.details {
        let entry = groups.entry(detail.criterion_id).or_insert((0, 0));
        entry.0 += i64::from(detail.value);
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(criterion_id, (sum, count))| {
            (criterion_id, round_half_up(sum as f64 / f64::from(count)))
        })
        .collect()
}

// Matches Java's Math.round: floor(x + 0.5).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::round_half_up;

    #[test]
    fn rounds_half_toward_positive_infinity() {
        assert_eq!(round_half_up(3.5), 4);
        assert_eq!(round_half_up(3.49), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(0.2), 0);
    }
}
