//! Catalog service: the write path keeping criterion point totals consistent
//! with their questions, the cascading soft-delete path, and the
//! department-scoped read path.
//!
//! Every operation stages all loads and domain validations before its first
//! `save`, so a domain error never leaves a partial write behind. The cached
//! point total itself is still a read-modify-write without locking; two
//! concurrent writers on the same criterion can lose an update. That exposure
//! is accepted for this domain's update frequency and documented in DESIGN.md.

mod cascade;
mod points;
mod resolve;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::{AnswerId, CriterionId, QuestionId};
use super::repository::{
    AnswerStore, CriterionStore, DepartmentAssignmentStore, QuestionStore, RepositoryError,
};

/// Behavior switches for the catalog service.
///
/// `recompute_points_on_delete` controls whether a cascade delete refreshes
/// the parent criterion's cached total. The inherited behavior leaves the
/// total stale, so that is the default; product intent is still unresolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    pub recompute_points_on_delete: bool,
}

/// Error raised by catalog operations. All variants are recoverable domain
/// errors except `Store`, which passes infrastructure failures through
/// unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("criterion {0} not found")]
    CriterionNotFound(CriterionId),
    #[error("question {0} not found")]
    QuestionNotFound(QuestionId),
    #[error("answer {0} not found")]
    AnswerNotFound(AnswerId),
    #[error("criterion title `{0}` already in use")]
    DuplicateTitle(String),
    #[error("answers sum to {answer_sum} points but the question declares {declared}")]
    SumPointMismatch { declared: i32, answer_sum: i32 },
    #[error("question {0} is not attached to a criterion")]
    DetachedQuestion(QuestionId),
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

static CRITERION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static QUESTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static ANSWER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_criterion_id() -> CriterionId {
    CriterionId(CRITERION_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

fn next_question_id() -> QuestionId {
    QuestionId(QUESTION_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

fn next_answer_id() -> AnswerId {
    AnswerId(ANSWER_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Service composing the four catalog store seams.
pub struct CatalogService<C, Q, A, D> {
    criteria: Arc<C>,
    questions: Arc<Q>,
    answers: Arc<A>,
    assignments: Arc<D>,
    config: CatalogConfig,
}

impl<C, Q, A, D> CatalogService<C, Q, A, D>
where
    C: CriterionStore + 'static,
    Q: QuestionStore + 'static,
    A: AnswerStore + 'static,
    D: DepartmentAssignmentStore + 'static,
{
    pub fn new(
        criteria: Arc<C>,
        questions: Arc<Q>,
        answers: Arc<A>,
        assignments: Arc<D>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            criteria,
            questions,
            answers,
            assignments,
            config,
        }
    }

    pub fn config(&self) -> CatalogConfig {
        self.config
    }

    /// Sum of the non-deleted question points currently under a criterion.
    fn live_point_sum(&self, criterion_id: CriterionId) -> Result<i32, CatalogError> {
        let total = self
            .questions
            .find_by_criterion(criterion_id)?
            .iter()
            .filter(|question| !question.deleted)
            .map(|question| question.point)
            .sum();
        Ok(total)
    }
}
