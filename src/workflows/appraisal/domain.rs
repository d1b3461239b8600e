use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for evaluation criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CriterionId(pub u64);

/// Identifier wrapper for scored questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub u64);

/// Identifier wrapper for candidate answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnswerId(pub u64);

/// Identifier wrapper for departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DepartmentId(pub u64);

/// Identifier wrapper for department/criterion/question association rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssignmentId(pub u64);

/// Identifier wrapper for submitted assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub u64);

/// Identifier wrapper for individual assessment detail rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentDetailId(pub u64);

/// Identifier wrapper for users (subjects and evaluators).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A weighted evaluation category. `point` caches the sum of the non-deleted
/// questions' points and is maintained by the catalog service, never by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub title: String,
    pub point: i32,
    pub deleted: bool,
}

impl Criterion {
    pub fn new(id: CriterionId, title: impl Into<String>, point: i32) -> Self {
        Self {
            id,
            title: title.into(),
            point,
            deleted: false,
        }
    }
}

/// A scored item under a criterion. Questions can be created unattached and
/// adopted into a criterion later, so the back-reference is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub criterion_id: Option<CriterionId>,
    pub title: String,
    pub point: i32,
    pub deleted: bool,
}

/// A selectable choice carrying the points awarded when chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub title: String,
    pub value: i32,
    pub deleted: bool,
}

/// Association row stating that one department surfaces one question under
/// one criterion on its assessment form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentAssignment {
    pub id: AssignmentId,
    pub department_id: DepartmentId,
    pub criterion_id: CriterionId,
    pub question_id: QuestionId,
}

/// Whether an assessment is a self-evaluation or an evaluator-on-subject pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentScope {
    SelfReview,
    Team { evaluator: UserId },
}

impl AssessmentScope {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentScope::SelfReview => "self",
            AssessmentScope::Team { .. } => "team",
        }
    }
}

/// A completed scoring pass over the criteria catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub user_id: UserId,
    pub scope: AssessmentScope,
    pub submitted_at: DateTime<Utc>,
    pub details: Vec<AssessmentDetail>,
}

/// One recorded value tying an assessment to a criterion. The value is a
/// snapshot taken at submission time and never tracks later answer edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentDetail {
    pub id: AssessmentDetailId,
    pub assessment_id: AssessmentId,
    pub criterion_id: CriterionId,
    pub value: i32,
}

/// Explicit optional-field marker for partial updates. `Unset` leaves the
/// target field alone; `Set` overwrites it, including with equal values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Patch<T> {
    #[default]
    Unset,
    Set(T),
}

impl<T> Patch<T> {
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Unset => None,
            Patch::Set(value) => Some(value),
        }
    }

    /// Merges this patch field onto an existing slot.
    pub fn apply_to(self, slot: &mut T) {
        if let Patch::Set(value) = self {
            *slot = value;
        }
    }
}

/// Creation shape for a criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCriterion {
    pub title: String,
    pub point: i32,
}

/// Creation shape for a question, optionally adopted by a criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    pub point: i32,
    pub criterion_id: Option<CriterionId>,
}

/// Creation shape for an answer under a new question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnswer {
    pub title: String,
    pub value: i32,
}

/// Partial update for a criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionPatch {
    pub title: Patch<String>,
    pub point: Patch<i32>,
}

/// Partial update for a question, plus full overwrites for listed answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPatch {
    pub title: Patch<String>,
    pub point: Patch<i32>,
    pub answers: Vec<AnswerOverwrite>,
}

/// Full title/value overwrite for one existing answer, rebinding it to the
/// question being updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOverwrite {
    pub id: AnswerId,
    pub title: String,
    pub value: i32,
}

#[cfg(test)]
mod tests {
    use super::Patch;

    #[test]
    fn unset_patch_leaves_slot_alone() {
        let mut title = "Quality".to_string();
        Patch::<String>::Unset.apply_to(&mut title);
        assert_eq!(title, "Quality");
    }

    #[test]
    fn set_patch_overwrites_slot() {
        let mut point = 10;
        Patch::Set(25).apply_to(&mut point);
        assert_eq!(point, 25);
    }
}
