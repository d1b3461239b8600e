//! Performance-appraisal scoring core: the criteria/question/answer catalog
//! with cached point totals, cascading soft-delete, department-scoped
//! visibility, and self/team rank aggregation over submitted assessments.

pub mod catalog;
pub mod domain;
pub mod memory;
pub mod ranking;
pub mod repository;
pub mod views;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogConfig, CatalogError, CatalogService};
pub use domain::{
    Answer, AnswerId, AnswerOverwrite, Assessment, AssessmentDetail, AssessmentDetailId,
    AssessmentId, AssessmentScope, AssignmentId, Criterion, CriterionId, CriterionPatch,
    DepartmentAssignment, DepartmentId, NewAnswer, NewCriterion, NewQuestion, Patch, Question,
    QuestionId, QuestionPatch, UserId,
};
pub use ranking::{RankingError, RankingService};
pub use repository::{
    AnswerStore, AssessmentStore, CriterionStore, DepartmentAssignmentStore, Page, PageRequest,
    QuestionStore, RepositoryError, SortField,
};
pub use views::{AnswerView, CriterionView, QuestionView};
