use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::workflows::appraisal::catalog::{CatalogConfig, CatalogService};
use crate::workflows::appraisal::domain::{
    Answer, Assessment, AssessmentDetail, AssessmentDetailId, AssessmentId, AssessmentScope,
    AssignmentId, Criterion, CriterionId, DepartmentAssignment, DepartmentId, NewAnswer,
    NewCriterion, NewQuestion, Question, QuestionId, UserId,
};
use crate::workflows::appraisal::memory::{
    InMemoryAnswerStore, InMemoryAssignmentStore, InMemoryCriterionStore, InMemoryQuestionStore,
};

pub(super) type MemoryCatalog = CatalogService<
    InMemoryCriterionStore,
    InMemoryQuestionStore,
    InMemoryAnswerStore,
    InMemoryAssignmentStore,
>;

pub(super) struct Fixture {
    pub criteria: Arc<InMemoryCriterionStore>,
    pub questions: Arc<InMemoryQuestionStore>,
    pub answers: Arc<InMemoryAnswerStore>,
    pub assignments: Arc<InMemoryAssignmentStore>,
    pub service: MemoryCatalog,
}

pub(super) fn fixture() -> Fixture {
    fixture_with(CatalogConfig::default())
}

pub(super) fn fixture_with(config: CatalogConfig) -> Fixture {
    let criteria = Arc::new(InMemoryCriterionStore::default());
    let questions = Arc::new(InMemoryQuestionStore::default());
    let answers = Arc::new(InMemoryAnswerStore::default());
    let assignments = Arc::new(InMemoryAssignmentStore::default());
    let service = CatalogService::new(
        criteria.clone(),
        questions.clone(),
        answers.clone(),
        assignments.clone(),
        config,
    );
    Fixture {
        criteria,
        questions,
        answers,
        assignments,
        service,
    }
}

pub(super) fn seed_criterion(fixture: &Fixture, title: &str, point: i32) -> Criterion {
    fixture
        .service
        .add_criterion(NewCriterion {
            title: title.to_string(),
            point,
        })
        .expect("criterion seeds")
}

/// Adds a question whose answer values sum to `point`, split as evenly as the
/// supplied values dictate.
pub(super) fn seed_question(
    fixture: &Fixture,
    criterion_id: Option<CriterionId>,
    title: &str,
    values: &[i32],
) -> (Question, Vec<Answer>) {
    let point = values.iter().sum();
    let answers = values
        .iter()
        .enumerate()
        .map(|(index, value)| NewAnswer {
            title: format!("{title} option {index}"),
            value: *value,
        })
        .collect();
    fixture
        .service
        .add_question_with_answers(
            NewQuestion {
                title: title.to_string(),
                point,
                criterion_id,
            },
            answers,
        )
        .expect("question seeds")
}

pub(super) fn assign(
    fixture: &Fixture,
    id: u64,
    department_id: DepartmentId,
    criterion_id: CriterionId,
    question_id: QuestionId,
) {
    fixture.assignments.record(DepartmentAssignment {
        id: AssignmentId(id),
        department_id,
        criterion_id,
        question_id,
    });
}

/// Builds a submitted assessment whose details carry `(criterion, value)`
/// snapshots. Detail ids are derived from the assessment id.
pub(super) fn assessment(
    id: u64,
    user: UserId,
    scope: AssessmentScope,
    values: &[(CriterionId, i32)],
) -> Assessment {
    let assessment_id = AssessmentId(id);
    let details = values
        .iter()
        .enumerate()
        .map(|(index, (criterion_id, value))| AssessmentDetail {
            id: AssessmentDetailId(id * 100 + index as u64),
            assessment_id,
            criterion_id: *criterion_id,
            value: *value,
        })
        .collect();
    Assessment {
        id: assessment_id,
        user_id: user,
        scope,
        submitted_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
        details,
    }
}
