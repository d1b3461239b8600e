//! In-memory store implementations backing the test suites and demo
//! harnesses. Each store is a mutexed id-keyed arena; lock poisoning surfaces
//! as `RepositoryError::Unavailable` instead of panicking.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::domain::{
    Answer, AnswerId, Assessment, AssessmentId, AssessmentScope, AssignmentId, Criterion,
    CriterionId, DepartmentAssignment, DepartmentId, Question, QuestionId, UserId,
};
use super::repository::{
    AnswerStore, AssessmentStore, CriterionStore, DepartmentAssignmentStore, Page, PageRequest,
    QuestionStore, RepositoryError, SortField,
};

fn lock<T>(rows: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    rows.lock()
        .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
}

fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let items = items
        .into_iter()
        .skip(request.page * request.size)
        .take(request.size)
        .collect();
    Page {
        items,
        page: request.page,
        size: request.size,
        total,
    }
}

fn sort_criteria(rows: &mut [Criterion], request: PageRequest) {
    rows.sort_by(|a, b| {
        let ordering = match request.sort {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Point => a.point.cmp(&b.point),
        };
        if request.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

fn sort_questions(rows: &mut [Question], request: PageRequest) {
    rows.sort_by(|a, b| {
        let ordering = match request.sort {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Point => a.point.cmp(&b.point),
        };
        if request.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

/// Mutexed arena of criteria rows.
#[derive(Default)]
pub struct InMemoryCriterionStore {
    rows: Mutex<BTreeMap<CriterionId, Criterion>>,
}

impl CriterionStore for InMemoryCriterionStore {
    fn find_by_id(&self, id: CriterionId) -> Result<Option<Criterion>, RepositoryError> {
        Ok(lock(&self.rows)?.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Criterion>, RepositoryError> {
        Ok(lock(&self.rows)?
            .values()
            .filter(|criterion| !criterion.deleted)
            .cloned()
            .collect())
    }

    fn find_page(&self, request: PageRequest) -> Result<Page<Criterion>, RepositoryError> {
        let mut rows = self.find_all()?;
        sort_criteria(&mut rows, request);
        Ok(paginate(rows, request))
    }

    fn exists_by_title(&self, title: &str, ignore_case: bool) -> Result<bool, RepositoryError> {
        Ok(lock(&self.rows)?.values().any(|criterion| {
            if ignore_case {
                criterion.title.eq_ignore_ascii_case(title)
            } else {
                criterion.title == title
            }
        }))
    }

    fn save(&self, criterion: Criterion) -> Result<Criterion, RepositoryError> {
        lock(&self.rows)?.insert(criterion.id, criterion.clone());
        Ok(criterion)
    }
}

/// Mutexed arena of question rows.
#[derive(Default)]
pub struct InMemoryQuestionStore {
    rows: Mutex<BTreeMap<QuestionId, Question>>,
}

impl QuestionStore for InMemoryQuestionStore {
    fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, RepositoryError> {
        Ok(lock(&self.rows)?.get(&id).cloned())
    }

    fn find_by_criterion(&self, id: CriterionId) -> Result<Vec<Question>, RepositoryError> {
        Ok(lock(&self.rows)?
            .values()
            .filter(|question| question.criterion_id == Some(id))
            .cloned()
            .collect())
    }

    fn find_page_by_criterion(
        &self,
        id: CriterionId,
        request: PageRequest,
    ) -> Result<Page<Question>, RepositoryError> {
        let mut rows: Vec<Question> = self
            .find_by_criterion(id)?
            .into_iter()
            .filter(|question| !question.deleted)
            .collect();
        sort_questions(&mut rows, request);
        Ok(paginate(rows, request))
    }

    fn save(&self, question: Question) -> Result<Question, RepositoryError> {
        lock(&self.rows)?.insert(question.id, question.clone());
        Ok(question)
    }
}

/// Mutexed arena of answer rows.
#[derive(Default)]
pub struct InMemoryAnswerStore {
    rows: Mutex<BTreeMap<AnswerId, Answer>>,
}

impl AnswerStore for InMemoryAnswerStore {
    fn find_by_id(&self, id: AnswerId) -> Result<Option<Answer>, RepositoryError> {
        Ok(lock(&self.rows)?.get(&id).cloned())
    }

    fn find_by_question(&self, id: QuestionId) -> Result<Vec<Answer>, RepositoryError> {
        Ok(lock(&self.rows)?
            .values()
            .filter(|answer| answer.question_id == id)
            .cloned()
            .collect())
    }

    fn save(&self, answer: Answer) -> Result<Answer, RepositoryError> {
        lock(&self.rows)?.insert(answer.id, answer.clone());
        Ok(answer)
    }

    fn save_all(&self, answers: Vec<Answer>) -> Result<Vec<Answer>, RepositoryError> {
        let mut rows = lock(&self.rows)?;
        for answer in &answers {
            rows.insert(answer.id, answer.clone());
        }
        Ok(answers)
    }
}

/// Mutexed arena of department assignment rows.
#[derive(Default)]
pub struct InMemoryAssignmentStore {
    rows: Mutex<BTreeMap<AssignmentId, DepartmentAssignment>>,
}

impl InMemoryAssignmentStore {
    /// Seeds one association row.
    pub fn record(&self, assignment: DepartmentAssignment) {
        if let Ok(mut rows) = self.rows.lock() {
            rows.insert(assignment.id, assignment);
        }
    }
}

impl DepartmentAssignmentStore for InMemoryAssignmentStore {
    fn find_by_criterion_and_department(
        &self,
        criterion_id: CriterionId,
        department_id: DepartmentId,
    ) -> Result<Vec<DepartmentAssignment>, RepositoryError> {
        Ok(lock(&self.rows)?
            .values()
            .filter(|row| row.criterion_id == criterion_id && row.department_id == department_id)
            .cloned()
            .collect())
    }

    fn delete_all(&self, ids: &[AssignmentId]) -> Result<(), RepositoryError> {
        let mut rows = lock(&self.rows)?;
        for id in ids {
            rows.remove(id);
        }
        Ok(())
    }
}

/// Mutexed arena of submitted assessments.
#[derive(Default)]
pub struct InMemoryAssessmentStore {
    rows: Mutex<BTreeMap<AssessmentId, Assessment>>,
}

impl InMemoryAssessmentStore {
    /// Seeds one submitted assessment.
    pub fn record(&self, assessment: Assessment) {
        if let Ok(mut rows) = self.rows.lock() {
            rows.insert(assessment.id, assessment);
        }
    }
}

impl AssessmentStore for InMemoryAssessmentStore {
    fn find_self_by_user(&self, user: UserId) -> Result<Vec<Assessment>, RepositoryError> {
        Ok(lock(&self.rows)?
            .values()
            .filter(|assessment| {
                assessment.user_id == user
                    && matches!(assessment.scope, AssessmentScope::SelfReview)
            })
            .cloned()
            .collect())
    }

    fn find_team_by_user(&self, user: UserId) -> Result<Vec<Assessment>, RepositoryError> {
        Ok(lock(&self.rows)?
            .values()
            .filter(|assessment| {
                assessment.user_id == user
                    && matches!(assessment.scope, AssessmentScope::Team { .. })
            })
            .cloned()
            .collect())
    }
}
