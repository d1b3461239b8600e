use super::domain::{
    Answer, AnswerId, Assessment, AssignmentId, Criterion, CriterionId, DepartmentAssignment,
    DepartmentId, Question, QuestionId, UserId,
};

/// Error enumeration for store failures. Absence of a row is not an error at
/// this seam; finders return `Option`/empty collections and the services turn
/// absence into typed domain errors.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Sort key accepted by paged finders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Point,
}

/// Zero-based page request with an explicit sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: SortField,
    pub ascending: bool,
}

impl PageRequest {
    pub fn new(page: usize, size: usize, sort: SortField, ascending: bool) -> Self {
        Self {
            page,
            size,
            sort,
            ascending,
        }
    }
}

/// One page of results along with the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
        }
    }
}

/// Store seam for criteria.
///
/// `find_by_id` returns soft-deleted rows so historical assessments stay
/// addressable; `find_all`/`find_page` list non-deleted rows only.
/// `exists_by_title` consults every row including deleted ones, preserving the
/// original uniqueness behavior.
pub trait CriterionStore: Send + Sync {
    fn find_by_id(&self, id: CriterionId) -> Result<Option<Criterion>, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Criterion>, RepositoryError>;
    fn find_page(&self, request: PageRequest) -> Result<Page<Criterion>, RepositoryError>;
    fn exists_by_title(&self, title: &str, ignore_case: bool) -> Result<bool, RepositoryError>;
    fn save(&self, criterion: Criterion) -> Result<Criterion, RepositoryError>;
}

/// Store seam for questions. `find_by_criterion` returns deleted rows too, so
/// callers decide whether a cascade or a live-sum is wanted.
pub trait QuestionStore: Send + Sync {
    fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, RepositoryError>;
    fn find_by_criterion(&self, id: CriterionId) -> Result<Vec<Question>, RepositoryError>;
    fn find_page_by_criterion(
        &self,
        id: CriterionId,
        request: PageRequest,
    ) -> Result<Page<Question>, RepositoryError>;
    fn save(&self, question: Question) -> Result<Question, RepositoryError>;
}

/// Store seam for answers.
pub trait AnswerStore: Send + Sync {
    fn find_by_id(&self, id: AnswerId) -> Result<Option<Answer>, RepositoryError>;
    fn find_by_question(&self, id: QuestionId) -> Result<Vec<Answer>, RepositoryError>;
    fn save(&self, answer: Answer) -> Result<Answer, RepositoryError>;
    fn save_all(&self, answers: Vec<Answer>) -> Result<Vec<Answer>, RepositoryError>;
}

/// Store seam for department/criterion/question association rows. These are
/// the only rows the core ever hard-deletes.
pub trait DepartmentAssignmentStore: Send + Sync {
    fn find_by_criterion_and_department(
        &self,
        criterion_id: CriterionId,
        department_id: DepartmentId,
    ) -> Result<Vec<DepartmentAssignment>, RepositoryError>;
    fn delete_all(&self, ids: &[AssignmentId]) -> Result<(), RepositoryError>;
}

/// Store seam for submitted assessments, scoped by user and assessment kind.
pub trait AssessmentStore: Send + Sync {
    fn find_self_by_user(&self, user: UserId) -> Result<Vec<Assessment>, RepositoryError>;
    fn find_team_by_user(&self, user: UserId) -> Result<Vec<Assessment>, RepositoryError>;
}
