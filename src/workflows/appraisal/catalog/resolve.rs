//! Department-scoped read path. A criterion's question set differs per
//! department via assignment rows, so the detail view resolves questions
//! through those rows rather than the owning relationship.

use super::{CatalogError, CatalogService};
use crate::workflows::appraisal::domain::{Criterion, CriterionId, DepartmentId};
use crate::workflows::appraisal::repository::{
    AnswerStore, CriterionStore, DepartmentAssignmentStore, Page, PageRequest, QuestionStore,
};
use crate::workflows::appraisal::views::{self, CriterionView, QuestionView};

impl<C, Q, A, D> CatalogService<C, Q, A, D>
where
    C: CriterionStore + 'static,
    Q: QuestionStore + 'static,
    A: AnswerStore + 'static,
    D: DepartmentAssignmentStore + 'static,
{
    /// Resolves one criterion as seen by one department: only questions bound
    /// through a matching assignment row appear, deleted or dangling
    /// questions are skipped, and an empty result is a `None` marker rather
    /// than an error.
    pub fn criterion_for_department(
        &self,
        id: CriterionId,
        department_id: DepartmentId,
    ) -> Result<CriterionView, CatalogError> {
        let criterion = self
            .criteria
            .find_by_id(id)?
            .ok_or(CatalogError::CriterionNotFound(id))?;

        let mut question_views = Vec::new();
        for assignment in self
            .assignments
            .find_by_criterion_and_department(id, department_id)?
        {
            let question = match self.questions.find_by_id(assignment.question_id)? {
                Some(question) if !question.deleted => question,
                _ => continue,
            };
            let answers = self.answers.find_by_question(question.id)?;
            question_views.push(views::question_view(&question, &answers));
        }

        Ok(views::criterion_view(&criterion, question_views))
    }

    /// Lists every live criterion with its live questions and answers.
    pub fn list_criteria(&self) -> Result<Vec<CriterionView>, CatalogError> {
        self.criteria
            .find_all()?
            .iter()
            .map(|criterion| self.project_criterion(criterion))
            .collect()
    }

    /// Paged variant of `list_criteria` with the same deleted-row filtering.
    pub fn list_criteria_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<CriterionView>, CatalogError> {
        let page = self.criteria.find_page(request)?;
        let mut items = Vec::with_capacity(page.items.len());
        for criterion in &page.items {
            items.push(self.project_criterion(criterion)?);
        }
        Ok(Page {
            items,
            page: page.page,
            size: page.size,
            total: page.total,
        })
    }

    /// Pages the live questions under one criterion, answers nested.
    pub fn questions_for_criterion(
        &self,
        criterion_id: CriterionId,
        request: PageRequest,
    ) -> Result<Page<QuestionView>, CatalogError> {
        let page = self
            .questions
            .find_page_by_criterion(criterion_id, request)?;
        let mut items = Vec::with_capacity(page.items.len());
        for question in &page.items {
            let answers = self.answers.find_by_question(question.id)?;
            items.push(views::question_view(question, &answers));
        }
        Ok(Page {
            items,
            page: page.page,
            size: page.size,
            total: page.total,
        })
    }

    fn project_criterion(&self, criterion: &Criterion) -> Result<CriterionView, CatalogError> {
        let mut question_views = Vec::new();
        for question in self.questions.find_by_criterion(criterion.id)? {
            if question.deleted {
                continue;
            }
            let answers = self.answers.find_by_question(question.id)?;
            question_views.push(views::question_view(&question, &answers));
        }
        Ok(views::criterion_view(criterion, question_views))
    }
}
