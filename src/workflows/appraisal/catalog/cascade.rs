//! Cascading soft-delete path. Deletion only ever flips `deleted` flags on
//! criteria, questions, and answers; rows stay addressable for historical
//! assessments. Department assignment rows are the one exception and are
//! removed outright.

use tracing::info;

use super::{CatalogError, CatalogService};
use crate::workflows::appraisal::domain::{CriterionId, DepartmentId, Question, QuestionId};
use crate::workflows::appraisal::repository::{
    AnswerStore, CriterionStore, DepartmentAssignmentStore, QuestionStore,
};

impl<C, Q, A, D> CatalogService<C, Q, A, D>
where
    C: CriterionStore + 'static,
    Q: QuestionStore + 'static,
    A: AnswerStore + 'static,
    D: DepartmentAssignmentStore + 'static,
{
    /// Soft-deletes a criterion together with every question beneath it and
    /// every answer beneath those questions.
    ///
    /// By default the cached point total is deliberately left as-is, so it
    /// keeps reflecting the maximum ever awarded; `recompute_points_on_delete`
    /// switches to refreshing it over the (now empty) live question set.
    pub fn delete_criterion(&self, id: CriterionId) -> Result<(), CatalogError> {
        let mut criterion = self
            .criteria
            .find_by_id(id)?
            .ok_or(CatalogError::CriterionNotFound(id))?;

        let questions = self.questions.find_by_criterion(id)?;
        let mut answers_deleted = 0usize;
        for question in &questions {
            answers_deleted += self.delete_answers_of(question.id)?;
        }
        for mut question in questions.clone() {
            question.deleted = true;
            self.questions.save(question)?;
        }

        criterion.deleted = true;
        if self.config.recompute_points_on_delete {
            criterion.point = self.live_point_sum(id)?;
        }
        self.criteria.save(criterion)?;

        info!(
            criterion = id.0,
            questions = questions.len(),
            answers = answers_deleted,
            "criterion cascade soft-deleted"
        );
        Ok(())
    }

    /// Soft-deletes one question and its answers. The parent criterion's
    /// cached total is untouched unless `recompute_points_on_delete` is set.
    pub fn delete_question(&self, id: QuestionId) -> Result<(), CatalogError> {
        let question = self
            .questions
            .find_by_id(id)?
            .ok_or(CatalogError::QuestionNotFound(id))?;

        self.delete_answers_of(id)?;
        let owner = question.criterion_id;
        self.questions.save(Question {
            deleted: true,
            ..question
        })?;

        if self.config.recompute_points_on_delete {
            if let Some(criterion_id) = owner {
                if let Some(mut criterion) = self.criteria.find_by_id(criterion_id)? {
                    criterion.point = self.live_point_sum(criterion_id)?;
                    self.criteria.save(criterion)?;
                }
            }
        }

        Ok(())
    }

    /// Removes a criterion from one department's form: cascades the soft
    /// delete through the criterion exactly as `delete_criterion`, then
    /// hard-deletes the matched association rows. A missing association is a
    /// no-op, not an error.
    pub fn delete_criterion_for_department(
        &self,
        criterion_id: CriterionId,
        department_id: DepartmentId,
    ) -> Result<(), CatalogError> {
        let assignments = self
            .assignments
            .find_by_criterion_and_department(criterion_id, department_id)?;
        if assignments.is_empty() {
            return Ok(());
        }

        self.delete_criterion(criterion_id)?;

        let ids: Vec<_> = assignments.iter().map(|assignment| assignment.id).collect();
        self.assignments.delete_all(&ids)?;

        info!(
            criterion = criterion_id.0,
            department = department_id.0,
            assignments = ids.len(),
            "department assignments removed"
        );
        Ok(())
    }

    fn delete_answers_of(&self, question_id: QuestionId) -> Result<usize, CatalogError> {
        let answers = self.answers.find_by_question(question_id)?;
        let count = answers.len();
        for mut answer in answers {
            answer.deleted = true;
            self.answers.save(answer)?;
        }
        Ok(count)
    }
}
