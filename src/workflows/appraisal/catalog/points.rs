//! Point-consistency write path: criterion/question creation and partial
//! updates, keeping `criterion.point` equal to the sum of its non-deleted
//! questions' points.

use tracing::debug;

use super::{next_answer_id, next_criterion_id, next_question_id, CatalogError, CatalogService};
use crate::workflows::appraisal::domain::{
    Answer, Criterion, CriterionId, CriterionPatch, NewAnswer, NewCriterion, NewQuestion,
    Question, QuestionId, QuestionPatch,
};
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
    /// Creates a criterion, rejecting case-insensitive title collisions.
    pub fn add_criterion(&self, request: NewCriterion) -> Result<Criterion, CatalogError> {
        if self.criteria.exists_by_title(&request.title, true)? {
            return Err(CatalogError::DuplicateTitle(request.title));
        }

        let criterion = Criterion::new(next_criterion_id(), request.title, request.point);
        Ok(self.criteria.save(criterion)?)
    }

    /// Standalone exact-match title check used by intake validation. Unlike
    /// `add_criterion` this compares case-sensitively and still considers
    /// soft-deleted rows, preserving the inherited behavior.
    pub fn validate_unique_title(&self, title: &str) -> Result<(), CatalogError> {
        if self.criteria.exists_by_title(title, false)? {
            return Err(CatalogError::DuplicateTitle(title.to_string()));
        }
        Ok(())
    }

    /// Applies a partial update to a criterion.
    ///
    /// When the patch sets a title, uniqueness is checked twice: against the
    /// stored title before the merge and against the merged title after it.
    /// Other patch fields may themselves rewrite the title between the two
    /// comparisons, so neither check subsumes the other.
    pub fn update_criterion(
        &self,
        id: CriterionId,
        patch: CriterionPatch,
    ) -> Result<Criterion, CatalogError> {
        let mut criterion = self
            .criteria
            .find_by_id(id)?
            .ok_or(CatalogError::CriterionNotFound(id))?;

        if let Some(title) = patch.title.as_set() {
            if !title.eq_ignore_ascii_case(&criterion.title)
                && self.criteria.exists_by_title(title, true)?
            {
                return Err(CatalogError::DuplicateTitle(title.clone()));
            }
        }

        let requested_title = patch.title.as_set().cloned();
        patch.title.apply_to(&mut criterion.title);
        patch.point.apply_to(&mut criterion.point);

        if let Some(title) = requested_title {
            if title != criterion.title && self.criteria.exists_by_title(&title, true)? {
                return Err(CatalogError::DuplicateTitle(title));
            }
        }

        Ok(self.criteria.save(criterion)?)
    }

    /// Creates a question and its answers in one unit, enforcing that the
    /// answer values sum to the declared question point, and bumping the
    /// owning criterion's cached total when a criterion id is supplied.
    pub fn add_question_with_answers(
        &self,
        request: NewQuestion,
        answers: Vec<NewAnswer>,
    ) -> Result<(Question, Vec<Answer>), CatalogError> {
        let answer_sum: i32 = answers.iter().map(|answer| answer.value).sum();
        if answer_sum != request.point {
            return Err(CatalogError::SumPointMismatch {
                declared: request.point,
                answer_sum,
            });
        }

        let owner = match request.criterion_id {
            Some(criterion_id) => Some(
                self.criteria
                    .find_by_id(criterion_id)?
                    .ok_or(CatalogError::CriterionNotFound(criterion_id))?,
            ),
            None => None,
        };

        // Validation is complete; everything below is persistence.
        if let Some(mut criterion) = owner {
            criterion.point += request.point;
            self.criteria.save(criterion)?;
        }

        let question = self.questions.save(Question {
            id: next_question_id(),
            criterion_id: request.criterion_id,
            title: request.title,
            point: request.point,
            deleted: false,
        })?;

        let answers = self.answers.save_all(
            answers
                .into_iter()
                .map(|answer| Answer {
                    id: next_answer_id(),
                    question_id: question.id,
                    title: answer.title,
                    value: answer.value,
                    deleted: false,
                })
                .collect(),
        )?;

        debug!(
            question = question.id.0,
            answers = answers.len(),
            "question added to catalog"
        );
        Ok((question, answers))
    }

    /// Applies a partial update to a question, then refreshes the owning
    /// criterion's cached total with a full sum over its non-deleted
    /// questions (tolerant of prior drift), then overwrites each patched
    /// answer in place, rebinding it to the updated question.
    pub fn update_question(
        &self,
        id: QuestionId,
        patch: QuestionPatch,
    ) -> Result<Question, CatalogError> {
        let mut question = self
            .questions
            .find_by_id(id)?
            .ok_or(CatalogError::QuestionNotFound(id))?;

        let criterion_id = question
            .criterion_id
            .ok_or(CatalogError::DetachedQuestion(id))?;
        let mut criterion = self
            .criteria
            .find_by_id(criterion_id)?
            .ok_or(CatalogError::CriterionNotFound(criterion_id))?;

        // Resolve every patched answer up front so an unknown id cannot
        // surface after the question has already been rewritten.
        let mut patched_answers = Vec::with_capacity(patch.answers.len());
        for overwrite in &patch.answers {
            let answer = self
                .answers
                .find_by_id(overwrite.id)?
                .ok_or(CatalogError::AnswerNotFound(overwrite.id))?;
            patched_answers.push(answer);
        }

        patch.title.apply_to(&mut question.title);
        patch.point.apply_to(&mut question.point);
        let question = self.questions.save(question)?;

        criterion.point = self.live_point_sum(criterion_id)?;
        self.criteria.save(criterion)?;

        for (mut answer, overwrite) in patched_answers.into_iter().zip(patch.answers) {
            answer.question_id = question.id;
            answer.title = overwrite.title;
            answer.value = overwrite.value;
            self.answers.save(answer)?;
        }

        Ok(question)
    }
}
