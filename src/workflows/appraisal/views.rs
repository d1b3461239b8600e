//! Mapping layer: pure converters from stored entities to the shapes read
//! paths expose. Empty nested collections map to an explicit `None` marker
//! rather than an empty list, and soft-deleted answers are filtered out.

use serde::Serialize;

use super::domain::{Answer, AnswerId, Criterion, CriterionId, Question, QuestionId};

/// Read-side projection of an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerView {
    pub id: AnswerId,
    pub title: String,
    pub value: i32,
}

/// Read-side projection of a question with its surviving answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub title: String,
    pub point: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<AnswerView>>,
}

/// Read-side projection of a criterion with its surviving questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionView {
    pub id: CriterionId,
    pub title: String,
    pub point: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuestionView>>,
}

pub fn answer_view(answer: &Answer) -> AnswerView {
    AnswerView {
        id: answer.id,
        title: answer.title.clone(),
        value: answer.value,
    }
}

/// Projects a question together with its answer rows, dropping deleted
/// answers and collapsing an empty remainder to `None`.
pub fn question_view(question: &Question, answers: &[Answer]) -> QuestionView {
    let surviving: Vec<AnswerView> = answers
        .iter()
        .filter(|answer| !answer.deleted)
        .map(answer_view)
        .collect();

    QuestionView {
        id: question.id,
        title: question.title.clone(),
        point: question.point,
        answers: if surviving.is_empty() {
            None
        } else {
            Some(surviving)
        },
    }
}

/// Projects a criterion over already-projected questions.
pub fn criterion_view(criterion: &Criterion, questions: Vec<QuestionView>) -> CriterionView {
    CriterionView {
        id: criterion.id,
        title: criterion.title.clone(),
        point: criterion.point,
        questions: if questions.is_empty() {
            None
        } else {
            Some(questions)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::appraisal::domain::{Answer, Criterion, Question};

    fn question(id: u64) -> Question {
        Question {
            id: QuestionId(id),
            criterion_id: Some(CriterionId(1)),
            title: "Delivers on time".to_string(),
            point: 10,
            deleted: false,
        }
    }

    #[test]
    fn deleted_answers_are_dropped_and_empty_collapses_to_none() {
        let deleted = Answer {
            id: AnswerId(7),
            question_id: QuestionId(3),
            title: "Never".to_string(),
            value: 0,
            deleted: true,
        };

        let view = question_view(&question(3), &[deleted]);
        assert!(view.answers.is_none());
    }

    #[test]
    fn empty_question_set_serializes_without_questions_key() {
        let criterion = Criterion::new(CriterionId(1), "Quality", 0);
        let view = criterion_view(&criterion, Vec::new());
        let json = serde_json::to_value(&view).expect("view serializes");
        assert!(json.get("questions").is_none());
    }
}
