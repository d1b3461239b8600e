use super::common::*;
use crate::workflows::appraisal::catalog::CatalogError;
use crate::workflows::appraisal::domain::{CriterionId, DepartmentId};
use crate::workflows::appraisal::repository::{PageRequest, SortField};

#[test]
fn department_view_returns_only_that_departments_questions() {
    let fixture = fixture();
    let criterion = seed_criterion(&fixture, "Quality", 0);
    let (for_d1, _) = seed_question(&fixture, Some(criterion.id), "Code review", &[4, 6]);
    let (for_d2, _) = seed_question(&fixture, Some(criterion.id), "Tests", &[15]);
    assign(&fixture, 1, DepartmentId(1), criterion.id, for_d1.id);
    assign(&fixture, 2, DepartmentId(2), criterion.id, for_d2.id);

    let view = fixture
        .service
        .criterion_for_department(criterion.id, DepartmentId(1))
        .expect("resolution succeeds");

    let questions = view.questions.expect("one question survives");
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].id, for_d1.id);
    let answers = questions[0].answers.as_ref().expect("answers nested");
    assert_eq!(answers.len(), 2);
}

#[test]
fn department_view_skips_deleted_questions() {
    let fixture = fixture();
    let criterion = seed_criterion(&fixture, "Quality", 0);
    let (question, _) = seed_question(&fixture, Some(criterion.id), "Code review", &[4, 6]);
    assign(&fixture, 1, DepartmentId(1), criterion.id, question.id);
    fixture
        .service
        .delete_question(question.id)
        .expect("delete succeeds");

    let view = fixture
        .service
        .criterion_for_department(criterion.id, DepartmentId(1))
        .expect("resolution succeeds");
    assert!(
        view.questions.is_none(),
        "an all-deleted question set is an absent marker, not an error"
    );
}

#[test]
fn department_view_requires_the_criterion() {
    let fixture = fixture();
    assert!(matches!(
        fixture
            .service
            .criterion_for_department(CriterionId(50_505), DepartmentId(1)),
        Err(CatalogError::CriterionNotFound(_))
    ));
}

#[test]
fn listing_excludes_deleted_criteria_and_questions() {
    let fixture = fixture();
    let kept = seed_criterion(&fixture, "Quality", 0);
    seed_question(&fixture, Some(kept.id), "Code review", &[4, 6]);
    let dropped = seed_criterion(&fixture, "Teamwork", 0);
    fixture
        .service
        .delete_criterion(dropped.id)
        .expect("delete succeeds");

    let listed = fixture.service.list_criteria().expect("listing succeeds");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, kept.id);
    let questions = listed[0].questions.as_ref().expect("questions nested");
    assert_eq!(questions.len(), 1);
    assert!(questions[0].answers.is_some());
}

#[test]
fn paged_listing_sorts_and_slices() {
    let fixture = fixture();
    seed_criterion(&fixture, "Delivery", 0);
    seed_criterion(&fixture, "Attitude", 0);
    seed_criterion(&fixture, "Craft", 0);

    let page = fixture
        .service
        .list_criteria_page(PageRequest::new(0, 2, SortField::Title, true))
        .expect("paging succeeds");

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].title, "Attitude");
    assert_eq!(page.items[1].title, "Craft");
    assert!(
        page.items[0].questions.is_none(),
        "criteria without questions carry the absent marker"
    );
}

#[test]
fn question_paging_scopes_to_one_criterion() {
    let fixture = fixture();
    let criterion = seed_criterion(&fixture, "Quality", 0);
    let other = seed_criterion(&fixture, "Teamwork", 0);
    seed_question(&fixture, Some(criterion.id), "Code review", &[4, 6]);
    let (deleted, _) = seed_question(&fixture, Some(criterion.id), "Tests", &[15]);
    seed_question(&fixture, Some(other.id), "Pairing", &[5]);
    fixture
        .service
        .delete_question(deleted.id)
        .expect("delete succeeds");

    let page = fixture
        .service
        .questions_for_criterion(criterion.id, PageRequest::new(0, 10, SortField::Id, true))
        .expect("paging succeeds");

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "Code review");
}
