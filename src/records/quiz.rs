//! Quiz authoring forms: test courses and questions.
//!
//! These two forms are not sent through the generic record endpoints. They
//! are converted into the typed request bodies the quiz API expects, which
//! adds checks the field schema cannot express (the correct option must
//! exist among the options).

use exameets_domain::{AddQuestionRequest, CreateTestCourseRequest, QuestionOption};

use crate::errors::AdminError;
use crate::forms::{validate, FieldId, FieldSchema, FieldSpec, FormStore, ScalarValue};

record_fields!(TestCourseField {
    Title => ("title", "Title"),
    Description => ("description", "Description"),
    DurationMinutes => ("durationMinutes", "Duration (minutes)"),
    TotalMarks => ("totalMarks", "Total marks"),
    QuestionsPerTest => ("questionsPerTest", "Questions per test"),
    TestDate => ("testDate", "Test date"),
    IsActive => ("isActive", "Active"),
    Instructions => ("instructions", "Instructions"),
});

pub fn test_course_schema() -> FieldSchema<TestCourseField> {
    use TestCourseField::*;
    FieldSchema::new(
        "test course",
        vec![
            FieldSpec::text(Title).with_required(),
            FieldSpec::text(Description).with_required(),
            FieldSpec::number(DurationMinutes).with_required(),
            FieldSpec::number(TotalMarks).with_required(),
            FieldSpec::number(QuestionsPerTest).with_required(),
            FieldSpec::date(TestDate).with_required(),
            FieldSpec::boolean(IsActive),
            FieldSpec::string_list(Instructions).with_min_items(1),
        ],
    )
}

record_fields!(QuestionField {
    QuestionText => ("questionText", "Question"),
    Options => ("options", "Options"),
    CorrectOptionIndex => ("correctOptionIndex", "Correct option"),
    MinTimeToSolve => ("minTimeToSolve", "Minimum time to solve"),
    TestCourseIds => ("testCourseIds", "Test courses"),
});

pub fn question_schema() -> FieldSchema<QuestionField> {
    use QuestionField::*;
    FieldSchema::new(
        "question",
        vec![
            FieldSpec::text(QuestionText).with_required(),
            FieldSpec::string_list(Options).with_min_items(2),
            FieldSpec::number(CorrectOptionIndex).with_required(),
            FieldSpec::number(MinTimeToSolve).with_required(),
            FieldSpec::string_list(TestCourseIds).with_min_items(1),
        ],
    )
}

/// Builds the add-question request from a completed question form.
pub fn question_request(
    store: &FormStore<QuestionField>,
) -> Result<AddQuestionRequest, AdminError> {
    ensure_complete(store)?;
    let options = store.string_list(QuestionField::Options);
    let correct_option_index = whole_number(store, QuestionField::CorrectOptionIndex)? as usize;
    if correct_option_index >= options.len() {
        return Err(AdminError::Validation(format!(
            "Correct option {correct_option_index} does not exist ({} options)",
            options.len()
        )));
    }
    Ok(AddQuestionRequest {
        question_text: required_text(store, QuestionField::QuestionText)?,
        options: options.iter().map(QuestionOption::new).collect(),
        correct_option_index,
        min_time_to_solve: whole_number(store, QuestionField::MinTimeToSolve)?,
        test_course_ids: store.string_list(QuestionField::TestCourseIds).to_vec(),
    })
}

/// Builds the create-course request. New courses start without questions.
pub fn course_request(
    store: &FormStore<TestCourseField>,
) -> Result<CreateTestCourseRequest, AdminError> {
    ensure_complete(store)?;
    Ok(CreateTestCourseRequest {
        title: required_text(store, TestCourseField::Title)?,
        description: required_text(store, TestCourseField::Description)?,
        duration_minutes: whole_number(store, TestCourseField::DurationMinutes)?,
        total_marks: whole_number(store, TestCourseField::TotalMarks)?,
        is_active: matches!(
            store.scalar(TestCourseField::IsActive),
            Some(ScalarValue::Bool(true))
        ),
        questions_per_test: whole_number(store, TestCourseField::QuestionsPerTest)?,
        instructions: store.string_list(TestCourseField::Instructions).to_vec(),
        test_date: required_text(store, TestCourseField::TestDate)?,
        questions: Vec::new(),
    })
}

fn ensure_complete<F: FieldId>(store: &FormStore<F>) -> Result<(), AdminError> {
    let issues = validate(store);
    if issues.is_empty() {
        return Ok(());
    }
    let summary = issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(AdminError::Validation(summary))
}

fn required_text<F: FieldId>(store: &FormStore<F>, field: F) -> Result<String, AdminError> {
    store
        .text(field)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| AdminError::Validation(format!("{} is required", field.label())))
}

fn whole_number<F: FieldId>(store: &FormStore<F>, field: F) -> Result<u32, AdminError> {
    match store.scalar(field) {
        Some(ScalarValue::Number(value))
            if *value >= 0.0 && value.fract() == 0.0 && *value <= f64::from(u32::MAX) =>
        {
            Ok(*value as u32)
        }
        _ => Err(AdminError::Validation(format!(
            "{} must be a whole number",
            field.label()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::forms::BufferKey;

    fn question_form(options: &[&str], correct: &str) -> FormStore<QuestionField> {
        let mut store = FormStore::new(Arc::new(question_schema()));
        store.set_scalar(QuestionField::QuestionText, "2 + 2 = ?");
        for option in options {
            store.set_pending_input(BufferKey::Item(QuestionField::Options), *option);
            store.commit_list_item(QuestionField::Options);
        }
        store.set_scalar_input(QuestionField::CorrectOptionIndex, correct);
        store.set_scalar_input(QuestionField::MinTimeToSolve, "30");
        store.set_pending_input(BufferKey::Item(QuestionField::TestCourseIds), "t1");
        store.commit_list_item(QuestionField::TestCourseIds);
        store
    }

    #[test]
    fn question_request_carries_options_in_order() {
        let request = question_request(&question_form(&["3", "4", "5"], "1")).expect("request");
        assert_eq!(request.options[1].text, "4");
        assert_eq!(request.correct_option_index, 1);
        assert_eq!(request.min_time_to_solve, 30);
        assert_eq!(request.test_course_ids, ["t1"]);
    }

    #[test]
    fn correct_index_must_point_at_an_option() {
        let err = question_request(&question_form(&["3", "4"], "2")).unwrap_err();
        assert!(matches!(
            err,
            AdminError::Validation(message) if message.contains("does not exist")
        ));

        let err = question_request(&question_form(&["3", "4"], "0.5")).unwrap_err();
        assert!(matches!(err, AdminError::Validation(message) if message.contains("whole number")));
    }

    #[test]
    fn single_option_is_not_enough() {
        let err = question_request(&question_form(&["4"], "0")).unwrap_err();
        assert!(matches!(
            err,
            AdminError::Validation(message) if message.contains("Options needs at least 2")
        ));
    }

    #[test]
    fn course_request_starts_without_questions() {
        let mut store = FormStore::new(Arc::new(test_course_schema()));
        use TestCourseField::*;
        store.set_scalar(Title, "Mock 1");
        store.set_scalar(Description, "Full syllabus");
        store.set_scalar_input(DurationMinutes, "90");
        store.set_scalar_input(TotalMarks, "300");
        store.set_scalar_input(QuestionsPerTest, "75");
        store.set_scalar_input(TestDate, "2025-03-01");
        store.set_checked(IsActive, true);
        assert!(matches!(course_request(&store), Err(AdminError::Validation(_))));

        store.set_pending_input(BufferKey::Item(Instructions), "No calculators");
        store.commit_list_item(Instructions);
        let request = course_request(&store).expect("request");
        assert_eq!(request.duration_minutes, 90);
        assert!(request.is_active);
        assert_eq!(request.test_date, "2025-03-01");
        assert!(request.questions.is_empty());
    }
}
