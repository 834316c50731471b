//! Previous-year paper, admit card and result forms.

use crate::forms::{FieldSchema, FieldSpec};

record_fields!(PaperField {
    ExamName => ("exam_name", "Exam name"),
    Subject => ("subject", "Subject"),
    Year => ("year", "Year"),
    PaperLink => ("paper_link", "Paper link"),
    SolutionLink => ("solution_link", "Solution link"),
    Tags => ("tags", "Tags"),
});

pub fn paper_schema() -> FieldSchema<PaperField> {
    use PaperField::*;
    FieldSchema::new(
        "previous year paper",
        vec![
            FieldSpec::text(ExamName).with_required(),
            FieldSpec::text(Subject).with_required(),
            FieldSpec::number(Year).with_required(),
            FieldSpec::text(PaperLink).with_required(),
            FieldSpec::text(SolutionLink),
            FieldSpec::string_list(Tags),
        ],
    )
}

record_fields!(AdmitCardField {
    ExamName => ("exam_name", "Exam name"),
    ConductingBody => ("conducting_body", "Conducting body"),
    ReleaseDate => ("release_date", "Release date"),
    ExamDate => ("exam_date", "Exam date"),
    DownloadLink => ("download_link", "Download link"),
    Instructions => ("instructions", "Instructions"),
    ExamDetails => ("exam_details", "Exam details"),
});

pub fn admit_card_schema() -> FieldSchema<AdmitCardField> {
    use AdmitCardField::*;
    FieldSchema::new(
        "admit card",
        vec![
            FieldSpec::text(ExamName).with_required(),
            FieldSpec::text(ConductingBody).with_required(),
            FieldSpec::date(ReleaseDate).with_required(),
            FieldSpec::date(ExamDate).with_required(),
            FieldSpec::text(DownloadLink).with_required(),
            FieldSpec::string_list(Instructions),
            FieldSpec::object_list(ExamDetails, &["shift", "reporting_time", "exam_time"]),
        ],
    )
}

record_fields!(ResultField {
    ExamName => ("exam_name", "Exam name"),
    ConductingBody => ("conducting_body", "Conducting body"),
    ResultDate => ("result_date", "Result date"),
    ResultLink => ("result_link", "Result link"),
    Cutoff => ("cutoff", "Cutoff"),
    StepsToCheck => ("steps_to_check", "Steps to check"),
});

pub fn result_schema() -> FieldSchema<ResultField> {
    use ResultField::*;
    FieldSchema::new(
        "result",
        vec![
            FieldSpec::text(ExamName).with_required(),
            FieldSpec::text(ConductingBody).with_required(),
            FieldSpec::date(ResultDate).with_required(),
            FieldSpec::text(ResultLink).with_required(),
            FieldSpec::object_list(Cutoff, &["category", "marks"]),
            FieldSpec::string_list(StepsToCheck),
        ],
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use exameets_domain::{AdmitCard, PreviousYearPaper};

    use super::*;
    use crate::forms::{is_valid, BufferKey, FormStore};
    use crate::records::decode;

    #[test]
    fn paper_year_is_numeric() {
        let mut store = FormStore::new(Arc::new(paper_schema()));
        store.set_scalar(PaperField::ExamName, "JEE Main");
        store.set_scalar(PaperField::Subject, "Physics");
        store.set_scalar(PaperField::PaperLink, "https://files.example/jee-2023.pdf");
        assert!(!store.set_scalar_input(PaperField::Year, "last year"));
        assert!(!is_valid(&store));
        assert!(store.set_scalar_input(PaperField::Year, "2023"));
        assert!(is_valid(&store));

        let paper: PreviousYearPaper = decode(&store).expect("decode");
        assert_eq!(paper.year, 2023);
        assert!(paper.tags.is_empty());
    }

    #[test]
    fn admit_card_shift_needs_every_sub_field() {
        let mut store = FormStore::new(Arc::new(admit_card_schema()));
        use AdmitCardField::*;
        store.set_pending_input(BufferKey::Sub(ExamDetails, "shift"), "Morning");
        store.set_pending_input(BufferKey::Sub(ExamDetails, "reporting_time"), "08:00");
        assert!(!store.commit_object_item(ExamDetails));
        store.set_pending_input(BufferKey::Sub(ExamDetails, "exam_time"), "09:00-12:00");
        assert!(store.commit_object_item(ExamDetails));

        store.set_scalar(ExamName, "NEET");
        store.set_scalar(ConductingBody, "NTA");
        store.set_scalar_input(ReleaseDate, "2025-04-20");
        store.set_scalar_input(ExamDate, "2025-05-04");
        store.set_scalar(DownloadLink, "https://nta.example/admit");
        let card: AdmitCard = decode(&store).expect("decode");
        assert_eq!(card.exam_details[0].exam_time, "09:00-12:00");
        assert_eq!(card.exam_date, "2025-05-04");
    }
}
