//! Admission, internship, scholarship and government job forms.

use crate::forms::{FieldSchema, FieldSpec};

use super::IMPORTANT_DATE_FIELDS;

record_fields!(AdmissionField {
    Title => ("title", "Title"),
    Institute => ("institute", "Institute"),
    Course => ("course", "Course"),
    Eligibility => ("eligibility", "Eligibility"),
    ApplicationFee => ("application_fee", "Application fee"),
    ApplicationStart => ("application_start", "Application start"),
    ApplicationEnd => ("application_end", "Application end"),
    OfficialLink => ("official_link", "Official link"),
    IsActive => ("is_active", "Active"),
    ImportantDates => ("important_dates", "Important dates"),
    RequiredDocuments => ("required_documents", "Required documents"),
    ExamDetails => ("exam_details", "Exam details"),
});

pub fn admission_schema() -> FieldSchema<AdmissionField> {
    use AdmissionField::*;
    FieldSchema::new(
        "admission",
        vec![
            FieldSpec::text(Title).with_required(),
            FieldSpec::text(Institute).with_required(),
            FieldSpec::text(Course).with_required(),
            FieldSpec::text(Eligibility),
            FieldSpec::number(ApplicationFee),
            FieldSpec::date(ApplicationStart),
            FieldSpec::date(ApplicationEnd).with_required(),
            FieldSpec::text(OfficialLink).with_required(),
            FieldSpec::boolean(IsActive),
            FieldSpec::object_list(ImportantDates, IMPORTANT_DATE_FIELDS).with_min_items(1),
            FieldSpec::string_list(RequiredDocuments),
            FieldSpec::object_list(ExamDetails, &["exam_name", "exam_date", "mode"]),
        ],
    )
}

record_fields!(InternshipField {
    Title => ("title", "Title"),
    Organization => ("organization", "Organization"),
    Location => ("location", "Location"),
    Stipend => ("stipend", "Stipend"),
    Duration => ("duration", "Duration"),
    Mode => ("mode", "Mode"),
    Deadline => ("deadline", "Deadline"),
    ApplyLink => ("apply_link", "Apply link"),
    IsRemote => ("is_remote", "Remote"),
    SkillsRequired => ("skills_required", "Skills required"),
    Responsibilities => ("responsibilities", "Responsibilities"),
});

pub fn internship_schema() -> FieldSchema<InternshipField> {
    use InternshipField::*;
    FieldSchema::new(
        "internship",
        vec![
            FieldSpec::text(Title).with_required(),
            FieldSpec::text(Organization).with_required(),
            FieldSpec::text(Location).with_required(),
            FieldSpec::text(Stipend),
            FieldSpec::text(Duration),
            FieldSpec::text(Mode),
            FieldSpec::date(Deadline).with_required(),
            FieldSpec::text(ApplyLink).with_required(),
            FieldSpec::boolean(IsRemote),
            FieldSpec::string_list(SkillsRequired).with_min_items(1),
            FieldSpec::string_list(Responsibilities),
        ],
    )
}

record_fields!(ScholarshipField {
    Name => ("name", "Name"),
    Provider => ("provider", "Provider"),
    Amount => ("amount", "Amount"),
    Deadline => ("deadline", "Deadline"),
    ApplicationLink => ("application_link", "Application link"),
    EligibilityCriteria => ("eligibility_criteria", "Eligibility criteria"),
    Benefits => ("benefits", "Benefits"),
    DocumentsRequired => ("documents_required", "Documents required"),
    ImportantDates => ("important_dates", "Important dates"),
});

pub fn scholarship_schema() -> FieldSchema<ScholarshipField> {
    use ScholarshipField::*;
    FieldSchema::new(
        "scholarship",
        vec![
            FieldSpec::text(Name).with_required(),
            FieldSpec::text(Provider).with_required(),
            FieldSpec::text(Amount).with_required(),
            FieldSpec::date(Deadline).with_required(),
            FieldSpec::text(ApplicationLink).with_required(),
            FieldSpec::string_list(EligibilityCriteria).with_min_items(1),
            FieldSpec::string_list(Benefits),
            FieldSpec::string_list(DocumentsRequired),
            FieldSpec::object_list(ImportantDates, IMPORTANT_DATE_FIELDS),
        ],
    )
}

record_fields!(GovernmentJobField {
    Title => ("title", "Title"),
    Department => ("department", "Department"),
    TotalPosts => ("total_posts", "Total posts"),
    Qualification => ("qualification", "Qualification"),
    LastDate => ("last_date", "Last date"),
    NotificationLink => ("notification_link", "Notification link"),
    ApplyLink => ("apply_link", "Apply link"),
    AgeLimit => ("age_limit", "Age limit"),
    Vacancies => ("vacancies", "Vacancies"),
    SelectionProcess => ("selection_process", "Selection process"),
    ImportantDates => ("important_dates", "Important dates"),
    ApplicationFee => ("application_fee", "Application fee"),
});

pub fn government_job_schema() -> FieldSchema<GovernmentJobField> {
    use GovernmentJobField::*;
    FieldSchema::new(
        "government job",
        vec![
            FieldSpec::text(Title).with_required(),
            FieldSpec::text(Department).with_required(),
            FieldSpec::number(TotalPosts).with_required(),
            FieldSpec::text(Qualification).with_required(),
            FieldSpec::date(LastDate).with_required(),
            FieldSpec::text(NotificationLink).with_required(),
            FieldSpec::text(ApplyLink),
            FieldSpec::text(AgeLimit),
            FieldSpec::object_list(Vacancies, &["post_name", "count"]).with_min_items(1),
            FieldSpec::string_list(SelectionProcess),
            FieldSpec::object_list(ImportantDates, IMPORTANT_DATE_FIELDS).with_min_items(1),
            FieldSpec::object_list(ApplicationFee, &["category", "fee"]),
        ],
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use exameets_domain::{GovernmentJob, Internship};

    use super::*;
    use crate::forms::{is_valid, BufferKey, FormStore};
    use crate::records::decode;

    #[test]
    fn completed_internship_decodes_into_the_domain_record() {
        let mut store = FormStore::new(Arc::new(internship_schema()));
        store.set_scalar(InternshipField::Title, "Data intern");
        store.set_scalar(InternshipField::Organization, "Acme");
        store.set_scalar(InternshipField::Location, "Remote");
        store.set_scalar_input(InternshipField::Deadline, "2025-02-28");
        store.set_scalar(InternshipField::ApplyLink, "https://acme.example/jobs/1");
        store.set_checked(InternshipField::IsRemote, true);
        store.set_pending_input(BufferKey::Item(InternshipField::SkillsRequired), "Python");
        store.commit_list_item(InternshipField::SkillsRequired);
        assert!(is_valid(&store));

        let internship: Internship = decode(&store).expect("decode");
        assert_eq!(internship.title, "Data intern");
        assert!(internship.is_remote);
        assert_eq!(internship.skills_required, ["Python"]);
        assert!(internship.id.is_none());
    }

    #[test]
    fn government_job_requires_vacancies_and_dates() {
        let mut store = FormStore::new(Arc::new(government_job_schema()));
        use GovernmentJobField::*;
        store.set_scalar(Title, "Clerk");
        store.set_scalar(Department, "Railways");
        store.set_scalar_input(TotalPosts, "120");
        store.set_scalar(Qualification, "Graduate");
        store.set_scalar_input(LastDate, "2025-06-30");
        store.set_scalar(NotificationLink, "https://gov.example/n/1");
        assert!(!is_valid(&store));

        store.set_pending_input(BufferKey::Sub(Vacancies, "post_name"), "Clerk");
        store.set_pending_input(BufferKey::Sub(Vacancies, "count"), "120");
        store.commit_object_item(Vacancies);
        store.set_pending_input(BufferKey::Sub(ImportantDates, "event"), "Last date");
        store.set_pending_input(BufferKey::Sub(ImportantDates, "date"), "2025-06-30");
        store.commit_object_item(ImportantDates);
        assert!(is_valid(&store));

        let job: GovernmentJob = decode(&store).expect("decode");
        assert_eq!(job.total_posts, 120);
        assert_eq!(job.vacancies[0].post_name, "Clerk");
        assert_eq!(job.important_dates[0].event, "Last date");
    }

    #[test]
    fn non_finite_post_counts_never_reach_the_record() {
        let mut store = FormStore::new(Arc::new(government_job_schema()));
        use GovernmentJobField::*;
        store.set_scalar(Title, "Clerk");
        store.set_scalar(Department, "Railways");
        store.set_scalar(Qualification, "Graduate");
        store.set_scalar_input(LastDate, "2025-06-30");
        store.set_scalar(NotificationLink, "https://gov.example/n/1");
        store.set_pending_input(BufferKey::Sub(Vacancies, "post_name"), "Clerk");
        store.set_pending_input(BufferKey::Sub(Vacancies, "count"), "1");
        store.commit_object_item(Vacancies);
        store.set_pending_input(BufferKey::Sub(ImportantDates, "event"), "Last date");
        store.set_pending_input(BufferKey::Sub(ImportantDates, "date"), "2025-06-30");
        store.commit_object_item(ImportantDates);

        assert!(!store.set_scalar_input(TotalPosts, "NaN"));
        assert!(!store.set_scalar_input(TotalPosts, "inf"));
        assert!(!is_valid(&store));
        assert!(store.to_json().get("total_posts").is_none());

        assert!(store.set_scalar_input(TotalPosts, "12"));
        assert!(is_valid(&store));
    }
}
