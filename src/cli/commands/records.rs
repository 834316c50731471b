//! `preview`, `new`, `edit` and `upload`: the record modals driven from the
//! shell.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::auth::AuthContext;
use crate::cli::commands::{split_source, CommandDefinition};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::{io, output};
use crate::forms::{
    parse_edit, CollectionEditor, FieldId, FieldKind, FieldSchema, FormStore, GateAction,
    GateOutcome, Modal, ModalMode, Submission, SubmissionGate, SubmitOutcome,
};
use crate::media::{HttpMediaUploader, MediaUploader, UploadFile};
use crate::records::{RecordKind, SchemaVisitor};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "preview",
            "Fill a record form and show whether it can be submitted",
            "preview <kind> [@record.json] <edits...>",
            cmd_preview,
        ),
        CommandDefinition::new(
            "new",
            "Create a record",
            "new <kind> <edits...>",
            cmd_new,
        ),
        CommandDefinition::new(
            "edit",
            "Update a record, starting from its stored JSON",
            "edit <kind> <id> [@record.json] <edits...>",
            cmd_edit,
        ),
        CommandDefinition::new(
            "upload",
            "Upload a file to the media host and print its URL",
            "upload <path>",
            cmd_upload,
        ),
    ]
}

/// Outcome of driving one modal from a command line.
struct ModalReport {
    rendered: Vec<(String, String)>,
    unchanged: Vec<String>,
    control: Option<GateOutcome>,
    outcome: Option<SubmitOutcome>,
    submission: Option<Submission>,
}

/// Opens a modal for the visited schema, applies the edits and optionally
/// presses submit.
struct ModalRun<'a> {
    mode: ModalMode,
    existing: Option<Value>,
    edits: &'a [&'a str],
    gate: SubmissionGate,
    auth: &'a dyn AuthContext,
    submit: bool,
}

impl SchemaVisitor for ModalRun<'_> {
    type Output = Result<ModalReport, CommandError>;

    fn visit<F: FieldId>(self, schema: FieldSchema<F>) -> Self::Output {
        let schema = Arc::new(schema);
        let submitted = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&submitted);
        let mut modal = Modal::new(
            Arc::clone(&schema),
            self.gate,
            move |submission| {
                if let Ok(mut slot) = sink.lock() {
                    *slot = Some(submission);
                }
            },
            || debug!("modal closed"),
        );
        match &self.mode {
            ModalMode::Create => modal.open_create(),
            ModalMode::Edit { id } => {
                modal.open_edit(id.clone(), self.existing.as_ref().unwrap_or(&Value::Null))
            }
        }

        let mut unchanged = Vec::new();
        if let Some(store) = modal.store_mut() {
            for token in self.edits {
                let edit = parse_edit(&schema, token).map_err(CommandError::InvalidArguments)?;
                if !CollectionEditor::apply_edit(store, edit) {
                    unchanged.push((*token).to_string());
                }
            }
        }

        let rendered = modal.store().map(render_form).unwrap_or_default();
        let control = modal.control(self.auth);
        let outcome = self.submit.then(|| modal.submit(self.auth));
        let submission = submitted.lock().ok().and_then(|mut slot| slot.take());
        Ok(ModalReport {
            rendered,
            unchanged,
            control,
            outcome,
            submission,
        })
    }
}

/// Label/value rows for every field, lists rendered item by item.
pub(crate) fn render_form<F: FieldId>(store: &FormStore<F>) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for spec in store.schema().fields() {
        let label = if spec.required {
            format!("{}*", spec.label())
        } else {
            spec.label().to_string()
        };
        match &spec.kind {
            FieldKind::Scalar(_) => {
                let value = store
                    .scalar(spec.id)
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "-".into());
                rows.push((label, value));
            }
            FieldKind::LinkMap { keys } => {
                let links: Vec<String> = keys
                    .iter()
                    .filter_map(|key| {
                        store
                            .link(spec.id, key)
                            .filter(|url| !url.is_empty())
                            .map(|url| format!("{key}: {url}"))
                    })
                    .collect();
                let value = if links.is_empty() {
                    "-".into()
                } else {
                    links.join(", ")
                };
                rows.push((label, value));
            }
            FieldKind::StringList | FieldKind::ObjectList { .. } => {
                let items = CollectionEditor::view(store, spec.id)
                    .map(|view| view.items)
                    .unwrap_or_default();
                if items.is_empty() {
                    rows.push((label, "(none)".into()));
                    continue;
                }
                for item in items {
                    rows.push((format!("{label}[{}]", item.index), item.label));
                }
            }
        }
    }
    rows
}

fn parse_kind(arg: Option<&&str>) -> Result<RecordKind, CommandError> {
    let raw = arg.ok_or_else(|| CommandError::InvalidArguments("missing record kind".into()))?;
    raw.parse::<RecordKind>().map_err(CommandError::InvalidArguments)
}

fn read_existing(path: &str) -> Result<Value, CommandError> {
    let data = std::fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| {
        CommandError::InvalidArguments(format!("`{path}` is not a JSON record: {err}"))
    })
}

fn run_modal(
    context: &ShellContext,
    kind: RecordKind,
    mode: ModalMode,
    args: &[&str],
    submit: bool,
) -> Result<ModalReport, CommandError> {
    let (edits, source) = split_source(args);
    let existing = source.map(read_existing).transpose()?;
    kind.with_schema(ModalRun {
        mode,
        existing,
        edits: &edits,
        gate: context.gate.clone(),
        auth: &context.auth,
        submit,
    })
}

fn print_report(kind: RecordKind, report: &ModalReport) {
    output::section(format!("{kind} form"));
    output::rows(&report.rendered);
    for token in &report.unchanged {
        io::print_warning(format!("`{token}` left the form unchanged"));
    }
}

fn print_control(control: &GateOutcome) {
    if control.valid {
        io::print_success("Form is ready to submit.");
    } else {
        for issue in &control.issues {
            io::print_warning(issue);
        }
    }
    if let GateAction::RedirectToLogin { route } = &control.action {
        io::print_hint(format!("Submitting requires signing in ({route})."));
    }
}

fn cmd_preview(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(args.first())?;
    let report = run_modal(context, kind, ModalMode::Create, &args[1..], false)?;
    print_report(kind, &report);
    if let Some(control) = &report.control {
        print_control(control);
    }
    Ok(())
}

fn cmd_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(args.first())?;
    let report = run_modal(context, kind, ModalMode::Create, &args[1..], true)?;
    print_report(kind, &report);
    finish_submission(context, kind, report)
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind(args.first())?;
    let id = args.get(1).ok_or_else(|| {
        CommandError::InvalidArguments("usage: edit <kind> <id> [edits...]".into())
    })?;
    let mode = ModalMode::Edit { id: id.to_string() };
    let report = run_modal(context, kind, mode, &args[2..], true)?;
    print_report(kind, &report);
    finish_submission(context, kind, report)
}

fn finish_submission(
    context: &ShellContext,
    kind: RecordKind,
    report: ModalReport,
) -> CommandResult {
    match report.outcome {
        Some(SubmitOutcome::Submitted) => {}
        Some(SubmitOutcome::Redirect { route }) => {
            io::print_warning(format!(
                "Not signed in with a role that may do this. Redirecting to {route}."
            ));
            return Ok(());
        }
        Some(SubmitOutcome::Blocked(issues)) => {
            for issue in &issues {
                io::print_warning(issue);
            }
            io::print_error("Nothing was sent.");
            return Ok(());
        }
        Some(SubmitOutcome::NotOpen) | None => return Ok(()),
    }

    let api = Arc::clone(&context.api);
    match report.submission {
        Some(Submission::Create(record)) => {
            let created = context.block_on(api.create_record(kind, &record))?;
            let id = created.get("_id").and_then(Value::as_str).unwrap_or("?");
            io::print_success(format!("Created {kind} {id}."));
        }
        Some(Submission::Update(envelope)) => {
            context.block_on(api.update_record(kind, &envelope.id, &envelope.updated_data))?;
            io::print_success(format!("Updated {kind} {}.", envelope.id));
        }
        None => return Err(CommandError::Message("form closed without a record".into())),
    }
    Ok(())
}

fn cmd_upload(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: upload <path>".into()))?;
    let file = UploadFile::from_path(Path::new(path))?;
    let uploader = HttpMediaUploader::from_settings(
        &context.config.media,
        Duration::from_secs(context.config.request_timeout_secs),
    )?;
    info!(upload_url = uploader.upload_url(), "sending file to media host");
    let url = context.block_on(uploader.upload(file))?;
    io::print_success(url);
    Ok(())
}
