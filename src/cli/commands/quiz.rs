//! Quiz authoring: active courses, new questions and new courses.

use std::sync::Arc;

use crate::auth::{AuthContext, RecordAction};
use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::{io, output};
use crate::forms::{
    parse_edit, CollectionEditor, FieldId, FieldSchema, FormStore, GateAction,
};
use crate::records::quiz::{course_request, question_request, question_schema, test_course_schema};
use crate::sync::{CancelToken, OperationKey};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "tests",
            "List the active test courses",
            "tests",
            cmd_tests,
        ),
        CommandDefinition::new(
            "question",
            "Add a question to one or more test courses",
            "question <edits...>",
            cmd_question,
        ),
        CommandDefinition::new(
            "course",
            "Create a test course",
            "course <edits...>",
            cmd_course,
        ),
        CommandDefinition::new(
            "status",
            "Show the state of each remote operation",
            "status",
            cmd_status,
        ),
    ]
}

/// Fills a fresh store from edit tokens, warning about edits that changed
/// nothing.
pub(crate) fn fill_form<F: FieldId>(
    schema: FieldSchema<F>,
    edits: &[&str],
) -> Result<FormStore<F>, CommandError> {
    let schema = Arc::new(schema);
    let mut store = FormStore::new(Arc::clone(&schema));
    for token in edits {
        let edit = parse_edit(&schema, token).map_err(CommandError::InvalidArguments)?;
        if !CollectionEditor::apply_edit(&mut store, edit) {
            io::print_warning(format!("`{token}` left the form unchanged"));
        }
    }
    Ok(store)
}

/// Quiz writes are creations; anyone else is sent to sign in.
fn ensure_may_create<F: FieldId>(context: &ShellContext, store: &FormStore<F>) -> bool {
    let outcome = context
        .gate
        .evaluate(store, &context.auth, RecordAction::Create);
    if let GateAction::RedirectToLogin { route } = outcome.action {
        io::print_warning(format!(
            "Not signed in with a role that may do this. Redirecting to {route}."
        ));
        return false;
    }
    true
}

fn cmd_tests(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let quiz = context.quiz.clone();
    let tests = context.block_on(async move { quiz.load_tests(&CancelToken::new()).await })?;
    if tests.is_empty() {
        io::print_info("No active test courses.");
        return Ok(());
    }
    output::section("Active test courses");
    let rows: Vec<(String, String)> = tests
        .iter()
        .map(|test| {
            (
                test.id.clone().unwrap_or_else(|| "-".into()),
                format!(
                    "{} ({} min, {} marks)",
                    test.title, test.duration_minutes, test.total_marks
                ),
            )
        })
        .collect();
    output::rows(&rows);
    Ok(())
}

fn cmd_question(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let store = fill_form(question_schema(), args)?;
    if !ensure_may_create(context, &store) {
        return Ok(());
    }
    let request = question_request(&store)?;
    let quiz = context.quiz.clone();
    let response =
        context.block_on(async move { quiz.add_question(&request, &CancelToken::new()).await })?;
    io::print_success(format!(
        "Question added to {} course(s).",
        response.added_to_test_courses.len()
    ));
    Ok(())
}

fn cmd_course(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let store = fill_form(test_course_schema(), args)?;
    if !ensure_may_create(context, &store) {
        return Ok(());
    }
    let request = course_request(&store)?;
    let title = request.title.clone();
    let quiz = context.quiz.clone();
    let response =
        context.block_on(async move { quiz.create_course(&request, &CancelToken::new()).await })?;
    let message = response
        .message
        .unwrap_or_else(|| format!("Created test course \"{title}\"."));
    io::print_success(message);
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.quiz.store().snapshot();
    output::section("Remote operations");
    let rows: Vec<(String, String)> = OperationKey::ALL
        .iter()
        .map(|key| {
            let phase = snapshot.phase(*key);
            let (_, error, _) = snapshot.flags(*key);
            let value = match error {
                Some(message) => format!("{phase}: {message}"),
                None => phase.to_string(),
            };
            (key.to_string(), value)
        })
        .collect();
    output::rows(&rows);
    if context.auth.principal().is_none() {
        io::print_hint("Not signed in; quiz writes will redirect to sign-in.");
    }
    Ok(())
}
