use chrono::SecondsFormat;

use crate::analytics::DashboardTable;
use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::{io, output};
use crate::sync::CancelToken;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "analytics",
        "Show the student analytics dashboard, optionally filtered by name or email",
        "analytics [query]",
        cmd_analytics,
    )]
}

fn cmd_analytics(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let quiz = context.quiz.clone();
    let analytics =
        context.block_on(async move { quiz.load_analytics(&CancelToken::new()).await })?;
    let table = DashboardTable::build(&analytics);

    output::section("Student analytics");
    output::rows(&[
        (String::from("Students"), table.total_students.to_string()),
        (String::from("Registrations"), table.total_registrations.to_string()),
        (String::from("Attempts"), table.total_attempts.to_string()),
    ]);

    let rows = table.filter(&query);
    if rows.is_empty() {
        io::print_info(format!("No students match \"{}\".", query.trim()));
        return Ok(());
    }
    output::section(format!("{} student(s)", rows.len()));
    let lines: Vec<(String, String)> = rows
        .iter()
        .map(|row| {
            let score = row
                .average_score
                .map(|score| format!("{score:.1}%"))
                .unwrap_or_else(|| "-".into());
            let last = row
                .last_attempt
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_else(|| "never".into());
            (
                format!("{} <{}>", row.name, row.email),
                format!(
                    "{} registered, {} attempts, avg {score}, last {last}",
                    row.registrations, row.attempts
                ),
            )
        })
        .collect();
    output::rows(&lines);
    Ok(())
}
