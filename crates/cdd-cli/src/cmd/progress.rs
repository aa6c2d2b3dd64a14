use crate::output::{print_fields, print_json, print_table};
use cdd_core::messages::Messages;
use cdd_core::paths;
use cdd_core::progress::Progress;
use cdd_core::resolve::PathResolver;
use std::path::Path;

pub fn run(root: &Path, ticket: &str, init: bool, msgs: &Messages, json: bool) -> anyhow::Result<()> {
    let ticket_dir = PathResolver::new(root).resolve_dir(ticket, "progress")?;
    let progress_path = ticket_dir.join(paths::PROGRESS_FILE);

    if init {
        if progress_path.exists() {
            anyhow::bail!(
                "{}",
                (msgs.progress_already_tracked)(&progress_path.display().to_string())
            );
        }
        let mut progress = Progress::initialize(
            &ticket_dir.join(paths::PLAN_FILE),
            &ticket_dir.join(paths::SPEC_FILE),
        );
        progress.write(&progress_path)?;
        if json {
            return print_json(&progress);
        }
        println!(
            "{}",
            (msgs.progress_initialized)(&progress_path.display().to_string())
        );
        return Ok(());
    }

    let progress = Progress::read(&progress_path)?;
    if json {
        return print_json(&progress);
    }

    print_fields(&[
        (msgs.label_status, progress.status.to_string()),
        (msgs.label_started, progress.started_at.clone()),
        (msgs.label_updated, progress.updated_at.clone()),
        (
            msgs.label_steps,
            (msgs.steps_summary)(progress.completed_steps(), progress.steps.len()),
        ),
        (
            msgs.label_criteria,
            (msgs.criteria_summary)(
                progress.validated_criteria(),
                progress.acceptance_criteria.len(),
            ),
        ),
        (msgs.label_issues, (msgs.issues_summary)(progress.open_issues())),
    ]);

    if !progress.steps.is_empty() {
        println!();
        let rows = progress
            .steps
            .iter()
            .map(|s| vec![s.step_id.to_string(), s.status.to_string(), s.description.clone()])
            .collect();
        print_table(&[msgs.col_step, msgs.col_status, msgs.col_description], rows);
    }
    Ok(())
}
