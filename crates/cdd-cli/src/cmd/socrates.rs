use crate::output::{print_json, print_table, truncate};
use anyhow::Context;
use cdd_core::messages::Messages;
use cdd_core::resolve::PathResolver;
use cdd_core::socrates::engine::UpdateAction;
use cdd_core::{paths, socrates};
use std::path::Path;

const PREVIEW_WIDTH: usize = 60;

pub fn run(root: &Path, target: &str, msgs: &Messages, json: bool) -> anyhow::Result<()> {
    let path = resolve_target(root, target)?;
    let mut prompter = super::prompter(json);

    if !json {
        println!("{}", msgs.socrates_banner);
        println!();
    }
    let report = socrates::run(&path, &mut prompter)
        .with_context(|| format!("socrates failed for {}", path.display()))?;

    if json {
        return print_json(&report);
    }

    println!();
    if report.updates.is_empty() {
        println!("{}", msgs.socrates_no_changes);
    } else {
        println!("{}", msgs.socrates_updates);
        let rows = report
            .updates
            .iter()
            .map(|u| {
                vec![
                    u.section.clone(),
                    action_label(u.action, msgs).to_string(),
                    truncate(&u.preview, PREVIEW_WIDTH),
                ]
            })
            .collect();
        print_table(&[msgs.col_section, msgs.col_action, msgs.col_preview], rows);
        println!();
        println!("{}", (msgs.socrates_file_saved)(&report.file_path.display().to_string()));
    }

    if !report.next_steps.is_empty() {
        println!();
        println!("{}", msgs.next_steps_title);
        for step in &report.next_steps {
            println!("  • {step}");
        }
    }
    Ok(())
}

fn action_label(action: UpdateAction, msgs: &Messages) -> &'static str {
    match action {
        UpdateAction::Added => msgs.action_added,
        UpdateAction::Updated => msgs.action_updated,
    }
}

/// `CLAUDE.md` is looked up at the project root; anything else is a ticket
/// name or an explicit path.
fn resolve_target(root: &Path, target: &str) -> anyhow::Result<std::path::PathBuf> {
    if target == paths::CONSTITUTION_MD {
        return Ok(paths::constitution_path(root));
    }
    Ok(PathResolver::new(root).resolve(target, paths::SPEC_FILE, "socrates")?)
}
