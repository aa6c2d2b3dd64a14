use crate::output::{print_json, print_table};
use anyhow::Context;
use cdd_core::config::Language;
use cdd_core::init::{initialize_project, InitOptions};
use std::path::Path;

pub fn run(target: &Path, minimal: bool, language: Language, json: bool) -> anyhow::Result<()> {
    let msgs = language.messages();
    let report = initialize_project(target, InitOptions { minimal, language })
        .with_context(|| format!("failed to initialize {}", target.display()))?;

    if json {
        return print_json(&report);
    }

    println!("{}", (msgs.init_title)(&report.path.display().to_string()));
    if let Some(git_root) = &report.git_root {
        println!("{}", (msgs.init_git_root)(&git_root.display().to_string()));
    }
    if report.existing_structure() {
        println!("{}", msgs.init_partial);
    }
    println!();

    let rows: Vec<Vec<String>> = report
        .created_dirs
        .iter()
        .chain(&report.created_files)
        .map(|item| vec![item.clone(), msgs.status_created.to_string()])
        .chain(
            report
                .skipped_files
                .iter()
                .map(|item| vec![item.clone(), msgs.status_exists.to_string()]),
        )
        .collect();
    if !rows.is_empty() {
        print_table(&[msgs.col_component, msgs.col_status], rows);
        println!();
    }

    if minimal {
        println!("{}", msgs.init_minimal_done);
    } else {
        println!("{}", msgs.init_done);
    }
    println!("{}", msgs.init_next_steps);
    Ok(())
}
