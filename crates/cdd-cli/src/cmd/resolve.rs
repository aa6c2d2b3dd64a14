use crate::output::print_json;
use cdd_core::resolve::PathResolver;
use std::path::Path;

pub fn run(root: &Path, ticket: &str, file: &str, json: bool) -> anyhow::Result<()> {
    let path = PathResolver::new(root).resolve(ticket, file, "resolve")?;

    if json {
        print_json(&serde_json::json!({
            "ticket": ticket,
            "path": path,
            "exists": path.exists(),
        }))?;
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
