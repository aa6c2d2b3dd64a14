use crate::error::{CddError, Result};
use chrono::NaiveDate;
use rust_embed::Embed;

/// Placeholder in ticket templates replaced by the creation date.
pub const AUTO_GENERATED: &str = "[auto-generated]";

pub const CONSTITUTION_TEMPLATE: &str = "CLAUDE.md";

#[derive(Embed)]
#[folder = "templates/"]
struct Templates;

/// Contents of an embedded template file.
pub fn get(name: &str) -> Result<String> {
    let file = <Templates as Embed>::get(name)
        .ok_or_else(|| CddError::TemplateSourceMissing(name.to_string()))?;
    Ok(String::from_utf8_lossy(&file.data).into_owned())
}

/// Replace every `[auto-generated]` placeholder with `date` as `YYYY-MM-DD`.
pub fn populate_dates(content: &str, date: NaiveDate) -> String {
    content.replace(AUTO_GENERATED, &date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::TicketType;

    #[test]
    fn every_ticket_template_is_embedded() {
        for ticket_type in TicketType::all() {
            let content = get(ticket_type.template_name()).unwrap();
            let doc: serde_yaml::Mapping = serde_yaml::from_str(&content).unwrap();
            let ticket = doc.get("ticket").and_then(|t| t.as_mapping()).unwrap();
            assert_eq!(
                ticket.get("type").and_then(|t| t.as_str()),
                Some(ticket_type.as_str())
            );
            assert!(content.contains(AUTO_GENERATED));
        }
        assert!(get(CONSTITUTION_TEMPLATE).unwrap().contains("## Project Overview"));
    }

    #[test]
    fn missing_template_is_an_error() {
        assert!(matches!(
            get("nope.yaml"),
            Err(CddError::TemplateSourceMissing(_))
        ));
    }

    #[test]
    fn populate_replaces_all_placeholders() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let out = populate_dates("created: \"[auto-generated]\"\nupdated: \"[auto-generated]\"\n", date);
        assert_eq!(out, "created: \"2025-03-09\"\nupdated: \"2025-03-09\"\n");
    }
}
