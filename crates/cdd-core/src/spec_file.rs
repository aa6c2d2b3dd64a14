use crate::error::{CddError, Result};
use crate::templates;
use crate::ticket::{TicketMeta, TicketRecord, TicketStatus, TicketType};
use chrono::NaiveDate;
use serde_yaml::{Mapping, Value};
use std::path::Path;

const TICKET_KEY: &str = "ticket";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// A ticket `spec.yaml` held as an ordered YAML mapping.
///
/// Keys keep their file order and keys unknown to the typed records are
/// carried through rewrites untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecDocument {
    mapping: Mapping,
}

impl SpecDocument {
    pub fn from_mapping(mapping: Mapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CddError::SpecNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let value: Value = serde_yaml::from_str(&data).map_err(|e| CddError::InvalidYaml {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        match value {
            Value::Mapping(mapping) => Ok(Self { mapping }),
            _ => Err(CddError::SpecNotMapping(path.to_path_buf())),
        }
    }

    /// Validate the typed view (when the ticket type is known) and write the
    /// mapping atomically, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(ticket_type) = self.ticket_type() {
            TicketRecord::from_mapping(ticket_type, &self.mapping)?;
        }
        let data = serde_yaml::to_string(&self.mapping)?;
        crate::io::atomic_write(path, data.as_bytes())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.mapping.get(key)
    }

    /// Insert or replace a top-level key; existing keys keep their position.
    pub fn set(&mut self, key: &str, value: Value) {
        match self.mapping.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                self.mapping.insert(Value::String(key.to_string()), value);
            }
        }
    }

    pub fn meta(&self) -> Result<TicketMeta> {
        match self.mapping.get(TICKET_KEY) {
            Some(value @ Value::Mapping(_)) => {
                serde_yaml::from_value(value.clone()).map_err(|e| CddError::InvalidSection {
                    section: TICKET_KEY.to_string(),
                    reason: e.to_string(),
                })
            }
            _ => Ok(TicketMeta::default()),
        }
    }

    /// `ticket.type` when present and recognized.
    pub fn ticket_type(&self) -> Option<TicketType> {
        self.ticket_field(TICKET_TYPE_KEY)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    pub fn record(&self) -> Result<Option<TicketRecord>> {
        self.ticket_type()
            .map(|t| TicketRecord::from_mapping(t, &self.mapping))
            .transpose()
    }

    fn ticket_field(&self, field: &str) -> Option<&Value> {
        self.mapping.get(TICKET_KEY)?.as_mapping()?.get(field)
    }

    fn ticket_section_mut(&mut self) -> &mut Mapping {
        let slot = self
            .mapping
            .entry(Value::String(TICKET_KEY.to_string()))
            .or_insert(Value::Null);
        if !slot.is_mapping() {
            *slot = Value::Mapping(Mapping::new());
        }
        match slot {
            Value::Mapping(section) => section,
            _ => unreachable!("ticket slot was just replaced by a mapping"),
        }
    }

    /// Record `ticket_type`, set `created` when missing, blank or still the
    /// template placeholder, and always bump `updated`.
    pub fn stamp(&mut self, ticket_type: TicketType, date: NaiveDate) {
        let today = Value::String(format_date(date));
        let section = self.ticket_section_mut();
        set_field(section, TICKET_TYPE_KEY, Value::String(ticket_type.to_string()));

        let has_created = section
            .get("created")
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty() && s != templates::AUTO_GENERATED);
        if !has_created {
            set_field(section, "created", today.clone());
        }
        set_field(section, "updated", today);
    }

    /// Set `ticket.status`, bump `updated` if the file tracks it, and stamp
    /// the status milestone field when `add_timestamp` is set.
    pub fn apply_status(
        &mut self,
        path: &Path,
        status: TicketStatus,
        add_timestamp: bool,
        date: NaiveDate,
    ) -> Result<()> {
        let section = self
            .mapping
            .get_mut(TICKET_KEY)
            .and_then(Value::as_mapping_mut)
            .ok_or_else(|| CddError::MissingTicketSection(path.to_path_buf()))?;

        let today = Value::String(format_date(date));
        set_field(section, "status", Value::String(status.to_string()));
        if section.contains_key("updated") {
            set_field(section, "updated", today.clone());
        }
        if add_timestamp {
            if let Some(field) = status.timestamp_field() {
                set_field(section, field, today);
            }
        }
        Ok(())
    }

    /// Read, change the status of and rewrite the spec at `path`.
    pub fn update_status(path: &Path, status: TicketStatus, add_timestamp: bool) -> Result<()> {
        let mut doc = Self::read(path)?;
        doc.apply_status(path, status, add_timestamp, today())?;
        doc.write(path)?;
        tracing::debug!(path = %path.display(), %status, "ticket status updated");
        Ok(())
    }

    /// `ticket.status` of the spec at `path`, if any.
    pub fn get_status(path: &Path) -> Result<Option<TicketStatus>> {
        Ok(Self::read(path)?.meta()?.status)
    }
}

const TICKET_TYPE_KEY: &str = "type";

fn set_field(section: &mut Mapping, key: &str, value: Value) {
    match section.get_mut(key) {
        Some(slot) => *slot = value,
        None => {
            section.insert(Value::String(key.to_string()), value);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
