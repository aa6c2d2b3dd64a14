use crate::error::Result;
use crate::prompt::Prompter;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fmt;

/// Answer that ends a list prompt.
pub const LIST_SENTINEL: &str = "done";

const PREVIEW_LEN: usize = 100;

// ---------------------------------------------------------------------------
// Catalog types
// ---------------------------------------------------------------------------

/// One question in a section's prompt sequence.
#[derive(Debug)]
pub enum Prompt {
    /// Required free text. Skipped unless the `when` confirm answered yes.
    Text {
        id: &'static str,
        question: &'static str,
        default: Option<&'static str>,
        when: Option<&'static str>,
    },
    Choice {
        id: &'static str,
        question: &'static str,
        choices: &'static [&'static str],
        default: Option<&'static str>,
    },
    Confirm {
        id: &'static str,
        question: &'static str,
    },
    /// Repeated entry until [`LIST_SENTINEL`]; the sentinel becomes the
    /// default once `done_after` entries exist. `when` gates it like `Text`.
    List {
        id: &'static str,
        question: &'static str,
        done_after: usize,
        when: Option<&'static str>,
    },
}

pub const fn text(id: &'static str, question: &'static str) -> Prompt {
    Prompt::Text {
        id,
        question,
        default: None,
        when: None,
    }
}

pub const fn text_or(id: &'static str, question: &'static str, default: &'static str) -> Prompt {
    Prompt::Text {
        id,
        question,
        default: Some(default),
        when: None,
    }
}

pub const fn choice(
    id: &'static str,
    question: &'static str,
    choices: &'static [&'static str],
    default: Option<&'static str>,
) -> Prompt {
    Prompt::Choice {
        id,
        question,
        choices,
        default,
    }
}

pub const fn confirm(id: &'static str, question: &'static str) -> Prompt {
    Prompt::Confirm { id, question }
}

pub const fn list(id: &'static str, question: &'static str, done_after: usize) -> Prompt {
    Prompt::List {
        id,
        question,
        done_after,
        when: None,
    }
}

pub const fn list_if(
    when: &'static str,
    id: &'static str,
    question: &'static str,
    done_after: usize,
) -> Prompt {
    Prompt::List {
        id,
        question,
        done_after,
        when: Some(when),
    }
}

/// Value assembled for a section from its answers.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionValue {
    Text(String),
    List(Vec<String>),
    Map(Vec<(String, SectionValue)>),
}

impl SectionValue {
    pub fn to_yaml(&self) -> Value {
        match self {
            SectionValue::Text(s) => Value::String(s.clone()),
            SectionValue::List(items) => {
                Value::Sequence(items.iter().cloned().map(Value::String).collect())
            }
            SectionValue::Map(entries) => {
                let mut map = Mapping::new();
                for (k, v) in entries {
                    map.insert(Value::String(k.clone()), v.to_yaml());
                }
                Value::Mapping(map)
            }
        }
    }

    /// Markdown body for document formats that store sections as prose.
    pub fn to_markdown(&self) -> String {
        match self {
            SectionValue::Text(s) => s.clone(),
            SectionValue::List(items) => items
                .iter()
                .map(|i| format!("- {i}"))
                .collect::<Vec<_>>()
                .join("\n"),
            SectionValue::Map(entries) => entries
                .iter()
                .map(|(k, v)| format!("**{k}:** {}", v.to_markdown()))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

pub struct Rendered {
    pub value: SectionValue,
    pub preview: String,
}

/// A named block of a document and how to ask for it.
pub struct Section {
    pub key: &'static str,
    pub intro: &'static str,
    /// Yes/no question asked before an optional section.
    pub gate: Option<&'static str>,
    /// Content shorter than this counts as unset.
    pub min_len: usize,
    pub prompts: &'static [Prompt],
    pub render: fn(&Answers) -> Rendered,
}

impl Section {
    pub fn is_filled(&self, existing_len: Option<usize>) -> bool {
        existing_len.is_some_and(|len| len > 0 && len >= self.min_len)
    }
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

/// Answers collected for one section, keyed by prompt id.
#[derive(Debug, Default)]
pub struct Answers {
    entries: Vec<(&'static str, Answer)>,
}

impl Answers {
    pub fn insert(&mut self, id: &'static str, answer: Answer) {
        self.entries.retain(|(k, _)| *k != id);
        self.entries.push((id, answer));
    }

    fn get(&self, id: &str) -> Option<&Answer> {
        self.entries.iter().find(|(k, _)| *k == id).map(|(_, a)| a)
    }

    pub fn text(&self, id: &str) -> &str {
        match self.get(id) {
            Some(Answer::Text(s)) => s,
            _ => "",
        }
    }

    pub fn list(&self, id: &str) -> &[String] {
        match self.get(id) {
            Some(Answer::List(items)) => items,
            _ => &[],
        }
    }

    pub fn flag(&self, id: &str) -> bool {
        matches!(self.get(id), Some(Answer::Flag(true)))
    }
}

// ---------------------------------------------------------------------------
// Store & report
// ---------------------------------------------------------------------------

/// Document that the engine reads section sizes from and writes sections to.
pub trait SectionStore {
    /// Size of the meaningful content under `key`; `None` when absent.
    fn content_len(&self, key: &str) -> Option<usize>;
    fn put(&mut self, key: &str, value: &SectionValue);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateAction {
    Added,
    Updated,
}

impl fmt::Display for UpdateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateAction::Added => f.write_str("Added"),
            UpdateAction::Updated => f.write_str("Updated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionUpdate {
    pub section: String,
    pub action: UpdateAction,
    pub preview: String,
}

// ---------------------------------------------------------------------------
// Conversation loop
// ---------------------------------------------------------------------------

/// Walk `catalog` in order, prompting for every unset section and storing
/// the rendered result. Returns one update record per section written.
pub fn run_catalog<S: SectionStore + ?Sized>(
    catalog: &[Section],
    store: &mut S,
    prompter: &mut dyn Prompter,
) -> Result<Vec<SectionUpdate>> {
    let mut updates = Vec::new();

    for section in catalog {
        let existing = store.content_len(section.key);
        if section.is_filled(existing) {
            tracing::debug!(section = section.key, "section already filled, skipping");
            continue;
        }
        if let Some(gate) = section.gate {
            if !prompter.confirm(gate, false)? {
                tracing::debug!(section = section.key, "optional section declined");
                continue;
            }
        }

        prompter.say("")?;
        prompter.say(section.intro)?;
        let answers = collect_answers(section.prompts, prompter)?;
        let rendered = (section.render)(&answers);
        store.put(section.key, &rendered.value);
        prompter.say(&format!("✅ {} captured", section.key))?;

        let action = if existing.unwrap_or(0) == 0 {
            UpdateAction::Added
        } else {
            UpdateAction::Updated
        };
        updates.push(SectionUpdate {
            section: section.key.to_string(),
            action,
            preview: preview(&rendered.preview),
        });
    }

    Ok(updates)
}

fn collect_answers(prompts: &[Prompt], prompter: &mut dyn Prompter) -> Result<Answers> {
    let mut answers = Answers::default();
    for prompt in prompts {
        match prompt {
            Prompt::Text {
                id,
                question,
                default,
                when,
            } => {
                if when.is_some_and(|flag| !answers.flag(flag)) {
                    continue;
                }
                let value = ask_required(prompter, question, *default)?;
                answers.insert(*id, Answer::Text(value));
            }
            Prompt::Choice {
                id,
                question,
                choices,
                default,
            } => {
                let value = prompter.choose(question, choices, *default)?;
                answers.insert(*id, Answer::Text(value));
            }
            Prompt::Confirm { id, question } => {
                let value = prompter.confirm(question, false)?;
                answers.insert(*id, Answer::Flag(value));
            }
            Prompt::List {
                id,
                question,
                done_after,
                when,
            } => {
                if when.is_some_and(|flag| !answers.flag(flag)) {
                    continue;
                }
                let items = ask_list(prompter, question, *done_after)?;
                answers.insert(*id, Answer::List(items));
            }
        }
    }
    Ok(answers)
}

fn ask_required(
    prompter: &mut dyn Prompter,
    question: &str,
    default: Option<&str>,
) -> Result<String> {
    loop {
        let answer = prompter.ask(question, default)?;
        if !answer.trim().is_empty() {
            return Ok(answer.trim().to_string());
        }
        prompter.say("An answer is required.")?;
    }
}

fn ask_list(prompter: &mut dyn Prompter, question: &str, done_after: usize) -> Result<Vec<String>> {
    let mut items: Vec<String> = Vec::new();
    loop {
        let label = format!(
            "{question} #{} (type '{LIST_SENTINEL}' to finish)",
            items.len() + 1
        );
        let default = (!items.is_empty() && items.len() >= done_after).then_some(LIST_SENTINEL);
        let answer = prompter.ask(&label, default)?;
        let answer = answer.trim();

        if answer.eq_ignore_ascii_case(LIST_SENTINEL) {
            if items.is_empty() {
                prompter.say("Please add at least one entry.")?;
                continue;
            }
            return Ok(items);
        }
        if answer.is_empty() {
            continue;
        }
        items.push(answer.to_string());
    }
}

fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    if line.chars().count() > PREVIEW_LEN {
        let cut: String = line.chars().take(PREVIEW_LEN).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}

/// Length of the meaningful text inside a YAML value: trimmed string
/// characters, summed over sequences and mappings.
pub fn yaml_content_len(value: &Value) -> usize {
    match value {
        Value::Null => 0,
        Value::Bool(_) | Value::Number(_) => 1,
        Value::String(s) => s.trim().chars().count(),
        Value::Sequence(items) => items.iter().map(yaml_content_len).sum(),
        Value::Mapping(map) => map.values().map(yaml_content_len).sum(),
        Value::Tagged(tagged) => yaml_content_len(&tagged.value),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CddError;
    use crate::prompt::LinePrompter;
    use std::collections::BTreeMap;
    use std::io::Cursor;

    #[derive(Default)]
    struct MemStore {
        sections: BTreeMap<String, SectionValue>,
    }

    impl SectionStore for MemStore {
        fn content_len(&self, key: &str) -> Option<usize> {
            self.sections
                .get(key)
                .map(|v| v.to_markdown().trim().chars().count())
        }

        fn put(&mut self, key: &str, value: &SectionValue) {
            self.sections.insert(key.to_string(), value.clone());
        }
    }

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn render_summary(a: &Answers) -> Rendered {
        let text = a.text("summary").to_string();
        Rendered {
            value: SectionValue::Text(text.clone()),
            preview: text,
        }
    }

    fn render_items(a: &Answers) -> Rendered {
        Rendered {
            value: SectionValue::List(a.list("items").to_vec()),
            preview: a.list("items").join(", "),
        }
    }

    static SUMMARY: &[Prompt] = &[text("summary", "Summary")];
    static ITEMS: &[Prompt] = &[list("items", "Item", 2)];

    fn catalog(min_len: usize) -> Vec<Section> {
        vec![
            Section {
                key: "summary",
                intro: "Summary section",
                gate: None,
                min_len,
                prompts: SUMMARY,
                render: render_summary,
            },
            Section {
                key: "items",
                intro: "Items section",
                gate: Some("Add items?"),
                min_len: 1,
                prompts: ITEMS,
                render: render_items,
            },
        ]
    }

    #[test]
    fn prompts_missing_sections_in_order() {
        let mut store = MemStore::default();
        let mut p = prompter("A short summary\ny\nfirst\nsecond\n\n");
        let updates = run_catalog(&catalog(1), &mut store, &mut p).unwrap();

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].section, "summary");
        assert_eq!(updates[0].action, UpdateAction::Added);
        assert_eq!(
            store.sections["items"],
            SectionValue::List(vec!["first".into(), "second".into()])
        );
        assert_eq!(updates[1].preview, "first, second");
    }

    #[test]
    fn filled_sections_are_never_reprompted() {
        let mut store = MemStore::default();
        let long = "x".repeat(60);
        store.put("summary", &SectionValue::Text(long.clone()));
        store.put("items", &SectionValue::List(vec!["kept".into()]));

        let mut p = prompter("");
        let updates = run_catalog(&catalog(50), &mut store, &mut p).unwrap();
        assert!(updates.is_empty());
        assert_eq!(store.sections["summary"], SectionValue::Text(long));
    }

    #[test]
    fn short_content_counts_as_unset() {
        let mut store = MemStore::default();
        store.put("summary", &SectionValue::Text("TBD".into()));
        let mut p = prompter("A much better summary\nn\n");
        let updates = run_catalog(&catalog(50), &mut store, &mut p).unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].action, UpdateAction::Updated);
    }

    #[test]
    fn declined_gate_skips_section() {
        let mut store = MemStore::default();
        let mut p = prompter("Summary text\n\n");
        let updates = run_catalog(&catalog(1), &mut store, &mut p).unwrap();
        assert_eq!(updates.len(), 1);
        assert!(!store.sections.contains_key("items"));
    }

    #[test]
    fn list_requires_one_entry_before_sentinel() {
        let mut p = prompter("DONE\n\nonly\ndone\n");
        let items = ask_list(&mut p, "Item", 3).unwrap();
        assert_eq!(items, vec!["only"]);
        let transcript = String::from_utf8(p.into_output()).unwrap();
        assert!(transcript.contains("Please add at least one entry."));
    }

    #[test]
    fn sentinel_becomes_default_after_threshold() {
        let mut p = prompter("a\nb\n\n");
        let items = ask_list(&mut p, "Item", 2).unwrap();
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn required_text_reasks_on_blank() {
        let mut p = prompter("\n   \nfinally\n");
        assert_eq!(ask_required(&mut p, "Q", None).unwrap(), "finally");
    }

    #[test]
    fn end_of_input_cancels_conversation() {
        let mut store = MemStore::default();
        let mut p = prompter("");
        let err = run_catalog(&catalog(1), &mut store, &mut p).unwrap_err();
        assert!(matches!(err, CddError::Cancelled));
        assert!(store.sections.is_empty());
    }

    #[test]
    fn conditional_prompts_follow_confirms() {
        static PROMPTS: &[Prompt] = &[
            confirm("has_api", "Backend work?"),
            list_if("has_api", "api", "Endpoint", 1),
            confirm("has_ui", "Frontend work?"),
            list_if("has_ui", "ui", "Screen", 1),
        ];
        let mut p = prompter("y\n/login\n\nn\n");
        let answers = collect_answers(PROMPTS, &mut p).unwrap();
        assert_eq!(answers.list("api").to_vec(), vec!["/login".to_string()]);
        assert!(answers.list("ui").is_empty());
        assert!(!answers.flag("has_ui"));
    }

    #[test]
    fn yaml_content_length() {
        let v: Value = serde_yaml::from_str("frontend: []\nbackend: ['api']\n").unwrap();
        assert_eq!(yaml_content_len(&v), 3);
        assert_eq!(yaml_content_len(&Value::String("   ".into())), 0);
        assert_eq!(yaml_content_len(&Value::Null), 0);
    }

    #[test]
    fn previews_are_first_line_and_bounded() {
        assert_eq!(preview("first\nsecond"), "first");
        let long = "y".repeat(150);
        assert_eq!(preview(&long).chars().count(), PREVIEW_LEN + 3);
    }

    #[test]
    fn section_values_render() {
        let v = SectionValue::Map(vec![
            ("severity".into(), SectionValue::Text("high".into())),
            ("steps".into(), SectionValue::List(vec!["a".into()])),
        ]);
        assert_eq!(v.to_markdown(), "**severity:** high\n**steps:** - a");
        let yaml = serde_yaml::to_string(&v.to_yaml()).unwrap();
        assert!(yaml.starts_with("severity: high\n"));
    }
}
