//! Section catalogs for every document type Socrates can fill in.

use super::engine::{
    choice, confirm, list, list_if, text, text_or, Answers, Prompt, Rendered, Section,
    SectionValue,
};
use crate::ticket::TicketType;

/// Constitution sections shorter than this are treated as placeholders.
pub const CONSTITUTION_MIN_LEN: usize = 50;

/// Ticket sections count as set as soon as they hold anything.
const TICKET_MIN_LEN: usize = 1;

pub fn for_ticket(ticket_type: TicketType) -> &'static [Section] {
    match ticket_type {
        TicketType::Feature => FEATURE,
        TicketType::Bug => BUG,
        TicketType::Spike => SPIKE,
    }
}

fn prose(body: String, preview: &str) -> Rendered {
    Rendered {
        value: SectionValue::Text(body),
        preview: preview.to_string(),
    }
}

fn plain(answers: &Answers, id: &str) -> Rendered {
    let value = answers.text(id).to_string();
    Rendered {
        preview: value.clone(),
        value: SectionValue::Text(value),
    }
}

fn counted(answers: &Answers, id: &str, noun: &str) -> Rendered {
    let items = answers.list(id).to_vec();
    Rendered {
        preview: format!("{} {noun} defined", items.len()),
        value: SectionValue::List(items),
    }
}

// ---------------------------------------------------------------------------
// Constitution (CLAUDE.md)
// ---------------------------------------------------------------------------

pub static CONSTITUTION: &[Section] = &[
    Section {
        key: "Project Overview",
        intro: "Let's start with the big picture of the project.",
        gate: None,
        min_len: CONSTITUTION_MIN_LEN,
        prompts: &[
            text("name", "What's the project name?"),
            text("purpose", "In one sentence, what does it do?"),
            text("users", "Who are the primary users?"),
            text("domain", "Which business domain or industry is it for?"),
        ],
        render: render_overview,
    },
    Section {
        key: "Technology Stack & Constraints",
        intro: "Now the technology the project is built on.",
        gate: None,
        min_len: CONSTITUTION_MIN_LEN,
        prompts: &[
            text("language", "Primary programming language?"),
            text_or("framework", "Main framework or libraries?", "None"),
            text_or("database", "Database technology?", "None"),
            text_or("deployment", "How is it deployed? (cloud, on-premise, ...)", "Cloud"),
        ],
        render: render_stack,
    },
    Section {
        key: "Architecture & Design Patterns",
        intro: "Describe how the system is put together.",
        gate: Some("Document architecture and design patterns?"),
        min_len: CONSTITUTION_MIN_LEN,
        prompts: &[
            text("architecture", "Overall architecture? (monolith, microservices, serverless, ...)"),
            text_or("patterns", "Design patterns in use?", "To be documented"),
            text_or("layout", "How is the code organized? (by feature, by layer, ...)", "To be documented"),
        ],
        render: render_architecture,
    },
    Section {
        key: "Development Standards",
        intro: "Quality expectations for every change.",
        gate: Some("Document development standards?"),
        min_len: CONSTITUTION_MIN_LEN,
        prompts: &[
            text_or("style", "Code style and linting tools?", "To be defined"),
            text_or("testing", "Testing strategy? (unit, integration, e2e)", "To be defined"),
            text_or("review", "Code review process?", "Pull request review required"),
        ],
        render: render_standards,
    },
    Section {
        key: "Team Conventions",
        intro: "Naming and workflow conventions the team follows.",
        gate: Some("Document team conventions?"),
        min_len: CONSTITUTION_MIN_LEN,
        prompts: &[
            text_or("naming", "Naming conventions?", "To be documented"),
            text_or("branching", "Branching strategy?", "Feature branches"),
            text_or("commits", "Commit message format?", "Conventional commits"),
        ],
        render: render_conventions,
    },
];

fn render_overview(a: &Answers) -> Rendered {
    let body = format!(
        "**Project:** {}\n\n**Purpose:** {}\n\n**Target Users:** {}\n\n**Business Domain:** {}\n\n\
         **Core Value Proposition:**\n- [What makes this project worth building?]",
        a.text("name"),
        a.text("purpose"),
        a.text("users"),
        a.text("domain"),
    );
    prose(body, &format!("{}: {}", a.text("name"), a.text("purpose")))
}

fn render_stack(a: &Answers) -> Rendered {
    let body = format!(
        "**Primary Language:** {}\n**Framework:** {}\n**Database:** {}\n**Deployment:** {}\n\n\
         **Key Dependencies:**\n- [Major dependencies]\n\n\
         **Performance Requirements:**\n- [Latency, throughput]\n\n\
         **Security Requirements:**\n- [Authentication, authorization, compliance]",
        a.text("language"),
        a.text("framework"),
        a.text("database"),
        a.text("deployment"),
    );
    prose(body, &format!("{}, {}", a.text("language"), a.text("framework")))
}

fn render_architecture(a: &Answers) -> Rendered {
    let body = format!(
        "**Architecture Type:** {}\n\n**Design Patterns:**\n{}\n\n**Code Organization:**\n{}\n\n\
         **Key Architectural Decisions:**\n- [Important choices and their context]\n\n\
         **Integration Points:**\n- [External services and APIs]",
        a.text("architecture"),
        a.text("patterns"),
        a.text("layout"),
    );
    prose(body, a.text("architecture"))
}

fn render_standards(a: &Answers) -> Rendered {
    let body = format!(
        "**Code Style:**\n{}\n\n**Testing Standards:**\n{}\n\n**Code Review Process:**\n{}\n\n\
         **Definition of Done:**\n- Code written and tested\n- Tests passing\n- Code reviewed\n\
         - Documentation updated",
        a.text("style"),
        a.text("testing"),
        a.text("review"),
    );
    prose(body, &format!("Testing: {}", a.text("testing")))
}

fn render_conventions(a: &Answers) -> Rendered {
    let body = format!(
        "**Naming Conventions:**\n{}\n\n**Branching Strategy:**\n{}\n\n**Commit Message Format:**\n{}\n\n\
         **Workflow:**\n- [How work moves from idea to release]",
        a.text("naming"),
        a.text("branching"),
        a.text("commits"),
    );
    prose(body, &format!("Branching: {}", a.text("branching")))
}

// ---------------------------------------------------------------------------
// Feature tickets
// ---------------------------------------------------------------------------

pub static FEATURE: &[Section] = &[
    Section {
        key: "title",
        intro: "Let's name this feature.",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[text("title", "A concise title for the feature")],
        render: render_title,
    },
    Section {
        key: "user_story",
        intro: "Who needs this and why?",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[
            text("who", "Who is the user? (role or persona)"),
            text("what", "What do they need to be able to do?"),
            text("why", "What benefit does that give them?"),
        ],
        render: render_user_story,
    },
    Section {
        key: "business_value",
        intro: "Why does this matter to the business?",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[
            text("why", "Why is this important now?"),
            text("impact", "What impact do you expect? (revenue, retention, efficiency)"),
        ],
        render: render_business_value,
    },
    Section {
        key: "acceptance_criteria",
        intro: "How will we know it's done? Give one criterion per line.",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[list("criteria", "Acceptance criterion", 3)],
        render: render_criteria,
    },
    Section {
        key: "implementation_scope",
        intro: "Which parts of the system does this touch?",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[
            confirm("has_frontend", "Does this involve frontend changes?"),
            list_if("has_frontend", "frontend", "Frontend change", 1),
            confirm("has_backend", "Does this involve backend changes?"),
            list_if("has_backend", "backend", "Backend change", 1),
            confirm("has_database", "Does this involve database changes?"),
            list_if("has_database", "database", "Database change", 1),
        ],
        render: render_scope,
    },
    Section {
        key: "technical_considerations",
        intro: "Anything the team should keep in mind technically?",
        gate: Some("Document technical considerations or constraints?"),
        min_len: TICKET_MIN_LEN,
        prompts: &[text("notes", "Technical considerations")],
        render: render_notes,
    },
];

fn render_title(a: &Answers) -> Rendered {
    plain(a, "title")
}

fn render_notes(a: &Answers) -> Rendered {
    plain(a, "notes")
}

fn render_user_story(a: &Answers) -> Rendered {
    let story = format!(
        "As a {},\nI want {},\nSo that {}.",
        a.text("who"),
        a.text("what"),
        a.text("why").trim_end_matches('.'),
    );
    let preview = story.replace('\n', " ");
    prose(story, &preview)
}

fn render_business_value(a: &Answers) -> Rendered {
    let body = format!("{}\n\nBusiness Impact: {}", a.text("why"), a.text("impact"));
    prose(body, a.text("why"))
}

fn render_criteria(a: &Answers) -> Rendered {
    counted(a, "criteria", "criteria")
}

fn render_scope(a: &Answers) -> Rendered {
    let mut entries = Vec::new();
    for area in ["frontend", "backend", "database"] {
        let items = a.list(area);
        if !items.is_empty() {
            entries.push((area.to_string(), SectionValue::List(items.to_vec())));
        }
    }
    let preview = format!(
        "Frontend: {}, Backend: {}, Database: {}",
        a.flag("has_frontend"),
        a.flag("has_backend"),
        a.flag("has_database"),
    );
    Rendered {
        value: SectionValue::Map(entries),
        preview,
    }
}

// ---------------------------------------------------------------------------
// Bug tickets
// ---------------------------------------------------------------------------

pub const SEVERITIES: &[&str] = &["critical", "high", "medium", "low"];

pub static BUG: &[Section] = &[
    Section {
        key: "title",
        intro: "Let's name this bug.",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[text("title", "A concise title for the bug")],
        render: render_title,
    },
    Section {
        key: "problem_description",
        intro: "What's going wrong?",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[
            text("current", "What happens now?"),
            text("expected", "What should happen instead?"),
        ],
        render: render_problem,
    },
    Section {
        key: "reproduction_steps",
        intro: "How can someone reproduce it? One step per line.",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[list("steps", "Step", 2)],
        render: render_steps,
    },
    Section {
        key: "impact_assessment",
        intro: "How bad is it?",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[
            choice("severity", "Severity", SEVERITIES, Some("medium")),
            text("affected", "Who is affected? (all users, admins only, ...)"),
            text_or("workaround", "Is there a workaround?", "None known"),
        ],
        render: render_impact,
    },
];

fn render_problem(a: &Answers) -> Rendered {
    let body = format!(
        "**Current Behavior:**\n{}\n\n**Expected Behavior:**\n{}",
        a.text("current"),
        a.text("expected"),
    );
    prose(body, a.text("current"))
}

fn render_steps(a: &Answers) -> Rendered {
    counted(a, "steps", "steps")
}

fn render_impact(a: &Answers) -> Rendered {
    let entries = ["severity", "affected_users", "workaround"]
        .into_iter()
        .zip(["severity", "affected", "workaround"])
        .map(|(key, id)| (key.to_string(), SectionValue::Text(a.text(id).to_string())))
        .collect();
    Rendered {
        value: SectionValue::Map(entries),
        preview: format!("Severity: {}, Affects: {}", a.text("severity"), a.text("affected")),
    }
}

// ---------------------------------------------------------------------------
// Spike tickets
// ---------------------------------------------------------------------------

pub static SPIKE: &[Section] = &[
    Section {
        key: "title",
        intro: "Let's name this spike.",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[text("title", "A concise title for the spike")],
        render: render_title,
    },
    Section {
        key: "research_questions",
        intro: "What do we need to find out? One question per line.",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[list("questions", "Research question", 2)],
        render: render_questions,
    },
    Section {
        key: "investigation_approach",
        intro: "How will you investigate?",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[text("approach", "Describe the investigation method")],
        render: render_approach,
    },
    Section {
        key: "success_criteria",
        intro: "What defines success for this spike?",
        gate: None,
        min_len: TICKET_MIN_LEN,
        prompts: &[text("success", "How will you know the research is complete?")],
        render: render_success,
    },
    Section {
        key: "timebox",
        intro: "Limit how long this may take.",
        gate: Some("Set a time box for this spike?"),
        min_len: TICKET_MIN_LEN,
        prompts: &[text("timebox", "How long? (e.g. 4 hours, 2 days)")],
        render: render_timebox,
    },
];

fn render_questions(a: &Answers) -> Rendered {
    counted(a, "questions", "questions")
}

fn render_approach(a: &Answers) -> Rendered {
    plain(a, "approach")
}

fn render_success(a: &Answers) -> Rendered {
    plain(a, "success")
}

fn render_timebox(a: &Answers) -> Rendered {
    plain(a, "timebox")
}
