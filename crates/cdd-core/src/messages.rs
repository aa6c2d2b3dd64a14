//! User-facing CLI text in every supported language.
//!
//! Plain strings are `&'static str` fields; messages that embed a value are
//! `fn` fields so each language controls its own word order.

use crate::error::CddError;

pub struct Messages {
    // init
    pub init_title: fn(&str) -> String,
    pub init_git_root: fn(&str) -> String,
    pub init_partial: &'static str,
    pub init_done: &'static str,
    pub init_minimal_done: &'static str,
    pub init_next_steps: &'static str,
    pub col_component: &'static str,
    pub col_status: &'static str,
    pub status_created: &'static str,
    pub status_exists: &'static str,

    // new
    pub ticket_exists: fn(&str) -> String,
    pub ticket_overwrite_prompt: &'static str,
    pub ticket_rename_prompt: fn(&str) -> String,
    pub ticket_cancel_tip: &'static str,
    pub ticket_invalid_name: &'static str,
    pub ticket_created: fn(&str) -> String,
    pub ticket_overwritten: fn(&str) -> String,
    pub ticket_next_step: fn(&str) -> String,

    // socrates
    pub socrates_banner: &'static str,
    pub socrates_updates: &'static str,
    pub socrates_file_saved: fn(&str) -> String,
    pub socrates_no_changes: &'static str,
    pub next_steps_title: &'static str,
    pub col_section: &'static str,
    pub col_action: &'static str,
    pub col_preview: &'static str,

    // lifecycle
    pub status_updated: fn(&str, &str) -> String,
    pub archived: fn(&str) -> String,
    pub restored: fn(&str) -> String,
    pub no_archived: &'static str,
    pub progress_initialized: fn(&str) -> String,
    pub progress_already_tracked: fn(&str) -> String,
    pub col_ticket: &'static str,
    pub col_step: &'static str,
    pub col_description: &'static str,
    pub action_added: &'static str,
    pub action_updated: &'static str,

    // status / progress reports
    pub label_ticket: &'static str,
    pub label_title: &'static str,
    pub label_type: &'static str,
    pub label_status: &'static str,
    pub label_created: &'static str,
    pub label_updated: &'static str,
    pub label_started: &'static str,
    pub label_steps: &'static str,
    pub label_criteria: &'static str,
    pub label_issues: &'static str,
    pub steps_summary: fn(usize, usize) -> String,
    pub criteria_summary: fn(usize, usize) -> String,
    pub issues_summary: fn(usize) -> String,

    // errors
    pub error_label: &'static str,
    pub error_not_git: &'static str,
    pub error_git_not_found: &'static str,
    pub error_no_write_permission: fn(&str) -> String,
    pub error_dangerous_path: fn(&str) -> String,
    pub error_template_not_found: fn(&str) -> String,
    pub error_invalid_ticket_name: fn(&str) -> String,
    pub error_cancelled: &'static str,
    pub error_already_archived: fn(&str) -> String,
    pub error_already_active: fn(&str) -> String,

    pub config_missing: &'static str,
}

impl Messages {
    /// User-facing text for errors this catalog translates; `None` leaves the
    /// error's own message in place.
    pub fn describe_error(&self, err: &CddError) -> Option<String> {
        let text = match err {
            CddError::NotGitRepo => self.error_not_git.to_string(),
            CddError::GitNotFound => self.error_git_not_found.to_string(),
            CddError::NoWritePermission(path) => {
                (self.error_no_write_permission)(&path.display().to_string())
            }
            CddError::DangerousPath(path) => {
                (self.error_dangerous_path)(&path.display().to_string())
            }
            CddError::TemplateNotFound(path) => (self.error_template_not_found)(path),
            CddError::InvalidTicketName(name) => (self.error_invalid_ticket_name)(name),
            CddError::Cancelled => self.error_cancelled.to_string(),
            CddError::AlreadyArchived(name) => (self.error_already_archived)(name),
            CddError::AlreadyActive(name) => (self.error_already_active)(name),
            _ => return None,
        };
        Some(text)
    }
}

pub static EN: Messages = Messages {
    init_title: |path| format!("🚀 Initializing CDD in {path}"),
    init_git_root: |root| format!("ℹ️  Detected git repository, using git root: {root}"),
    init_partial: "⚠️  CDD structure partially exists. Creating missing items only.",
    init_done: "✅ CDD initialized",
    init_minimal_done: "✅ CDD initialized (minimal)",
    init_next_steps: "Next: describe your project with `cdd socrates CLAUDE.md`",
    col_component: "COMPONENT",
    col_status: "STATUS",
    status_created: "created",
    status_exists: "exists",

    ticket_exists: |path| format!("⚠️  Ticket already exists: {path}"),
    ticket_overwrite_prompt: "Overwrite the existing ticket?",
    ticket_rename_prompt: |kind| format!("Enter a different name for the {kind} ticket"),
    ticket_cancel_tip: "💡 Tip: type 'cancel' or press Ctrl+C to abort",
    ticket_invalid_name: "❌ Invalid name: it must contain letters or digits",
    ticket_created: |path| format!("✅ Created ticket: {path}"),
    ticket_overwritten: |path| format!("✅ Overwrote ticket: {path}"),
    ticket_next_step: |folder| format!("Next: fill it in with `cdd socrates {folder}`"),

    socrates_banner: "🧠 Socrates: let's work through this document together",
    socrates_updates: "📝 Socrates updates",
    socrates_file_saved: |path| format!("📄 File saved: {path}"),
    socrates_no_changes: "Nothing to update: every section is already filled in.",
    next_steps_title: "🎯 Suggested next steps",
    col_section: "SECTION",
    col_action: "ACTION",
    col_preview: "PREVIEW",

    status_updated: |ticket, status| format!("✅ {ticket} is now {status}"),
    archived: |ticket| format!("📦 Archived {ticket}"),
    restored: |ticket| format!("♻️  Restored {ticket}"),
    no_archived: "No archived tickets.",
    progress_initialized: |path| format!("✅ Progress tracking started: {path}"),
    progress_already_tracked: |path| format!("Progress already tracked: {path}"),
    col_ticket: "TICKET",
    col_step: "STEP",
    col_description: "DESCRIPTION",
    action_added: "Added",
    action_updated: "Updated",

    label_ticket: "ticket",
    label_title: "title",
    label_type: "type",
    label_status: "status",
    label_created: "created",
    label_updated: "updated",
    label_started: "started",
    label_steps: "steps",
    label_criteria: "criteria",
    label_issues: "issues",
    steps_summary: |done, total| format!("{done}/{total} completed"),
    criteria_summary: |done, total| format!("{done}/{total} validated"),
    issues_summary: |open| format!("{open} open"),

    error_label: "error",
    error_not_git: "Not a git repository\nCDD requires git for version control of documentation.\nRun: git init",
    error_git_not_found: "Git not found\nCDD requires git to be installed.\nInstall git: https://git-scm.com/downloads",
    error_no_write_permission: |path| format!("No write permission for directory: {path}"),
    error_dangerous_path: |path| format!("Refusing to initialize in system directory: {path}"),
    error_template_not_found: |path| {
        format!("Template not found: {path}\nTemplates are required for ticket creation.\nRun: cdd init")
    },
    error_invalid_ticket_name: |name| {
        format!("Invalid ticket name '{name}'\nName must contain at least one alphanumeric character.\nExample: cdd new feature user-authentication")
    },
    error_cancelled: "cancelled by user",
    error_already_archived: |name| format!("Ticket '{name}' already exists in archive"),
    error_already_active: |name| format!("Ticket '{name}' already exists in active tickets"),

    config_missing: "⚠️  No .cdd/config.yaml found, using English. Run `cdd init` to create it.",
};

pub static PT_BR: Messages = Messages {
    init_title: |path| format!("🚀 Inicializando CDD em {path}"),
    init_git_root: |root| format!("ℹ️  Repositório git detectado, usando a raiz do git: {root}"),
    init_partial: "⚠️  A estrutura CDD já existe parcialmente. Criando apenas os itens ausentes.",
    init_done: "✅ CDD inicializado",
    init_minimal_done: "✅ CDD inicializado (mínimo)",
    init_next_steps: "Próximo passo: descreva seu projeto com `cdd socrates CLAUDE.md`",
    col_component: "COMPONENTE",
    col_status: "SITUAÇÃO",
    status_created: "criado",
    status_exists: "existente",

    ticket_exists: |path| format!("⚠️  O ticket já existe: {path}"),
    ticket_overwrite_prompt: "Sobrescrever o ticket existente?",
    ticket_rename_prompt: |kind| format!("Informe outro nome para o ticket {kind}"),
    ticket_cancel_tip: "💡 Dica: digite 'cancel' ou pressione Ctrl+C para abortar",
    ticket_invalid_name: "❌ Nome inválido: use letras ou números",
    ticket_created: |path| format!("✅ Ticket criado: {path}"),
    ticket_overwritten: |path| format!("✅ Ticket sobrescrito: {path}"),
    ticket_next_step: |folder| format!("Próximo passo: preencha com `cdd socrates {folder}`"),

    socrates_banner: "🧠 Sócrates: vamos construir este documento juntos",
    socrates_updates: "📝 Atualizações do Sócrates",
    socrates_file_saved: |path| format!("📄 Arquivo salvo: {path}"),
    socrates_no_changes: "Nada a atualizar: todas as seções já estão preenchidas.",
    next_steps_title: "🎯 Próximos passos sugeridos",
    col_section: "SEÇÃO",
    col_action: "AÇÃO",
    col_preview: "PRÉVIA",

    status_updated: |ticket, status| format!("✅ {ticket} agora está {status}"),
    archived: |ticket| format!("📦 {ticket} arquivado"),
    restored: |ticket| format!("♻️  {ticket} restaurado"),
    no_archived: "Nenhum ticket arquivado.",
    progress_initialized: |path| format!("✅ Acompanhamento de progresso iniciado: {path}"),
    progress_already_tracked: |path| format!("O progresso já está sendo acompanhado: {path}"),
    col_ticket: "TICKET",
    col_step: "PASSO",
    col_description: "DESCRIÇÃO",
    action_added: "Adicionada",
    action_updated: "Atualizada",

    label_ticket: "ticket",
    label_title: "título",
    label_type: "tipo",
    label_status: "situação",
    label_created: "criado",
    label_updated: "atualizado",
    label_started: "início",
    label_steps: "passos",
    label_criteria: "critérios",
    label_issues: "problemas",
    steps_summary: |done, total| format!("{done}/{total} concluídos"),
    criteria_summary: |done, total| format!("{done}/{total} validados"),
    issues_summary: |open| format!("{open} em aberto"),

    error_label: "erro",
    error_not_git: "Não é um repositório git\nO CDD precisa do git para versionar a documentação.\nExecute: git init",
    error_git_not_found: "Git não encontrado\nO CDD precisa do git instalado.\nInstale o git: https://git-scm.com/downloads",
    error_no_write_permission: |path| format!("Sem permissão de escrita no diretório: {path}"),
    error_dangerous_path: |path| format!("Recusando inicializar em diretório do sistema: {path}"),
    error_template_not_found: |path| {
        format!("Template não encontrado: {path}\nOs templates são necessários para criar tickets.\nExecute: cdd init")
    },
    error_invalid_ticket_name: |name| {
        format!("Nome de ticket inválido '{name}'\nO nome precisa ter pelo menos uma letra ou número.\nExemplo: cdd new feature autenticacao-de-usuario")
    },
    error_cancelled: "cancelado pelo usuário",
    error_already_archived: |name| format!("O ticket '{name}' já existe no arquivo"),
    error_already_active: |name| format!("O ticket '{name}' já existe nos tickets ativos"),

    config_missing: "⚠️  .cdd/config.yaml não encontrado, usando inglês. Execute `cdd init` para criá-lo.",
};
