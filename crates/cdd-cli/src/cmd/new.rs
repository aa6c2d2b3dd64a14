use crate::output::print_json;
use cdd_core::messages::Messages;
use cdd_core::new_ticket::create_new_ticket;
use cdd_core::ticket::TicketType;
use std::path::Path;

pub fn run(
    root: &Path,
    ticket_type: TicketType,
    name: &str,
    msgs: &Messages,
    json: bool,
) -> anyhow::Result<()> {
    let mut prompter = super::prompter(json);
    let created = create_new_ticket(root, ticket_type, name, &mut prompter, msgs)?;

    if json {
        return print_json(&created);
    }

    let path = created.spec_path.display().to_string();
    if created.overwritten {
        println!("{}", (msgs.ticket_overwritten)(&path));
    } else {
        println!("{}", (msgs.ticket_created)(&path));
    }
    println!("{}", (msgs.ticket_next_step)(&created.folder));
    Ok(())
}
