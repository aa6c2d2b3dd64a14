pub mod archive;
pub mod init;
pub mod new;
pub mod progress;
pub mod resolve;
pub mod socrates;
pub mod status;

use cdd_core::prompt::LinePrompter;
use std::io::{StdinLock, Write};

/// Interactive prompter on stdin. Questions go to stderr in JSON mode so
/// stdout carries only the JSON document.
pub fn prompter(json: bool) -> LinePrompter<StdinLock<'static>, Box<dyn Write>> {
    let output: Box<dyn Write> = if json {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };
    LinePrompter::new(std::io::stdin().lock(), output)
}
