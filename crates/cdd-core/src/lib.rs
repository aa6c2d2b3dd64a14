pub mod archive;
pub mod config;
pub mod error;
pub mod git;
pub mod init;
pub mod io;
pub mod messages;
pub mod new_ticket;
pub mod paths;
pub mod progress;
pub mod prompt;
pub mod resolve;
pub mod socrates;
pub mod spec_file;
pub mod templates;
pub mod ticket;

pub use error::{CddError, Result};
