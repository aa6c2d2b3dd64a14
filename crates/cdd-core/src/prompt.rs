use crate::error::{CddError, Result};
use std::io::{BufRead, Write};

/// Source of interactive answers.
///
/// Implementors provide line-level `ask` and `say`; choices and yes/no
/// confirmations are layered on top. Every method returns
/// [`CddError::Cancelled`] once input is exhausted.
pub trait Prompter {
    /// Print a line of conversation text.
    fn say(&mut self, line: &str) -> Result<()>;

    /// Ask a free-form question. An empty answer yields `default` when given.
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String>;

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        let question = format!("{question} [{hint}]");
        loop {
            let answer = self.ask(&question, None)?;
            match answer.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" | "s" | "sim" => return Ok(true),
                "n" | "no" | "nao" | "não" => return Ok(false),
                _ => self.say("Please answer y or n.")?,
            }
        }
    }

    /// Ask until the answer matches one of `choices` (case-insensitive).
    fn choose(
        &mut self,
        question: &str,
        choices: &[&str],
        default: Option<&str>,
    ) -> Result<String> {
        let question = format!("{question} [{}]", choices.join("/"));
        loop {
            let answer = self.ask(&question, default)?;
            let answer = answer.trim();
            if let Some(choice) = choices.iter().find(|c| c.eq_ignore_ascii_case(answer)) {
                return Ok(choice.to_string());
            }
            self.say(&format!("Please choose one of: {}", choices.join(", ")))?;
        }
    }
}

/// Line-oriented prompter over any reader and writer.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(d) => write!(self.output, "{question} ({d}): ")?,
            None => write!(self.output, "{question}: ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(CddError::Cancelled);
        }

        let answer = line.trim();
        match default {
            Some(d) if answer.is_empty() => Ok(d.to_string()),
            _ => Ok(answer.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn ask_trims_and_uses_default() {
        let mut p = prompter("  hello  \n\n");
        assert_eq!(p.ask("Name", None).unwrap(), "hello");
        assert_eq!(p.ask("Name", Some("anon")).unwrap(), "anon");
    }

    #[test]
    fn end_of_input_cancels() {
        let mut p = prompter("");
        assert!(matches!(p.ask("Name", None), Err(CddError::Cancelled)));
        let mut p = prompter("maybe\n");
        assert!(matches!(p.confirm("Go?", false), Err(CddError::Cancelled)));
    }

    #[test]
    fn confirm_parses_answers() {
        let mut p = prompter("y\nNO\n\nsim\nwhat\nn\n");
        assert!(p.confirm("a", false).unwrap());
        assert!(!p.confirm("b", true).unwrap());
        assert!(p.confirm("c", true).unwrap());
        assert!(p.confirm("d", false).unwrap());
        assert!(!p.confirm("e", true).unwrap());
        let transcript = String::from_utf8(p.into_output()).unwrap();
        assert!(transcript.contains("Please answer y or n."));
    }

    #[test]
    fn choose_reasks_until_valid() {
        let mut p = prompter("urgent\nHIGH\n");
        let answer = p
            .choose("Severity", &["critical", "high", "medium", "low"], None)
            .unwrap();
        assert_eq!(answer, "high");
        let transcript = String::from_utf8(p.into_output()).unwrap();
        assert!(transcript.contains("Severity [critical/high/medium/low]"));
        assert!(transcript.contains("Please choose one of"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_surface() {
        let mut p = LinePrompter::new(Cursor::new(b"y\n".to_vec()), ClosedPipe);
        assert!(matches!(p.say("hello"), Err(CddError::Io(_))));
        assert!(matches!(p.confirm("Go?", false), Err(CddError::Io(_))));
    }

    #[test]
    fn choose_accepts_default() {
        let mut p = prompter("\n");
        let answer = p.choose("Severity", &["high", "low"], Some("low")).unwrap();
        assert_eq!(answer, "low");
    }
}
