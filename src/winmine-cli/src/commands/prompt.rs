//! Single-letter commands read at the interactive prompt

use std::fmt;

pub const PROMPT: &str = "q: quit, a: autoplay, t: stop the timer at 0, s: status \
                          (click any cell to show the mines) > ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCommand {
    Quit,
    AutoPlay,
    FreezeTimer,
    Status,
}

/// Input that is not one of the prompt commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown command {:?}, expected one of q, a, t, s", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl PromptCommand {
    pub fn parse(input: &str) -> Result<Self, UnknownCommand> {
        match input.trim() {
            "q" => Ok(PromptCommand::Quit),
            "a" => Ok(PromptCommand::AutoPlay),
            "t" => Ok(PromptCommand::FreezeTimer),
            "s" => Ok(PromptCommand::Status),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(PromptCommand::parse("q"), Ok(PromptCommand::Quit));
        assert_eq!(PromptCommand::parse("a\n"), Ok(PromptCommand::AutoPlay));
        assert_eq!(PromptCommand::parse("  t "), Ok(PromptCommand::FreezeTimer));
        assert_eq!(PromptCommand::parse("s"), Ok(PromptCommand::Status));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            PromptCommand::parse("quit"),
            Err(UnknownCommand("quit".to_string()))
        );
        assert!(PromptCommand::parse("").is_err());
        assert!(PromptCommand::parse("Q").is_err());

        let message = PromptCommand::parse("x").unwrap_err().to_string();
        assert!(message.contains("\"x\""), "got: {}", message);
    }
}
