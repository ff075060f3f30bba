//! User prompting implementation

use std::io::{self, Write};

use crate::error::Result;

/// Real implementation of the transform picker prompt.
pub struct UserPrompterImpl;

impl Default for UserPrompterImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl UserPrompterImpl {
    pub fn new() -> Self {
        Self
    }

    fn read_line() -> Result<String> {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    /// Parse a choice entry. `Ok(Some)` selects, `Ok(None)` cancels, `Err`
    /// means the entry was invalid and the prompt should repeat.
    pub fn parse_choice_input(input: &str, num_choices: usize) -> std::result::Result<Option<usize>, ()> {
        if input.is_empty() || input.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        input
            .parse::<usize>()
            .ok()
            .and_then(|num| {
                if num > 0 && num <= num_choices {
                    Some(Some(num - 1))
                } else {
                    None
                }
            })
            .ok_or(())
    }

    /// Format the numbered choice menu.
    pub fn format_choice_prompt(message: &str, choices: &[String]) -> String {
        let mut output = String::new();
        output.push_str(message);
        output.push('\n');
        for (i, choice) in choices.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, choice));
        }
        output
    }

    pub fn format_choice_input_prompt(num_choices: usize) -> String {
        format!("Enter choice (1-{num_choices}, empty or q cancels): ")
    }

    pub fn format_invalid_choice_message(num_choices: usize) -> String {
        format!("Invalid choice. Please enter a number between 1 and {num_choices}: ")
    }

    /// Present a numbered menu and return the chosen index, or `None` if the
    /// user cancelled. Prompts are written to stderr so stdout stays clean
    /// for the replacement text.
    pub fn prompt_choice(&self, message: &str, choices: &[String]) -> Result<Option<usize>> {
        if choices.is_empty() {
            return Ok(None);
        }

        eprint!("{}", Self::format_choice_prompt(message, choices));
        eprint!("{}", Self::format_choice_input_prompt(choices.len()));
        io::stderr().flush()?;

        loop {
            let input = Self::read_line()?;
            match Self::parse_choice_input(&input, choices.len()) {
                Ok(choice) => return Ok(choice),
                Err(()) => {
                    eprint!("{}", Self::format_invalid_choice_message(choices.len()));
                    io::stderr().flush()?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_input_valid() {
        assert_eq!(UserPrompterImpl::parse_choice_input("1", 3), Ok(Some(0)));
        assert_eq!(UserPrompterImpl::parse_choice_input("3", 3), Ok(Some(2)));
        assert_eq!(UserPrompterImpl::parse_choice_input("10", 10), Ok(Some(9)));
    }

    #[test]
    fn test_parse_choice_input_cancel() {
        assert_eq!(UserPrompterImpl::parse_choice_input("", 3), Ok(None));
        assert_eq!(UserPrompterImpl::parse_choice_input("q", 3), Ok(None));
        assert_eq!(UserPrompterImpl::parse_choice_input("Q", 3), Ok(None));
    }

    #[test]
    fn test_parse_choice_input_invalid() {
        assert_eq!(UserPrompterImpl::parse_choice_input("0", 3), Err(()));
        assert_eq!(UserPrompterImpl::parse_choice_input("4", 3), Err(()));
        assert_eq!(UserPrompterImpl::parse_choice_input("-1", 3), Err(()));
        assert_eq!(UserPrompterImpl::parse_choice_input("abc", 3), Err(()));
        assert_eq!(UserPrompterImpl::parse_choice_input("1.5", 3), Err(()));
    }

    #[test]
    fn test_format_choice_prompt() {
        let choices = vec!["pipe_case".to_string(), "camel_case".to_string()];
        let formatted = UserPrompterImpl::format_choice_prompt("Select a transform:", &choices);
        assert_eq!(
            formatted,
            "Select a transform:\n  1. pipe_case\n  2. camel_case\n"
        );
    }

    #[test]
    fn test_format_choice_input_prompt() {
        assert_eq!(
            UserPrompterImpl::format_choice_input_prompt(3),
            "Enter choice (1-3, empty or q cancels): "
        );
    }

    #[test]
    fn test_format_invalid_choice_message() {
        assert_eq!(
            UserPrompterImpl::format_invalid_choice_message(2),
            "Invalid choice. Please enter a number between 1 and 2: "
        );
    }

    #[test]
    fn test_prompt_choice_empty_choices_cancels() {
        let prompter = UserPrompterImpl::new();
        let choices: Vec<String> = vec![];
        assert_eq!(prompter.prompt_choice("Choose", &choices).unwrap(), None);
    }
}
