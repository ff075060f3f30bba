//! User interaction handling for the transform flow
//!
//! Provides abstractions for the transform picker and user-facing messages,
//! each fakeable in tests.

pub mod display;
pub mod prompts;

pub use display::{MessageDisplay, MessageDisplayImpl};
pub use prompts::UserPrompterImpl;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for user interaction
#[async_trait]
pub trait UserInteraction: Send + Sync {
    /// Present the identifiers for a single choice. `None` means the user
    /// cancelled and the flow must abort without side effects.
    async fn select_transform(&self, names: &[String]) -> Result<Option<String>>;

    /// Display information message
    fn display_info(&self, message: &str);

    /// Display warning message
    fn display_warning(&self, message: &str);

    /// Display error message
    fn display_error(&self, message: &str);

    /// Display success message
    fn display_success(&self, message: &str);
}

/// Default implementation of user interaction
pub struct DefaultUserInteraction {
    prompter: UserPrompterImpl,
    display: MessageDisplayImpl,
}

impl Default for DefaultUserInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultUserInteraction {
    pub fn new() -> Self {
        Self {
            prompter: UserPrompterImpl::new(),
            display: MessageDisplayImpl::new(),
        }
    }
}

#[async_trait]
impl UserInteraction for DefaultUserInteraction {
    async fn select_transform(&self, names: &[String]) -> Result<Option<String>> {
        let choice = self.prompter.prompt_choice("Select a transform:", names)?;
        Ok(choice.map(|index| names[index].clone()))
    }

    fn display_info(&self, message: &str) {
        self.display.info(message);
    }

    fn display_warning(&self, message: &str) {
        self.display.warning(message);
    }

    fn display_error(&self, message: &str) {
        self.display.error(message);
    }

    fn display_success(&self, message: &str) {
        self.display.success(message);
    }
}

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Scripted interaction for tests: pops queued picker responses and
    /// records every message.
    pub struct MockUserInteraction {
        pub selections: Mutex<Vec<Option<String>>>,
        pub messages: Mutex<Vec<String>>,
    }

    impl Default for MockUserInteraction {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockUserInteraction {
        pub fn new() -> Self {
            Self {
                selections: Mutex::new(Vec::new()),
                messages: Mutex::new(Vec::new()),
            }
        }

        pub fn add_selection(&self, selection: Option<String>) {
            self.selections.lock().unwrap().push(selection);
        }

        pub fn get_messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserInteraction for MockUserInteraction {
        async fn select_transform(&self, names: &[String]) -> Result<Option<String>> {
            self.messages
                .lock()
                .unwrap()
                .push(format!("PICK: {}", names.join(",")));
            Ok(self
                .selections
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(None))
        }

        fn display_info(&self, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push(format!("INFO: {message}"));
        }

        fn display_warning(&self, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push(format!("WARN: {message}"));
        }

        fn display_error(&self, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push(format!("ERROR: {message}"));
        }

        fn display_success(&self, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push(format!("SUCCESS: {message}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::MockUserInteraction;
    use super::*;

    #[tokio::test]
    async fn test_mock_selection_order() {
        let interaction = MockUserInteraction::new();
        interaction.add_selection(Some("camel_case".to_string()));
        interaction.add_selection(None);

        let names = vec!["pipe_case".to_string(), "camel_case".to_string()];

        // Responses pop in reverse insertion order.
        assert_eq!(interaction.select_transform(&names).await.unwrap(), None);
        assert_eq!(
            interaction.select_transform(&names).await.unwrap(),
            Some("camel_case".to_string())
        );
    }

    #[tokio::test]
    async fn test_mock_records_messages() {
        let interaction = MockUserInteraction::new();
        interaction.display_info("a");
        interaction.display_error("b");

        assert_eq!(interaction.get_messages(), vec!["INFO: a", "ERROR: b"]);
    }
}
