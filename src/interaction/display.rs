//! Message display implementation
//!
//! All messages go to stderr: stdout is reserved for the replacement text
//! that the editor splices back over the selection.

/// Trait for displaying messages to the user.
pub trait MessageDisplay: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

/// Real implementation of message display.
pub struct MessageDisplayImpl;

impl Default for MessageDisplayImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageDisplayImpl {
    pub fn new() -> Self {
        Self
    }
}

impl MessageDisplay for MessageDisplayImpl {
    fn info(&self, message: &str) {
        eprintln!("ℹ️  {message}");
    }

    fn warning(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {message}");
    }

    fn success(&self, message: &str) {
        eprintln!("✅ {message}");
    }
}
