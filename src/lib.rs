//! # Morph
//!
//! Pipe editor selections through named transforms supplied by an external
//! tool collection. Editors invoke the `morph` binary as a selection filter:
//! the selection arrives on stdin, the replacement leaves on stdout.
//!
//! ## Usage
//!
//! ```bash
//! morph list
//! morph apply pipe_case < selection
//! ```
//!
//! ## Modules
//!
//! - `config` - Configuration describing the tool and its strategies
//! - `error` - Error taxonomy for the invocation flow
//! - `init` - Starter configuration scaffolding
//! - `interaction` - Transform picker and user-facing messages
//! - `subprocess` - Unified subprocess abstraction layer for testing
//! - `transform` - Discovery, encoding, invocation and reconciliation
pub mod config;
pub mod error;
pub mod init;
pub mod interaction;
pub mod subprocess;
pub mod transform;
