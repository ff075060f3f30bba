//! The transform invoker
//!
//! Given a captured selection, determine the available transform
//! identifiers, obtain one from the user, encode the selection into the
//! tool's literal syntax, invoke the tool, and reconcile its stdout into the
//! replacement text.

pub mod discovery;
pub mod encode;
pub mod invoker;
pub mod post_edit;
pub mod runner;

pub use discovery::{parse_transform_list, Discover, QueryDiscovery, ScanDiscovery};
pub use encode::escape_literal;
pub use invoker::{TransformInvoker, TransformOutcome, TransformRequest};
pub use post_edit::PostEditAction;
pub use runner::{ToolRunner, TransformRunner};
