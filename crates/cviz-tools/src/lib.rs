#![forbid(unsafe_code)]

//! Visualization tools an agent can call from a chat.
//!
//! Each tool is a name, an agent-facing description and JSON input schema
//! ([`schema`]), a typed payload ([`payload`]), and an [`invocation::Invocation`]
//! that renders the call as a labeled card with a raw-data view of the exact
//! input. Executing a tool only validates its input: the client does the
//! rendering.

pub mod error;
pub mod invocation;
pub mod payload;
pub mod registry;
pub mod schema;

pub use error::{Result, ToolError};
pub use invocation::{Invocation, InvocationAction, InvocationIds};
pub use registry::{SUCCESS, ToolKind, ToolPayload, execute, specs};
