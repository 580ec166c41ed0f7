//! Scenario tools: catalog building, name grammar and call dispatch.

pub mod catalog;
pub mod dispatch;
pub mod naming;

pub use catalog::{ToolDescriptor, build_catalog};
pub use dispatch::{DispatchError, SUCCESS_MESSAGE, ToolOutcome, dispatch};
