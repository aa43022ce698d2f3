//! Core runtime for reltest: structural values, record introspection,
//! expectation sets, diagnostics, and the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

extern crate self as reltest_core;

// public exports are one module level down
pub mod config;
pub mod context;
pub mod error;
pub mod expect;
pub mod modifier;
pub mod obs;
pub mod report;
pub mod traits;
pub mod value;

///
/// CONSTANTS
///

/// Placeholder rendered when an expectation carries no positive record constraint.
pub const ANY_RECORD: &str = "<Any>";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No sinks, config loaders, or observability helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        context::CallContext,
        error::{Error, ErrorKind},
        modifier::{Modifier, Modifiers},
        traits::{PartialRecord, Record},
        value::Value,
    };
}
