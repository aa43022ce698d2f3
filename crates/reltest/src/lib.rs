//! reltest: declare, match, and verify mocked data-access calls.
//!
//! Production code depends on the `Repository` seam; tests hand it a
//! `MockRepository`, declare the calls they expect, and verify them at
//! teardown.

pub mod repo;

// core modules, re-exported one level down
pub use reltest_core::{config, context, error, expect, modifier, obs, report, traits, value};

// macros
pub use reltest_core::record;

// re-exports
pub use repo::{MockRepository, Repository};

///
/// Prelude
///
/// Everything a test needs to declare and verify expectations.
///

pub mod prelude {
    pub use crate::repo::{MockRepository, Repository};
    pub use reltest_core::{
        expect::{Assertion, MockDelete},
        prelude::*,
        report::{FailureSink, PanicSink, RecordingSink},
    };
}
