//! Expectation engine: declared calls, first-match execution, and
//! teardown verification.

pub(crate) mod assert;
pub(crate) mod delete;
pub(crate) mod format;


// re-exports
pub use assert::{Assertion, Repeat};
pub use delete::{DeleteExpectations, MockDelete};
