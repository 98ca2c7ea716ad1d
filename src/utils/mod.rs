//! Small shared helpers.

pub mod sanitize;
