//! Command handlers.

pub(crate) mod records;
pub(crate) mod shell;
