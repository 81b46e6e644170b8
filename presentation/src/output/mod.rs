//! Output formatting for governance outcomes

pub mod console;
pub mod formatter;
