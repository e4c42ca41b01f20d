//! Reusable rendering helpers.

pub mod chips;
pub mod sub_tabs;
