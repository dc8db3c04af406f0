//! Reusable TUI components

pub mod modal;
