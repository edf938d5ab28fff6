//! Domain layer for the Assignments & Preferences context.

pub mod commands;
