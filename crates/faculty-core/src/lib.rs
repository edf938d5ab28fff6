//! Faculty Core: shared domain abstractions.
//!
//! This crate defines the entities, events and collaborator traits that the
//! notification fan-out and the business actions depend on. It contains no
//! infrastructure code.

pub mod catalog;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod notification;
pub mod repository;
