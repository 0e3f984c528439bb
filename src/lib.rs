//! deskctl: client/staff portal CLI for accounting engagement deadlines and
//! document filing.
//!
//! The two cores are [`schedule`] (pure deadline/status derivation) and
//! [`naming`] (the canonical document filename codec). Everything else is the
//! TOML store and the command surface around them.

pub mod cmd;
pub mod config;
pub mod diagnostic;
pub mod lock;
pub mod model;
pub mod naming;
pub mod parse;
pub mod scan;
pub mod schedule;
pub mod ui;
pub mod validate;
pub mod write;
