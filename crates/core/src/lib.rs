//! Domain types, validation and export rendering for the Strategist backend.
//!
//! Nothing in this crate touches the database or the network; the `db`,
//! `mailer` and `api` crates build on these pieces.

pub mod contact;
pub mod error;
pub mod export;
pub mod strategy;
pub mod types;
pub mod user;
pub mod validation;
