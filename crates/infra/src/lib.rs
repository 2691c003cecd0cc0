//! `tasklist-infra` — Postgres-backed persistence for the todos module.
//!
//! The in-memory backend lives next to the repository ports in
//! `tasklist-todos`; this crate holds the relational implementations and the
//! schema migration they expect.

pub mod postgres;

pub use postgres::{migrate, PostgresCommentRepository, PostgresTodoRepository};
