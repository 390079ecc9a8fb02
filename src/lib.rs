//! Session-authenticated to-do list API over PostgreSQL.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
