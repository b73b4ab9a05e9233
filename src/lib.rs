//! Recall Planner: a spaced-repetition learning log and planning board.
//!
//! Learning items are resurfaced on a fixed recap schedule computed when the
//! item is created (see [`recap`]). Planning data (daily/weekly/monthly/yearly
//! plans and the task groups that generated them) is plain CRUD. Both live in
//! flat JSON documents managed by [`db::Database`]. The [`llm`] module turns a
//! planning conversation into structured plans via a chat-completion API.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod models;
pub mod recap;
