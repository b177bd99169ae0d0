//! curbdesk - a terminal admin console for curbside pickup routes.
//!
//! The heart of the crate is [`table`], a sortable table that reorders its
//! rows when a column header is activated. Around it sit the admin server
//! client ([`api`]), configuration ([`config`]), the terminal UI ([`ui`],
//! [`app`], [`events`]) and the background task plumbing ([`tasks`]).

pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod table;
pub mod tasks;
pub mod ui;
