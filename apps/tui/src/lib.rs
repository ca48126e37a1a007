// Civic Flow terminal client: library crate shared by the binary and tests

pub mod api;
pub mod app;
pub mod avatar;
pub mod capabilities;
pub mod cli;
pub mod comments;
pub mod config;
pub mod db;
pub mod domain;
pub mod event;
pub mod feed;
pub mod gamification;
pub mod map;
pub mod route;
pub mod session;
pub mod terminal;
pub mod theme;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::{Issue, IssueStatus, IssueType};
pub use route::Route;
