//! waymark: a scroll-synchronised table of contents for long markdown documents.
//!
//! The heart of the crate is the [`tracker`], which maps a continuously changing
//! scroll offset onto the discrete "section currently being read". Everything else
//! exists to host it: [`input`] extracts sections with tree-sitter, [`document`]
//! lays the text out into rows, [`app_state`] owns a viewport and feeds the tracker
//! its trigger signals, and [`ui`] renders the result with ratatui.

pub mod app_state;
pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod input;
pub mod logging;
pub mod schedule;
pub mod section;
pub mod surface;
pub mod tracker;
pub mod ui;
