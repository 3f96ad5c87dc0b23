//! PromptForge library
//!
//! A desktop frontend for a prompt-optimization backend: an onboarding
//! wizard, a prompt playground with a word-level diff view, a markdown
//! documentation viewer and a live view of optimization runs.

pub mod app;
pub mod backend;
pub mod config;
pub mod constant;
pub mod diff;
pub mod messages;
pub mod style;
pub mod ui;
pub mod wizard;
