//! CLI commands for pathscope

pub mod dispatch;
pub mod format;
pub mod generate;
pub mod remove_node;
pub mod show;
pub mod trace;
