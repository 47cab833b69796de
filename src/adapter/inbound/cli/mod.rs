//! CLI module graph.

pub mod command;
pub mod diagnostic;
pub mod output;
pub mod rankings;
pub mod render;
pub mod report;
