//! 命令行外壳

pub mod args;
pub mod commands;
