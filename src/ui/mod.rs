//! TUI 渲染

pub mod components;
pub mod login;
pub mod tasks;
