//! UI module - painting helpers used by the app panels

pub mod components;
