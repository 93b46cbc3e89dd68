//! Terminal review gate

pub mod console;
