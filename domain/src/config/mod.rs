//! Configuration value objects shared by every layer.

pub mod output_format;

pub use output_format::OutputFormat;
