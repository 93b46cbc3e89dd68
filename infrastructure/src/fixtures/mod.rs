//! Content fixtures and the offline classification oracle

mod file;
mod oracle;
mod samples;

pub use file::{ContentFixture, FixtureError};
pub use oracle::FixtureClassificationOracle;
pub use samples::{sample_assessments, sample_fixture, sample_items};
