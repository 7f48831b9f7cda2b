//! News digest generation and delivery

pub mod pipeline;

pub use pipeline::{DigestPipeline, DigestSettings, with_timeout};
