//! Row projections and request payloads for companies and jobs.

pub mod company;
pub mod job;

pub use company::*;
pub use job::*;
