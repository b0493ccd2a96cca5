//! Students-organization API

mod client;
mod envelope;

pub use client::*;
pub use envelope::*;
