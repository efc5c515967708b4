//! Wordlist loading, the retrying client and the probe loop.

pub mod client;
pub mod engine;
pub mod error;
pub mod output;
pub mod wordlist;
