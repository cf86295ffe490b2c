//! Itinerary feed provider client and decoder.
//!
//! The provider serves one CSV document per line. The first line is a
//! header; each following line is one stop. Quotes and carriage returns in
//! the body are noise and are stripped before splitting.

mod client;
mod decode;
mod error;

pub use client::{FeedClient, FeedConfig, FeedResponse, FeedSource, LINE_PLACEHOLDER};
pub use decode::{FeedStatus, decode, decode_body};
pub use error::FeedError;
