//! Transit itinerary server.
//!
//! Answers "which stops does this line serve, in which order and in which
//! direction?" from a per-line CSV feed, keeping a disk snapshot of every
//! line it has fetched.

pub mod cache;
pub mod config;
pub mod domain;
pub mod feed;
pub mod itinerary;
pub mod web;

#[cfg(test)]
mod test_log;
