//! Wire objects for the shopstream event stream.
//!
//! Everything a consumer needs to parse the messages published by
//! `shopstream-producer` lives here, together with the field contract the
//! downstream semantic layer resolves against.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(unsafe_code)]

pub mod objects;
pub mod schema;
pub mod timestamp;
