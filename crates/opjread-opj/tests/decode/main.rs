//! End-to-end decode tests: build byte-exact project streams in
//! memory and read them back through the public decoder.

mod reading;

pub use fixture::*;
