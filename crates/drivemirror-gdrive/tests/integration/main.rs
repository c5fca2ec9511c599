//! Integration tests for the Drive client and destination store
//!
//! All tests run against a wiremock-based mock of the Drive v3 API; no
//! network access or real credentials are involved.

mod common;
mod test_auth;
mod test_folders;
mod test_listing;
mod test_transfer;
