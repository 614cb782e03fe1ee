//! Integration tests
//!
//! Cross-service flows: staff publishing, member signups, and the full
//! stack over HTTP.

mod http_stack;
