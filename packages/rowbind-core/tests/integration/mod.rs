//! Integration test suite.
//!
//! 1. Binding scenarios against the in-memory row set
//! 2. Cursor wrappers that record or reject writes
//! 3. Multi-field form sessions with configuration and custom codecs

pub mod binding_scenarios;
pub mod form_session_tests;
pub mod helpers;
