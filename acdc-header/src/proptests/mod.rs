//! Property-based tests for the attribute table and header helpers
//!
//! These tests verify invariants that should hold for ANY attribute name, value or
//! block content, not just the cases covered by the unit tests.

mod generators;
mod invariants;
