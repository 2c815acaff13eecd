//! End-to-end tests for the DSL surface.
//!
//! These construct real modules through the public API and check the three
//! artifacts against each other: listing text, IR, and debug metadata.

mod context_tests;
mod listing_tests;
