//! Unit tests for the chat module.
//!
//! Organised by concern: composite keys, domain aggregates, configuration,
//! search shapes, label lookup, conversation creation, and the hardened
//! submit wrapper.


mod conversation_tests;
mod participant_tests;
