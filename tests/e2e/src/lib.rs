//! Shared fixtures for the studydrill end-to-end tests.

pub mod fixtures;
