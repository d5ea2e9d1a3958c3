// Shared test fixtures, compiled only for tests.

pub mod questions;
pub mod state;
pub mod stores;
