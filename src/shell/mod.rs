// Composition root for the hotspot service.
//
// Responsibilities:
// - Read config from environment.
// - Install logging.
// - Instantiate the configured store and embedding adapters.
// - Wire them into use case handlers and expose them over HTTP.

pub mod config;
pub mod http;
pub mod state;
pub mod telemetry;
