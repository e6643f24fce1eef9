// Start of file: /src/config/mod.rs

/*
* Environment variables, the estancia registry, per-estancia display
* configuration and the shared application state.
*/

pub mod environment;
pub mod registry;
pub mod state;
pub mod tenant_config;

// End of file: /src/config/mod.rs
