// Start of file: /src/utils/mod.rs

/*
    * Error mapping for middleware layers, the JSON response envelope
    * and small shared helpers.
*/

pub mod error_handler;
pub mod response_handler;
pub mod utils;

// End of file: /src/utils/mod.rs
