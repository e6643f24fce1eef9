// Start of file: /src/api/mod.rs

pub mod estancia;
pub mod home;
pub mod middleware;

// End of file: /src/api/mod.rs
