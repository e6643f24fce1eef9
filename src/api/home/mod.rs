/*
* Routes outside any estancia: welcome page and database monitoring.
*/

pub mod handler;
pub mod routes;

pub use routes::home_routes;
