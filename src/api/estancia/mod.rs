/*
* Estancia-scoped routes: landing page, dashboards, auth views, uploads
* and the tenant database health check.
*/

pub mod handler;
pub mod routes;

pub use routes::estancia_routes;
