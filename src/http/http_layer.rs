// HTTP layer - the callable endpoint and its wire format.

#[path = "callable.rs"]
pub mod callable;

#[path = "routes.rs"]
pub mod routes;

pub use routes::{start_server, SharedPipeline};
