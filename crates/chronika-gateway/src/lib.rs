//! HTTP gateway for the Chronika content API.

pub mod routes;
pub mod server;
