pub mod beneficiaries;
pub mod docs;
pub mod document_types;
pub mod server;

pub use server::{AppState, HttpServer, HttpServerConfig};
