//! beneficiaries-hex: beneficiary registry API library (services + inbound HTTP)

pub mod config;
pub mod errors;

pub mod application;

pub use beneficiaries_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
