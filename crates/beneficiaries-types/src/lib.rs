//! beneficiaries-types: domain records and gateway ports shared by every crate.

pub mod domain;
pub mod ports;
