//! shop-types: domain model and repository ports for the shop service.

pub mod domain;
pub mod ports;
