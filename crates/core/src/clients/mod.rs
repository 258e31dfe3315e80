//! Clients module - domain models, services, and traits.

mod clients_model;
mod clients_service;
mod clients_traits;

pub use clients_model::{ClientDetails, ClientRecord, NewClient};
pub use clients_service::ClientService;
pub use clients_traits::{ClientRepositoryTrait, ClientServiceTrait};
