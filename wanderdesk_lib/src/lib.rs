//! Library layer for WanderDesk: resource catalog, forms, validation and the
//! generic CRUD page controller.
//!
//! Wraps the `wanderdesk_api` crate with per-resource configuration and the
//! list/form/delete/publish state machine every admin page shares.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod fields;
pub mod form;
pub mod listing;
pub mod pagination;
pub mod resources;
pub mod validation;

pub use wanderdesk_api;
pub use wanderdesk_api::types;
pub use wanderdesk_api::{PageQuery, Resource};

pub use client::AdminClient;
pub use config::{AdminConfig, ConfigError};
pub use controller::{Dialog, Notifier, PageController, PageState, ResourceBackend, Toast, ToastLevel};
pub use error::{AdminError, FieldError, Operation};
pub use fields::{FieldDescriptor, FieldOption, FieldType};
pub use form::{FormMode, ListingForm};
pub use listing::{Card, Layout, ListingRow, ListingView};
pub use pagination::PaginationState;
pub use resources::{catalog, config_for, Column, ResourceConfig};
