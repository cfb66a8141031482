//! Client-side logic of the ASSO7 operations back office.
//!
//! Everything here is free of DOM and network concerns so it can be exercised
//! natively. The `frontend` crate wires these types to Yew components and to
//! the HTTP API.

pub mod archive;
pub mod autocomplete;
pub mod cachets;
pub mod concerts;
pub mod config;
pub mod controller;
pub mod dates;
pub mod elements;
pub mod error;
pub mod money;
pub mod payee;
pub mod request;
pub mod rules;
pub mod services;
pub mod validation;

pub use config::{Bootstrap, ClientConfig, PageKind};
pub use controller::FormController;
pub use error::{ApiError, FormError};
pub use request::{CancellationToken, Outcome, RequestSlot};
pub use rules::{RuleEngine, RuleResult, RuleTable};
pub use validation::{FormField, ValidationError};
