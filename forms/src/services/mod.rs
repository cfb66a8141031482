//! Flows that talk to the server. Each one is generic over a small API trait
//! so it runs against the browser client in production and against in-memory
//! fakes in tests.

pub mod adjustments;
pub mod deletion;
pub mod lieux;
pub mod payments;
pub mod scan;

pub use adjustments::{AdjustmentRow, AdjustmentSheet, AdjustmentsApi};
pub use deletion::{DeleteApi, DeleteService};
pub use lieux::{LieuPicker, LieuSuggestion, LieuxApi};
pub use payments::{PaymentApi, PaymentFlow, PaymentPopup, TickAction};
pub use scan::{ScanApi, ScanFile, ScanFill, ScanService};

use shared::StatusResponse;
use tracing::warn;

use crate::error::ApiError;

/// Turns a `{success, message?}` answer into a result
pub(crate) fn check_status(response: StatusResponse, fallback: &str) -> Result<(), ApiError> {
    if response.success {
        Ok(())
    } else {
        warn!("Server refused request: {:?}", response.message);
        Err(ApiError::from_message(response.message, fallback))
    }
}
