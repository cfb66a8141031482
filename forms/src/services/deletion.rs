use async_trait::async_trait;
use shared::{DeleteOperationRequest, StatusResponse};
use tracing::info;

use crate::error::ApiError;
use crate::services::check_status;

pub const DELETE_CONFIRMATION: &str = "Es-tu sûr de vouloir supprimer cette opération ?";
pub const DELETE_FAILED: &str = "Erreur lors de la suppression de l'opération";

#[async_trait(?Send)]
pub trait DeleteApi {
    /// POSTs `{id}` to the operation's form action
    async fn delete_operation(&self, action: &str, request: &DeleteOperationRequest) -> Result<StatusResponse, ApiError>;
}

pub struct DeleteService<A> {
    api: A,
}

impl<A: DeleteApi> DeleteService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Called once the user confirmed [`DELETE_CONFIRMATION`]. Server
    /// messages are replaced by a single generic one.
    pub async fn delete(&self, action: &str, id: &str) -> Result<(), ApiError> {
        info!("Deleting operation {} via {}", id, action);
        let request = DeleteOperationRequest { id: id.to_string() };
        let response = self.api.delete_operation(action, &request).await?;
        check_status(
            StatusResponse {
                success: response.success,
                message: None,
            },
            DELETE_FAILED,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeDelete {
        success: bool,
        calls: RefCell<Vec<(String, String)>>,
    }

    #[async_trait(?Send)]
    impl DeleteApi for FakeDelete {
        async fn delete_operation(&self, action: &str, request: &DeleteOperationRequest) -> Result<StatusResponse, ApiError> {
            self.calls.borrow_mut().push((action.to_string(), request.id.clone()));
            Ok(StatusResponse {
                success: self.success,
                message: Some("Opération verrouillée".to_string()),
            })
        }
    }

    #[tokio::test]
    async fn test_delete_posts_id_to_action() {
        let service = DeleteService::new(FakeDelete { success: true, calls: RefCell::new(Vec::new()) });
        service.delete("/supprimer_operation/42", "42").await.unwrap();

        assert_eq!(
            service.api.calls.borrow()[0],
            ("/supprimer_operation/42".to_string(), "42".to_string())
        );
    }

    #[tokio::test]
    async fn test_failure_uses_generic_message() {
        let service = DeleteService::new(FakeDelete { success: false, calls: RefCell::new(Vec::new()) });
        let err = service.delete("/supprimer_operation/42", "42").await.unwrap_err();
        assert_eq!(err.to_string(), DELETE_FAILED);
    }
}
