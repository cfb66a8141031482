use async_trait::async_trait;
use asso7_forms::services::{AdjustmentsApi, DeleteApi, LieuxApi, PaymentApi, ScanApi, ScanFile};
use asso7_forms::{ApiError, CancellationToken, ClientConfig};
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    AdjustEarningsRequest, CancelPaymentRequest, CreateLieuRequest, CreateLieuResponse,
    DeleteOperationRequest, LieuSummary, ParticipantsResponse, StatusResponse, UploadPdfResponse,
    ValidatePaymentRequest,
};
use web_sys::{AbortController, FormData};

/// A file chosen in the scan dialog
#[derive(Clone, PartialEq)]
pub struct PdfFile(pub web_sys::File);

impl ScanFile for PdfFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }
}

/// API client for the ASSO7 server endpoints
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_base_url(config.base_url.clone())
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = Request::post(&self.url(path))
            .json(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to serialize request: {}", e)))?;

        match request.send().await {
            Ok(response) => decode(response).await,
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }
}

/// Reads a JSON body; error statuses without a JSON body become server errors
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    match serde_json::from_str::<T>(&text) {
        Ok(data) => Ok(data),
        Err(_) if !response.ok() => Err(ApiError::Server(format!("Erreur serveur ({})", status))),
        Err(e) => Err(ApiError::InvalidResponse(format!("{}: {}", e, text))),
    }
}

#[async_trait(?Send)]
impl LieuxApi for ApiClient {
    async fn search_lieux(&self, query: &str, token: &CancellationToken) -> Result<Vec<LieuSummary>, ApiError> {
        let controller = AbortController::new()
            .map_err(|_| ApiError::Network("AbortController unavailable".to_string()))?;
        let signal = controller.signal();
        token.on_cancel(move || controller.abort());

        let url = self.url("/api/lieux/search");
        match Request::get(&url)
            .query([("q", query)])
            .abort_signal(Some(&signal))
            .send()
            .await
        {
            Ok(response) => decode(response).await,
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }

    async fn create_lieu(&self, request: &CreateLieuRequest) -> Result<CreateLieuResponse, ApiError> {
        self.post_json("/api/lieux", request).await
    }
}

#[async_trait(?Send)]
impl ScanApi for ApiClient {
    type File = PdfFile;

    async fn upload_pdf(&self, file: &PdfFile) -> Result<UploadPdfResponse, ApiError> {
        let form = FormData::new().map_err(|_| ApiError::Network("FormData unavailable".to_string()))?;
        form.append_with_blob("file", &file.0)
            .map_err(|_| ApiError::Network("Impossible de lire le fichier".to_string()))?;

        let request = Request::post(&self.url("/upload_pdf"))
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match request.send().await {
            Ok(response) => decode(response).await,
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }
}

#[async_trait(?Send)]
impl PaymentApi for ApiClient {
    async fn validate_payment(&self, request: &ValidatePaymentRequest) -> Result<StatusResponse, ApiError> {
        self.post_json("/valider_paiement_concert", request).await
    }

    async fn cancel_payment(&self, request: &CancelPaymentRequest) -> Result<StatusResponse, ApiError> {
        self.post_json("/annuler_paiement_concert", request).await
    }
}

#[async_trait(?Send)]
impl AdjustmentsApi for ApiClient {
    async fn load_participants(&self, concert_id: &str) -> Result<ParticipantsResponse, ApiError> {
        let url = self.url(&format!("/participants_concert/{}", concert_id));
        match Request::get(&url).send().await {
            Ok(response) => decode(response).await,
            Err(e) => Err(ApiError::Network(e.to_string())),
        }
    }

    async fn adjust_earnings(&self, request: &AdjustEarningsRequest) -> Result<StatusResponse, ApiError> {
        self.post_json("/ajuster_gains", request).await
    }
}

#[async_trait(?Send)]
impl DeleteApi for ApiClient {
    async fn delete_operation(&self, action: &str, request: &DeleteOperationRequest) -> Result<StatusResponse, ApiError> {
        self.post_json(action, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_built_from_config() {
        let config = ClientConfig {
            base_url: "https://asso7.example/".to_string(),
            ..ClientConfig::default()
        };
        let client = ApiClient::from_config(&config);
        assert_eq!(client.url("/upload_pdf"), "https://asso7.example/upload_pdf");
        assert_eq!(client.url("https://other.example/x"), "https://other.example/x");

        let same_origin = ApiClient::from_config(&ClientConfig::default());
        assert_eq!(same_origin.url("/api/lieux"), "/api/lieux");
    }
}
