use async_trait::async_trait;
use chrono::NaiveDate;
use shared::UploadPdfResponse;
use tracing::{info, warn};

use crate::dates;
use crate::error::{ApiError, FormError};

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const UNRECOGNIZED_MESSAGE: &str = "PDF non reconnu ou format incorrect.";

/// A file picked or dropped by the user
pub trait ScanFile {
    fn name(&self) -> String;
    fn mime_type(&self) -> String;
}

#[async_trait(?Send)]
pub trait ScanApi {
    type File: ScanFile;

    /// `POST /upload_pdf` as multipart, field `file`
    async fn upload_pdf(&self, file: &Self::File) -> Result<UploadPdfResponse, ApiError>;
}

/// Values read from a pay slip, ready to go into the operation form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanFill {
    pub amount: Option<String>,
    pub gross_amount: Option<String>,
    pub details: Option<String>,
    pub date: Option<NaiveDate>,
}

impl From<UploadPdfResponse> for ScanFill {
    fn from(response: UploadPdfResponse) -> Self {
        Self {
            amount: response.montant,
            gross_amount: response.brut,
            details: response.preciser,
            date: response.date.as_deref().and_then(dates::parse_wire),
        }
    }
}

pub struct ScanService<A> {
    api: A,
}

impl<A: ScanApi> ScanService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn scan(&self, file: &A::File) -> Result<ScanFill, FormError> {
        if file.mime_type() != PDF_MIME_TYPE {
            warn!("Rejected {:?} ({})", file.name(), file.mime_type());
            return Err(FormError::NotPdf);
        }

        info!("Uploading pay slip {:?}", file.name());
        let response = self.api.upload_pdf(file).await?;
        if !response.success {
            warn!("Pay slip not recognized: {:?}", response.message);
            return Err(ApiError::from_message(response.message, UNRECOGNIZED_MESSAGE).into());
        }
        Ok(ScanFill::from(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeFile {
        name: &'static str,
        mime: &'static str,
    }

    impl ScanFile for FakeFile {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn mime_type(&self) -> String {
            self.mime.to_string()
        }
    }

    struct FakeScanner {
        response: UploadPdfResponse,
        uploads: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl ScanApi for FakeScanner {
        type File = FakeFile;

        async fn upload_pdf(&self, _file: &FakeFile) -> Result<UploadPdfResponse, ApiError> {
            self.uploads.set(self.uploads.get() + 1);
            Ok(self.response.clone())
        }
    }

    fn scanner_with(response: UploadPdfResponse) -> ScanService<FakeScanner> {
        ScanService::new(FakeScanner { response, uploads: Cell::new(0) })
    }

    const PDF: FakeFile = FakeFile { name: "bulletin.pdf", mime: "application/pdf" };

    #[tokio::test]
    async fn test_rejects_non_pdf_without_upload() {
        let service = scanner_with(UploadPdfResponse::default());
        let image = FakeFile { name: "bulletin.png", mime: "image/png" };

        let err = service.scan(&image).await.unwrap_err();
        assert_eq!(err, FormError::NotPdf);
        assert_eq!(err.to_string(), "Veuillez choisir un fichier PDF.");
        assert_eq!(service.api.uploads.get(), 0);
    }

    #[tokio::test]
    async fn test_successful_scan_fills_fields() {
        let service = scanner_with(UploadPdfResponse {
            success: true,
            montant: Some("980.12".to_string()),
            brut: Some("1250".to_string()),
            preciser: None,
            date: Some("2024-03-31".to_string()),
            message: None,
        });

        let fill = service.scan(&PDF).await.unwrap();
        assert_eq!(fill.amount.as_deref(), Some("980.12"));
        assert_eq!(fill.gross_amount.as_deref(), Some("1250"));
        assert_eq!(fill.details, None);
        assert_eq!(fill.date.map(dates::to_display).as_deref(), Some("31/03/2024"));
    }

    #[tokio::test]
    async fn test_unrecognized_pdf_uses_default_message() {
        let service = scanner_with(UploadPdfResponse { success: false, ..UploadPdfResponse::default() });
        let err = service.scan(&PDF).await.unwrap_err();
        assert_eq!(err.to_string(), UNRECOGNIZED_MESSAGE);

        let service = scanner_with(UploadPdfResponse {
            success: false,
            message: Some("Bulletin illisible".to_string()),
            ..UploadPdfResponse::default()
        });
        let err = service.scan(&PDF).await.unwrap_err();
        assert_eq!(err.to_string(), "Bulletin illisible");
    }
}
