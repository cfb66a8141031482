use crate::validation::ValidationError;

/// Failure of a call to one of the server collaborators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never got a usable answer (offline, aborted, CORS...)
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered `success: false`; the message is shown verbatim
    #[error("{0}")]
    Server(String),
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Builds a `Server` error from an optional server message
    pub fn from_message(message: Option<String>, fallback: &str) -> Self {
        match message {
            Some(message) if !message.trim().is_empty() => ApiError::Server(message),
            _ => ApiError::Server(fallback.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Le type d'opération est imposé par le motif choisi")]
    TransactionTypeLocked,
    #[error("Le mode de paiement est imposé pour ce bénéficiaire")]
    PaymentModeLocked,
    #[error("Le montant brut ne concerne que les salaires")]
    GrossAmountLocked,
    #[error("Veuillez choisir un fichier PDF.")]
    NotPdf,
    #[error("Missing page elements: {}", .0.join(", "))]
    MissingElements(Vec<String>),
    #[error("Invalid page bootstrap: {0}")]
    InvalidBootstrap(String),
}
