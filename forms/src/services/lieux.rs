use async_trait::async_trait;
use shared::{CreateLieuRequest, CreateLieuResponse, LieuRef, LieuSummary};
use tracing::{debug, info};

use crate::error::{ApiError, FormError};
use crate::request::{guarded, CancellationToken, Outcome, RequestSlot};
use crate::validation::ValidationError;

pub const CREATE_FAILED_MESSAGE: &str = "Création impossible.";

#[async_trait(?Send)]
pub trait LieuxApi {
    /// `GET /api/lieux/search?q=`; implementations abort the request when `token` is cancelled
    async fn search_lieux(&self, query: &str, token: &CancellationToken) -> Result<Vec<LieuSummary>, ApiError>;

    /// `POST /api/lieux`
    async fn create_lieu(&self, request: &CreateLieuRequest) -> Result<CreateLieuResponse, ApiError>;
}

/// One line of the venue dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct LieuSuggestion {
    pub id: i64,
    pub nom: String,
    /// `nom — ville`, or just `nom`
    pub label: String,
}

impl From<LieuSummary> for LieuSuggestion {
    fn from(lieu: LieuSummary) -> Self {
        let label = match lieu.ville.as_deref().map(str::trim) {
            Some(ville) if !ville.is_empty() => format!("{} — {}", lieu.nom, ville),
            _ => lieu.nom.clone(),
        };
        Self {
            id: lieu.id,
            nom: lieu.nom,
            label,
        }
    }
}

/// Nom, ville and code postal are mandatory; every field is trimmed
pub fn prepare_new_lieu(request: &CreateLieuRequest) -> Result<CreateLieuRequest, ValidationError> {
    let trimmed = CreateLieuRequest {
        nom: request.nom.trim().to_string(),
        ville: request.ville.trim().to_string(),
        code_postal: request.code_postal.trim().to_string(),
        adresse: request.adresse.trim().to_string(),
        email: request.email.trim().to_string(),
        telephone: request.telephone.trim().to_string(),
        contacts: request.contacts.trim().to_string(),
        note: request.note.trim().to_string(),
    };
    if trimmed.nom.is_empty() || trimmed.ville.is_empty() || trimmed.code_postal.is_empty() {
        return Err(ValidationError::MissingLieuFields);
    }
    Ok(trimmed)
}

/// Venue autocomplete and quick creation for the concert form
pub struct LieuPicker<A> {
    api: A,
    slot: RequestSlot,
    min_chars: usize,
}

impl<A: LieuxApi> LieuPicker<A> {
    pub fn new(api: A) -> Self {
        Self::with_config(api, 1)
    }

    pub fn with_config(api: A, min_chars: usize) -> Self {
        Self {
            api,
            slot: RequestSlot::new(),
            min_chars: min_chars.max(1),
        }
    }

    /// Searches venues for the text typed so far.
    ///
    /// A short query cancels any pending search and yields no suggestions
    /// without calling the server. A search overtaken by a newer keystroke
    /// yields [`Outcome::Cancelled`].
    pub async fn search(&self, query: &str) -> Outcome<Result<Vec<LieuSuggestion>, ApiError>> {
        let query = query.trim();
        if query.chars().count() < self.min_chars {
            self.slot.cancel();
            return Outcome::Completed(Ok(Vec::new()));
        }

        let token = self.slot.begin();
        debug!("Searching venues for {:?}", query);
        let outcome = guarded(&token, self.api.search_lieux(query, &token)).await;
        match outcome {
            Outcome::Completed(result) => {
                Outcome::Completed(result.map(|lieux| lieux.into_iter().map(LieuSuggestion::from).collect()))
            }
            Outcome::Cancelled => {
                debug!("Venue search for {:?} superseded", query);
                Outcome::Cancelled
            }
        }
    }

    /// Abandons the pending search, e.g. when the field is cleared
    pub fn cancel(&self) {
        self.slot.cancel();
    }

    pub async fn create(&self, request: &CreateLieuRequest) -> Result<LieuRef, FormError> {
        let request = prepare_new_lieu(request)?;
        info!("Creating venue {:?} ({})", request.nom, request.ville);

        let response = self.api.create_lieu(&request).await?;
        match response {
            CreateLieuResponse {
                success: true,
                lieu: Some(lieu),
                ..
            } => Ok(lieu),
            CreateLieuResponse { message, .. } => {
                Err(ApiError::from_message(message, CREATE_FAILED_MESSAGE).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeLieux {
        venues: Vec<LieuSummary>,
        searches: RefCell<Vec<(String, CancellationToken)>>,
        created: RefCell<Vec<CreateLieuRequest>>,
        create_response: Option<CreateLieuResponse>,
    }

    #[async_trait(?Send)]
    impl LieuxApi for FakeLieux {
        async fn search_lieux(&self, query: &str, token: &CancellationToken) -> Result<Vec<LieuSummary>, ApiError> {
            self.searches.borrow_mut().push((query.to_string(), token.clone()));
            tokio::task::yield_now().await;
            let query = query.to_lowercase();
            Ok(self
                .venues
                .iter()
                .filter(|v| v.nom.to_lowercase().contains(&query))
                .cloned()
                .collect())
        }

        async fn create_lieu(&self, request: &CreateLieuRequest) -> Result<CreateLieuResponse, ApiError> {
            self.created.borrow_mut().push(request.clone());
            self.create_response
                .clone()
                .ok_or_else(|| ApiError::Network("offline".to_string()))
        }
    }

    fn venues() -> Vec<LieuSummary> {
        vec![
            LieuSummary { id: 1, nom: "Odradek".to_string(), ville: Some("Rennes".to_string()) },
            LieuSummary { id: 2, nom: "Ode".to_string(), ville: None },
        ]
    }

    fn new_lieu() -> CreateLieuRequest {
        CreateLieuRequest {
            nom: " Ubu ".to_string(),
            ville: "Rennes".to_string(),
            code_postal: "35000".to_string(),
            ..CreateLieuRequest::default()
        }
    }

    #[tokio::test]
    async fn test_search_labels() {
        let picker = LieuPicker::new(FakeLieux { venues: venues(), ..FakeLieux::default() });
        let suggestions = picker.search("od").await.completed().unwrap().unwrap();

        let labels: Vec<&str> = suggestions.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Odradek — Rennes", "Ode"]);
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_call() {
        let picker = LieuPicker::new(FakeLieux::default());
        let outcome = picker.search("   ").await;

        assert_eq!(outcome, Outcome::Completed(Ok(Vec::new())));
        assert!(picker.api.searches.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_newer_keystroke_cancels_pending_search() {
        let picker = LieuPicker::new(FakeLieux { venues: venues(), ..FakeLieux::default() });

        let (first, second) = tokio::join!(picker.search("o"), picker.search("odr"));
        assert!(first.is_cancelled());
        let second = second.completed().unwrap().unwrap();
        assert_eq!(second.len(), 1);

        let searches = picker.api.searches.borrow();
        assert!(searches[0].1.is_cancelled(), "first request aborted");
        assert!(!searches[1].1.is_cancelled());
    }

    #[tokio::test]
    async fn test_create_requires_mandatory_fields() {
        let picker = LieuPicker::new(FakeLieux::default());
        let request = CreateLieuRequest { nom: "Ubu".to_string(), ..CreateLieuRequest::default() };

        let err = picker.create(&request).await.unwrap_err();
        assert_eq!(err, FormError::Validation(ValidationError::MissingLieuFields));
        assert!(picker.api.created.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_create_returns_new_venue() {
        let picker = LieuPicker::new(FakeLieux {
            create_response: Some(CreateLieuResponse {
                success: true,
                lieu: Some(LieuRef { id: 9, nom: "Ubu".to_string() }),
                message: None,
            }),
            ..FakeLieux::default()
        });

        let lieu = picker.create(&new_lieu()).await.unwrap();
        assert_eq!(lieu.id, 9);
        assert_eq!(picker.api.created.borrow()[0].nom, "Ubu");
    }

    #[tokio::test]
    async fn test_create_failure_messages() {
        let picker = LieuPicker::new(FakeLieux {
            create_response: Some(CreateLieuResponse { success: false, lieu: None, message: None }),
            ..FakeLieux::default()
        });
        let err = picker.create(&new_lieu()).await.unwrap_err();
        assert_eq!(err.to_string(), "Création impossible.");

        let offline = LieuPicker::new(FakeLieux::default());
        let err = offline.create(&new_lieu()).await.unwrap_err();
        assert_eq!(err, FormError::Api(ApiError::Network("offline".to_string())));
    }
}
