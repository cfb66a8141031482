//! Pre-submission checks of the operation form. Only the first failure is
//! reported, so the user fixes one field at a time.

use shared::Reason;

use crate::money;
use crate::rules::requires_concert;

/// Form inputs that validation can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Amount,
    GrossAmount,
    Concert,
    LieuDetails,
}

impl FormField {
    /// DOM id of the input to highlight and focus
    pub fn element_id(&self) -> &'static str {
        match self {
            FormField::Amount => "montant",
            FormField::GrossAmount => "brut",
            FormField::Concert => "concert_field",
            FormField::LieuDetails => "m_lieu_nom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Veuillez indiquer un montant.")]
    MissingAmount,
    #[error("Montant invalide : {0}")]
    InvalidAmount(String),
    #[error("Veuillez indiquer le montant brut pour une opération de type 'Salaire'.")]
    MissingGrossAmount,
    #[error("Veuillez sélectionner un concert lié pour une opération de type '{0}'.")]
    MissingConcert(Reason),
    #[error("Nom, Ville et Code postal sont requis.")]
    MissingLieuFields,
}

impl ValidationError {
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::MissingAmount | ValidationError::InvalidAmount(_) => FormField::Amount,
            ValidationError::MissingGrossAmount => FormField::GrossAmount,
            ValidationError::MissingConcert(_) => FormField::Concert,
            ValidationError::MissingLieuFields => FormField::LieuDetails,
        }
    }
}

/// Values the submit check looks at
#[derive(Debug, Clone, Copy)]
pub struct SubmitCheck<'a> {
    pub amount: &'a str,
    pub gross_amount: &'a str,
    pub reason: Option<Reason>,
    pub concert_id: Option<i64>,
}

pub fn validate_submission(check: &SubmitCheck<'_>) -> Result<(), ValidationError> {
    let amount = check.amount.trim();
    if amount.is_empty() {
        return Err(ValidationError::MissingAmount);
    }
    if money::parse_amount(amount).is_none() {
        return Err(ValidationError::InvalidAmount(amount.to_string()));
    }

    if check.reason == Some(Reason::Salaire) && check.gross_amount.trim().is_empty() {
        return Err(ValidationError::MissingGrossAmount);
    }

    if let Some(reason) = check.reason.filter(|r| requires_concert(Some(*r))) {
        if check.concert_id.is_none() {
            return Err(ValidationError::MissingConcert(reason));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<'a>(amount: &'a str, gross: &'a str, reason: Option<Reason>, concert_id: Option<i64>) -> SubmitCheck<'a> {
        SubmitCheck {
            amount,
            gross_amount: gross,
            reason,
            concert_id,
        }
    }

    #[test]
    fn test_empty_amount_is_reported_first() {
        let err = validate_submission(&check("  ", "", Some(Reason::Salaire), None)).unwrap_err();
        assert_eq!(err, ValidationError::MissingAmount);
        assert_eq!(err.field(), FormField::Amount);
        assert_eq!(err.field().element_id(), "montant");
    }

    #[test]
    fn test_invalid_amount() {
        let err = validate_submission(&check("12,5x", "", Some(Reason::Achat), None)).unwrap_err();
        assert_eq!(err, ValidationError::InvalidAmount("12,5x".to_string()));
    }

    #[test]
    fn test_salary_requires_gross_amount() {
        let err = validate_submission(&check("1200", "", Some(Reason::Salaire), None)).unwrap_err();
        assert_eq!(err, ValidationError::MissingGrossAmount);
        assert!(validate_submission(&check("1200", "1500", Some(Reason::Salaire), None)).is_ok());
    }

    #[test]
    fn test_concert_reasons_require_concert() {
        for reason in [Reason::Frais, Reason::RecetteConcert, Reason::RemboursementFraisDivers] {
            let err = validate_submission(&check("30", "", Some(reason), None)).unwrap_err();
            assert_eq!(err, ValidationError::MissingConcert(reason));
            assert_eq!(err.field(), FormField::Concert);
            assert!(validate_submission(&check("30", "", Some(reason), Some(4))).is_ok());
        }
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            ValidationError::MissingConcert(Reason::Frais).to_string(),
            "Veuillez sélectionner un concert lié pour une opération de type 'Frais'."
        );
    }

    #[test]
    fn test_reasons_without_extra_requirements_pass() {
        assert!(validate_submission(&check("10,00", "", Some(Reason::Vente), None)).is_ok());
        assert!(validate_submission(&check("10", "", None, None)).is_ok());
    }
}
