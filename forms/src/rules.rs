//! Payee/reason rule tables and the engine that applies them.
//!
//! The engine is a pure function of `(payee, reason, prior transaction type)`.
//! It decides which reasons can be picked, whether the credit/debit choice is
//! imposed, the payment mode, and whether the gross amount can be entered.
//! The form re-runs it on every payee or reason change.

use serde::{Deserialize, Serialize};
use shared::{PaymentMode, Reason, TransactionType};
use tracing::debug;

use crate::payee::PayeeClass;

/// Reasons that must be linked to a concert
pub const CONCERT_REASONS: [Reason; 3] =
    [Reason::Frais, Reason::RecetteConcert, Reason::RemboursementFraisDivers];

pub fn requires_concert(reason: Option<Reason>) -> bool {
    reason.map_or(false, |r| CONCERT_REASONS.contains(&r))
}

/// What a rule does to the credit/debit control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRule {
    /// Value forced and control locked
    Imposed(TransactionType),
    /// Value forced, the user may still change it
    Preselected(TransactionType),
}

/// Rule bound to a payee class; `reason: None` matches every reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRule {
    pub class: PayeeClass,
    pub reason: Option<Reason>,
    pub rule: TypeRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleTableVersion {
    #[default]
    Current,
    /// Earlier revision of the form scripts, kept for comparison
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    pub version: RuleTableVersion,
    /// Allowed reasons per class, in display order. A missing class uses the
    /// musician entry.
    allowed: &'static [(PayeeClass, &'static [Reason])],
    /// Checked before `generic_rules`, first match wins
    class_rules: &'static [ClassRule],
    generic_rules: &'static [(Reason, TypeRule)],
}

impl RuleTable {
    pub const CURRENT: RuleTable = RuleTable {
        version: RuleTableVersion::Current,
        allowed: &[
            (
                PayeeClass::Musician,
                &[Reason::Salaire, Reason::Frais, Reason::RemboursementFraisDivers],
            ),
            (PayeeClass::Association, &[Reason::Achat, Reason::Vente, Reason::Divers]),
            (PayeeClass::Card, &[Reason::Frais, Reason::RecetteConcert]),
            (PayeeClass::Cash, &[Reason::Frais, Reason::RecetteConcert]),
            (PayeeClass::Treasury, &[]),
        ],
        class_rules: &[
            ClassRule {
                class: PayeeClass::Cash,
                reason: None,
                rule: TypeRule::Imposed(TransactionType::Credit),
            },
            ClassRule {
                class: PayeeClass::Card,
                reason: Some(Reason::Frais),
                rule: TypeRule::Imposed(TransactionType::Debit),
            },
            ClassRule {
                class: PayeeClass::Card,
                reason: Some(Reason::RecetteConcert),
                rule: TypeRule::Imposed(TransactionType::Credit),
            },
        ],
        generic_rules: &[
            (Reason::Salaire, TypeRule::Imposed(TransactionType::Debit)),
            (Reason::Frais, TypeRule::Imposed(TransactionType::Credit)),
            (Reason::RemboursementFraisDivers, TypeRule::Imposed(TransactionType::Credit)),
            (Reason::RecetteConcert, TypeRule::Imposed(TransactionType::Credit)),
            (Reason::Vente, TypeRule::Preselected(TransactionType::Credit)),
        ],
    };

    pub const LEGACY: RuleTable = RuleTable {
        version: RuleTableVersion::Legacy,
        allowed: &[
            (PayeeClass::Musician, &[Reason::Salaire, Reason::Frais]),
            (PayeeClass::Association, &[Reason::Achat, Reason::Vente]),
            (PayeeClass::Card, &[Reason::Frais, Reason::RecetteConcert]),
            (PayeeClass::Cash, &[Reason::Frais, Reason::RecetteConcert]),
        ],
        class_rules: &[
            ClassRule {
                class: PayeeClass::Card,
                reason: Some(Reason::Frais),
                rule: TypeRule::Imposed(TransactionType::Debit),
            },
            ClassRule {
                class: PayeeClass::Cash,
                reason: Some(Reason::Frais),
                rule: TypeRule::Imposed(TransactionType::Debit),
            },
        ],
        generic_rules: &[
            (Reason::Salaire, TypeRule::Imposed(TransactionType::Debit)),
            (Reason::Frais, TypeRule::Imposed(TransactionType::Credit)),
            (Reason::RecetteConcert, TypeRule::Imposed(TransactionType::Credit)),
            (Reason::Vente, TypeRule::Preselected(TransactionType::Credit)),
        ],
    };

    pub fn for_version(version: RuleTableVersion) -> &'static RuleTable {
        match version {
            RuleTableVersion::Current => &Self::CURRENT,
            RuleTableVersion::Legacy => &Self::LEGACY,
        }
    }

    pub fn allowed_reasons(&self, class: PayeeClass) -> &'static [Reason] {
        self.lookup_allowed(class)
            .or_else(|| self.lookup_allowed(PayeeClass::Musician))
            .unwrap_or(&[])
    }

    fn lookup_allowed(&self, class: PayeeClass) -> Option<&'static [Reason]> {
        self.allowed
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, reasons)| *reasons)
    }

    pub fn type_rule(&self, class: PayeeClass, reason: Option<Reason>) -> Option<TypeRule> {
        let class_specific = self
            .class_rules
            .iter()
            .find(|r| r.class == class && (r.reason.is_none() || r.reason == reason))
            .map(|r| r.rule);

        class_specific.or_else(|| {
            let reason = reason?;
            self.generic_rules
                .iter()
                .find(|(r, _)| *r == reason)
                .map(|(_, rule)| *rule)
        })
    }
}

/// A control value together with its lock state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control<T> {
    pub value: T,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleResult {
    pub payee_class: PayeeClass,
    pub allowed_reasons: Vec<Reason>,
    /// Always one of `allowed_reasons`; `None` only when nothing is allowed
    pub reason: Option<Reason>,
    pub transaction_type: Control<Option<TransactionType>>,
    /// Value to apply when the control is locked or nothing is selected yet
    pub payment_mode: Control<PaymentMode>,
    pub gross_amount_editable: bool,
    pub concert_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEngine {
    table: &'static RuleTable,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(RuleTableVersion::Current)
    }
}

impl RuleEngine {
    pub fn new(version: RuleTableVersion) -> Self {
        Self {
            table: RuleTable::for_version(version),
        }
    }

    pub fn table(&self) -> &'static RuleTable {
        self.table
    }

    pub fn evaluate(
        &self,
        payee: &str,
        reason: Option<Reason>,
        prior_type: Option<TransactionType>,
    ) -> RuleResult {
        let payee_class = PayeeClass::classify(payee);
        let allowed = self.table.allowed_reasons(payee_class);

        let reason = match reason {
            Some(r) if allowed.contains(&r) => Some(r),
            _ => allowed.first().copied(),
        };

        let transaction_type = match self.table.type_rule(payee_class, reason) {
            Some(TypeRule::Imposed(t)) => Control { value: Some(t), locked: true },
            Some(TypeRule::Preselected(t)) => Control { value: Some(t), locked: false },
            None => Control { value: prior_type, locked: false },
        };

        let payment_mode = if payee_class == PayeeClass::Cash {
            Control { value: PaymentMode::Cash, locked: true }
        } else {
            Control { value: PaymentMode::Account, locked: false }
        };

        let result = RuleResult {
            payee_class,
            allowed_reasons: allowed.to_vec(),
            reason,
            transaction_type,
            payment_mode,
            gross_amount_editable: reason == Some(Reason::Salaire),
            concert_required: requires_concert(reason),
        };

        debug!(
            "Rules ({:?}) for payee {:?} / {:?}: reason={:?} type={:?} mode={:?}",
            self.table.version,
            payee,
            payee_class,
            result.reason,
            result.transaction_type,
            result.payment_mode
        );

        result
    }
}
