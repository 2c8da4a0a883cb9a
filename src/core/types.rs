use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::CalcError;
use super::metrics::calculate_absolute_return;
use super::numeric::round_int;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeId {
    Sip,
    Fd,
    Rd,
    Mf,
    Stock,
    Ppf,
    Scss,
    Kvp,
    Nsc,
    Ssy,
    Sb,
}

impl SchemeId {
    pub const ALL: [SchemeId; 11] = [
        SchemeId::Sip,
        SchemeId::Fd,
        SchemeId::Rd,
        SchemeId::Mf,
        SchemeId::Stock,
        SchemeId::Ppf,
        SchemeId::Scss,
        SchemeId::Kvp,
        SchemeId::Nsc,
        SchemeId::Ssy,
        SchemeId::Sb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SchemeId::Sip => "sip",
            SchemeId::Fd => "fd",
            SchemeId::Rd => "rd",
            SchemeId::Mf => "mf",
            SchemeId::Stock => "stock",
            SchemeId::Ppf => "ppf",
            SchemeId::Scss => "scss",
            SchemeId::Kvp => "kvp",
            SchemeId::Nsc => "nsc",
            SchemeId::Ssy => "ssy",
            SchemeId::Sb => "sb",
        }
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemeId {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        SchemeId::ALL
            .into_iter()
            .find(|id| id.as_str() == lowered)
            .ok_or_else(|| CalcError::UnknownScheme(s.to_string()))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Market,
    Fixed,
    Government,
}

/// Annual rate in percent. Market-linked products carry an overridable
/// default, statutory products a rate the caller cannot change.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RatePolicy {
    Default(f64),
    Fixed(f64),
}

impl RatePolicy {
    pub fn value(self) -> f64 {
        match self {
            RatePolicy::Default(rate) | RatePolicy::Fixed(rate) => rate,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeDefinition {
    pub id: SchemeId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub min_amount: f64,
    pub max_amount: Option<f64>,
    pub rate: RatePolicy,
    pub fixed_tenure: Option<f64>,
    pub min_tenure: Option<f64>,
    pub deposit_years: Option<u32>,
    pub maturity_years: Option<u32>,
}

impl SchemeDefinition {
    pub fn default_rate(&self) -> Option<f64> {
        match self.rate {
            RatePolicy::Default(rate) => Some(rate),
            RatePolicy::Fixed(_) => None,
        }
    }

    pub fn fixed_rate(&self) -> Option<f64> {
        match self.rate {
            RatePolicy::Fixed(rate) => Some(rate),
            RatePolicy::Default(_) => None,
        }
    }
}

/// Uniform input bag shared by every scheme. Each calculator reads only
/// the subset relevant to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemeInputs {
    pub monthly_investment: Option<f64>,
    pub principal: Option<f64>,
    pub monthly_deposit: Option<f64>,
    pub yearly_deposit: Option<f64>,
    pub rate: Option<f64>,
    pub years: Option<f64>,
    pub compounding_frequency: Option<u32>,
}

/// Inputs after scheme-specific field selection and defaulting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedInputs {
    pub amount: f64,
    pub rate: f64,
    pub years: f64,
    pub compounding_frequency: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub total_invested: i64,
    pub returns: i64,
    pub maturity_amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_return: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cagr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarterly_interest: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenure: Option<String>,
}

impl CalculationResult {
    /// Rounds both amounts and derives `returns` from the rounded values so
    /// that `maturity_amount == total_invested + returns` holds exactly.
    pub fn from_amounts(total_invested: f64, maturity_amount: f64) -> Self {
        if !maturity_amount.is_finite() || !total_invested.is_finite() {
            warn!(
                total_invested,
                maturity_amount, "non-finite amount saturated to integer"
            );
        }
        let total_invested = round_int(total_invested);
        let maturity_amount = round_int(maturity_amount);
        Self {
            total_invested,
            returns: maturity_amount.saturating_sub(total_invested),
            maturity_amount,
            absolute_return: None,
            cagr: None,
            quarterly_interest: None,
            tenure: None,
        }
    }

    pub fn with_absolute_return(mut self) -> Self {
        self.absolute_return = Some(calculate_absolute_return(
            self.total_invested as f64,
            self.maturity_amount as f64,
        ));
        self
    }

    /// True when an amount hit the `i64` range limit during rounding.
    pub fn is_saturated(&self) -> bool {
        [self.total_invested, self.maturity_amount]
            .iter()
            .any(|amount| *amount == i64::MAX || *amount == i64::MIN)
    }
}
