use tracing::{debug, warn};

use super::calculators::{
    DEFAULT_FD_COMPOUNDING, calculate_fd, calculate_kvp, calculate_lumpsum, calculate_nsc,
    calculate_ppf, calculate_rd, calculate_savings, calculate_scss, calculate_sip,
    calculate_ssy,
};
use super::error::{CalcError, CalcResult};
use super::schemes::effective_rate;
use super::types::{CalculationResult, ResolvedInputs, SchemeId, SchemeInputs};
use super::validation::validate;

/// Rate applied when the legacy dispatcher falls back to a fixed deposit.
pub const LEGACY_FALLBACK_RATE: f64 = 7.0;

impl SchemeId {
    /// Name and value of the amount field this scheme reads.
    pub fn amount_input(self, inputs: &SchemeInputs) -> (&'static str, Option<f64>) {
        match self {
            SchemeId::Sip => ("monthlyInvestment", inputs.monthly_investment),
            SchemeId::Rd => ("monthlyDeposit", inputs.monthly_deposit),
            SchemeId::Ppf | SchemeId::Ssy => ("yearlyDeposit", inputs.yearly_deposit),
            SchemeId::Fd
            | SchemeId::Mf
            | SchemeId::Stock
            | SchemeId::Scss
            | SchemeId::Kvp
            | SchemeId::Nsc
            | SchemeId::Sb => ("principal", inputs.principal),
        }
    }

    /// Whether the caller chooses the tenure. Certificates run for a
    /// statutory term instead.
    pub fn uses_years(self) -> bool {
        !matches!(self, SchemeId::Scss | SchemeId::Kvp | SchemeId::Nsc)
    }

    pub fn run(self, inputs: &ResolvedInputs) -> CalculationResult {
        let ResolvedInputs {
            amount,
            rate,
            years,
            compounding_frequency,
        } = *inputs;
        match self {
            SchemeId::Sip => calculate_sip(amount, rate, years),
            SchemeId::Fd => calculate_fd(amount, rate, years, compounding_frequency),
            SchemeId::Rd => calculate_rd(amount, rate, years),
            SchemeId::Mf | SchemeId::Stock => calculate_lumpsum(amount, rate, years),
            SchemeId::Ppf => calculate_ppf(amount, iteration_count(years)),
            SchemeId::Scss => calculate_scss(amount),
            SchemeId::Kvp => calculate_kvp(amount),
            SchemeId::Nsc => calculate_nsc(amount),
            SchemeId::Ssy => calculate_ssy(amount, iteration_count(years)),
            SchemeId::Sb => calculate_savings(amount, years),
        }
    }
}

/// Validates and calculates. Unknown scheme ids and out-of-range inputs
/// are errors.
pub fn calculate(scheme_id: &str, inputs: &SchemeInputs) -> CalcResult<CalculationResult> {
    let id = scheme_id.parse::<SchemeId>()?;
    let resolved = validate(id, inputs)?;
    debug!(scheme = %id, ?resolved, "calculating");
    let result = id.run(&resolved);
    if result.is_saturated() {
        return Err(CalcError::Overflow { scheme: id });
    }
    Ok(result)
}

/// Calculates without validation. Unknown ids fall back to a fixed
/// deposit at the supplied rate or [`LEGACY_FALLBACK_RATE`], and missing
/// amounts count as zero.
pub fn calculate_lenient(scheme_id: &str, inputs: &SchemeInputs) -> CalculationResult {
    let years = inputs.years.unwrap_or_default();
    let compounding_frequency = inputs
        .compounding_frequency
        .unwrap_or(DEFAULT_FD_COMPOUNDING);

    match scheme_id.parse::<SchemeId>() {
        Ok(id) => {
            let resolved = ResolvedInputs {
                amount: id.amount_input(inputs).1.unwrap_or_default(),
                rate: inputs.rate.unwrap_or_else(|| effective_rate(id)),
                years,
                compounding_frequency,
            };
            id.run(&resolved)
        }
        Err(_) => {
            // A zero or NaN rate counts as absent here.
            let rate = inputs
                .rate
                .filter(|rate| *rate != 0.0 && !rate.is_nan())
                .unwrap_or(LEGACY_FALLBACK_RATE);
            warn!(scheme_id, rate, "unknown scheme, falling back to fixed deposit");
            calculate_fd(
                inputs.principal.unwrap_or_default(),
                rate,
                years,
                compounding_frequency,
            )
        }
    }
}

// Year-by-year recurrences run once per started year.
fn iteration_count(years: f64) -> u32 {
    years.ceil().max(0.0) as u32
}
