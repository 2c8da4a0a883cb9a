mod calculators;
mod dispatch;
mod error;
mod metrics;
mod numeric;
mod schemes;
mod types;
mod validation;

pub use calculators::{
    DEFAULT_FD_COMPOUNDING, calculate_fd, calculate_kvp, calculate_lumpsum, calculate_nsc,
    calculate_ppf, calculate_rd, calculate_savings, calculate_scss, calculate_sip,
    calculate_ssy, implied_absolute_return,
};
pub use dispatch::{LEGACY_FALLBACK_RATE, calculate, calculate_lenient};
pub use error::{CalcError, CalcResult};
pub use metrics::{calculate_absolute_return, calculate_cagr};
pub use numeric::{format_compact, format_currency, round, round2, round_int};
pub use schemes::{
    KVP_TENURE_LABEL, SCHEMES, effective_rate, find_scheme, fixed_rate, government_rates, scheme,
};
pub use types::{
    CalculationResult, Category, RatePolicy, ResolvedInputs, SchemeDefinition, SchemeId,
    SchemeInputs,
};
pub use validation::{MAX_TENURE_YEARS, validate};
