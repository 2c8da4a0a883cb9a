//! Static catalog of supported investment products.
//!
//! Statutory rates live only here. The government rate table and the
//! per-scheme lookups are both derived from [`SCHEMES`].

use super::types::{Category, RatePolicy, SchemeDefinition, SchemeId};

pub static SCHEMES: [SchemeDefinition; 11] = [
    SchemeDefinition {
        id: SchemeId::Sip,
        name: "Systematic Investment Plan",
        description: "Fixed monthly investment into a market-linked mutual fund",
        category: Category::Market,
        min_amount: 500.0,
        max_amount: None,
        rate: RatePolicy::Default(12.0),
        fixed_tenure: None,
        min_tenure: None,
        deposit_years: None,
        maturity_years: None,
    },
    SchemeDefinition {
        id: SchemeId::Fd,
        name: "Fixed Deposit",
        description: "Bank deposit with interest compounded quarterly",
        category: Category::Fixed,
        min_amount: 1_000.0,
        max_amount: None,
        rate: RatePolicy::Default(7.0),
        fixed_tenure: None,
        min_tenure: None,
        deposit_years: None,
        maturity_years: None,
    },
    SchemeDefinition {
        id: SchemeId::Rd,
        name: "Recurring Deposit",
        description: "Monthly bank deposits compounded quarterly",
        category: Category::Fixed,
        min_amount: 100.0,
        max_amount: None,
        rate: RatePolicy::Default(6.5),
        fixed_tenure: None,
        min_tenure: None,
        deposit_years: None,
        maturity_years: None,
    },
    SchemeDefinition {
        id: SchemeId::Mf,
        name: "Mutual Fund (Lumpsum)",
        description: "One-time investment into a mutual fund",
        category: Category::Market,
        min_amount: 1_000.0,
        max_amount: None,
        rate: RatePolicy::Default(12.0),
        fixed_tenure: None,
        min_tenure: None,
        deposit_years: None,
        maturity_years: None,
    },
    SchemeDefinition {
        id: SchemeId::Stock,
        name: "Stocks",
        description: "One-time investment into equities",
        category: Category::Market,
        min_amount: 100.0,
        max_amount: None,
        rate: RatePolicy::Default(15.0),
        fixed_tenure: None,
        min_tenure: None,
        deposit_years: None,
        maturity_years: None,
    },
    SchemeDefinition {
        id: SchemeId::Ppf,
        name: "Public Provident Fund",
        description: "Government-backed yearly deposits with tax-free returns",
        category: Category::Government,
        min_amount: 500.0,
        max_amount: Some(150_000.0),
        rate: RatePolicy::Fixed(7.1),
        fixed_tenure: None,
        min_tenure: Some(15.0),
        deposit_years: None,
        maturity_years: None,
    },
    SchemeDefinition {
        id: SchemeId::Scss,
        name: "Senior Citizens Savings Scheme",
        description: "Quarterly interest payouts for investors aged 60 and above",
        category: Category::Government,
        min_amount: 1_000.0,
        max_amount: Some(3_000_000.0),
        rate: RatePolicy::Fixed(8.2),
        fixed_tenure: Some(5.0),
        min_tenure: None,
        deposit_years: None,
        maturity_years: None,
    },
    SchemeDefinition {
        id: SchemeId::Kvp,
        name: "Kisan Vikas Patra",
        description: "Post office certificate that doubles the investment",
        category: Category::Government,
        min_amount: 1_000.0,
        max_amount: None,
        rate: RatePolicy::Fixed(7.5),
        fixed_tenure: Some(KVP_TENURE_MONTHS as f64 / 12.0),
        min_tenure: None,
        deposit_years: None,
        maturity_years: None,
    },
    SchemeDefinition {
        id: SchemeId::Nsc,
        name: "National Savings Certificate",
        description: "Five-year post office certificate compounded annually",
        category: Category::Government,
        min_amount: 1_000.0,
        max_amount: None,
        rate: RatePolicy::Fixed(7.7),
        fixed_tenure: Some(NSC_TENURE_YEARS as f64),
        min_tenure: None,
        deposit_years: None,
        maturity_years: None,
    },
    SchemeDefinition {
        id: SchemeId::Ssy,
        name: "Sukanya Samriddhi Yojana",
        description: "Savings scheme for a girl child with 15 years of deposits",
        category: Category::Government,
        min_amount: 250.0,
        max_amount: Some(150_000.0),
        rate: RatePolicy::Fixed(8.2),
        fixed_tenure: None,
        min_tenure: None,
        deposit_years: Some(SSY_DEPOSIT_YEARS),
        maturity_years: Some(21),
    },
    SchemeDefinition {
        id: SchemeId::Sb,
        name: "Savings Account",
        description: "Bank savings balance compounded quarterly",
        category: Category::Fixed,
        min_amount: 0.0,
        max_amount: None,
        rate: RatePolicy::Fixed(3.5),
        fixed_tenure: None,
        min_tenure: None,
        deposit_years: None,
        maturity_years: None,
    },
];

pub const KVP_TENURE_MONTHS: u32 = 115;
pub const KVP_TENURE_LABEL: &str = "115 months (9.6 years)";
pub const NSC_TENURE_YEARS: u32 = 5;
pub const SCSS_TENURE_YEARS: u32 = 5;
pub const SSY_DEPOSIT_YEARS: u32 = 15;

pub fn scheme(id: SchemeId) -> &'static SchemeDefinition {
    // SCHEMES is declared in SchemeId::ALL order.
    &SCHEMES[id as usize]
}

pub fn find_scheme(id: &str) -> Option<&'static SchemeDefinition> {
    id.parse::<SchemeId>().ok().map(scheme)
}

/// Statutory rate in percent, `None` for market-linked schemes.
pub fn fixed_rate(id: SchemeId) -> Option<f64> {
    scheme(id).fixed_rate()
}

/// Rate used when the caller supplies none: the statutory rate for
/// fixed-rate schemes, the suggested default otherwise.
pub fn effective_rate(id: SchemeId) -> f64 {
    scheme(id).rate.value()
}

/// `(scheme, rate)` for every government-backed scheme.
pub fn government_rates() -> impl Iterator<Item = (SchemeId, f64)> {
    SCHEMES
        .iter()
        .filter(|s| s.category == Category::Government)
        .filter_map(|s| s.fixed_rate().map(|rate| (s.id, rate)))
}
