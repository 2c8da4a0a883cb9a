//! One pure function per product. Rates are annual percentages, amounts are
//! rupees. Nothing here validates its inputs; see [`super::validation`].

use super::metrics::calculate_absolute_return;
use super::numeric::{round2, round_int};
use super::schemes::{
    KVP_TENURE_LABEL, NSC_TENURE_YEARS, SCSS_TENURE_YEARS, SSY_DEPOSIT_YEARS, effective_rate,
};
use super::types::{CalculationResult, SchemeId};

pub const DEFAULT_FD_COMPOUNDING: u32 = 4;

/// Monthly contributions made at the start of each month (annuity due).
pub fn calculate_sip(monthly_investment: f64, rate: f64, years: f64) -> CalculationResult {
    let months = years * 12.0;
    let monthly_rate = rate / 12.0 / 100.0;
    let future_value = monthly_investment
        * (((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate)
        * (1.0 + monthly_rate);
    let total_invested = monthly_investment * months;

    CalculationResult::from_amounts(total_invested, future_value).with_absolute_return()
}

pub fn calculate_fd(
    principal: f64,
    rate: f64,
    years: f64,
    compounding_frequency: u32,
) -> CalculationResult {
    let frequency = compounding_frequency as f64;
    let maturity = principal * (1.0 + rate / 100.0 / frequency).powf(frequency * years);
    CalculationResult::from_amounts(principal, maturity)
}

/// Each monthly deposit earns quarterly compounding for the whole quarters
/// left until maturity, counting a partial quarter as a full one.
pub fn calculate_rd(monthly_deposit: f64, rate: f64, years: f64) -> CalculationResult {
    let months = years * 12.0;
    let quarterly_rate = rate / 400.0;
    let deposits = months.floor().max(0.0) as u32;

    let maturity: f64 = (1..=deposits)
        .map(|month| {
            let quarters_remaining = ((months - month as f64 + 1.0) / 3.0).ceil();
            monthly_deposit * (1.0 + quarterly_rate).powf(quarters_remaining)
        })
        .sum();

    CalculationResult::from_amounts(monthly_deposit * months, maturity)
}

/// One-time investment in a mutual fund or stock. The growth rate is the
/// CAGR by construction.
pub fn calculate_lumpsum(principal: f64, rate: f64, years: f64) -> CalculationResult {
    let maturity = principal * (1.0 + rate / 100.0).powf(years);
    let mut result = CalculationResult::from_amounts(principal, maturity).with_absolute_return();
    result.cagr = Some(round2(rate));
    result
}

/// Deposit at the start of each year, then a full year of compounding.
pub fn calculate_ppf(yearly_deposit: f64, years: u32) -> CalculationResult {
    let growth = 1.0 + effective_rate(SchemeId::Ppf) / 100.0;
    let balance = deposit_then_compound(0.0, yearly_deposit, growth, years);
    CalculationResult::from_amounts(yearly_deposit * years as f64, balance)
}

/// Simple quarterly interest over the fixed tenure; the principal does not
/// compound.
pub fn calculate_scss(principal: f64) -> CalculationResult {
    let rate = effective_rate(SchemeId::Scss) / 100.0;
    let quarterly_interest = principal * rate / 4.0;
    let total_interest = quarterly_interest * 4.0 * SCSS_TENURE_YEARS as f64;

    let mut result = CalculationResult::from_amounts(principal, principal + total_interest);
    result.quarterly_interest = Some(round_int(quarterly_interest));
    result
}

/// Doubles the principal over the statutory tenure regardless of rate.
pub fn calculate_kvp(principal: f64) -> CalculationResult {
    let mut result = CalculationResult::from_amounts(principal, principal * 2.0);
    result.tenure = Some(KVP_TENURE_LABEL.to_string());
    result
}

pub fn calculate_nsc(principal: f64) -> CalculationResult {
    let growth = 1.0 + effective_rate(SchemeId::Nsc) / 100.0;
    let maturity = principal * growth.powi(NSC_TENURE_YEARS as i32);
    CalculationResult::from_amounts(principal, maturity)
}

/// Deposits run for at most fifteen years; any later years up to `years`
/// compound the balance without new money.
pub fn calculate_ssy(yearly_deposit: f64, years: u32) -> CalculationResult {
    let growth = 1.0 + effective_rate(SchemeId::Ssy) / 100.0;
    let deposit_years = years.min(SSY_DEPOSIT_YEARS);

    let mut balance = deposit_then_compound(0.0, yearly_deposit, growth, deposit_years);
    for _ in deposit_years..years {
        balance *= growth;
    }

    CalculationResult::from_amounts(yearly_deposit * deposit_years as f64, balance)
}

pub fn calculate_savings(principal: f64, years: f64) -> CalculationResult {
    let quarterly_rate = effective_rate(SchemeId::Sb) / 100.0 / 4.0;
    let maturity = principal * (1.0 + quarterly_rate).powf(4.0 * years);
    CalculationResult::from_amounts(principal, maturity)
}

fn deposit_then_compound(opening: f64, deposit: f64, growth: f64, years: u32) -> f64 {
    (0..years).fold(opening, |balance, _| (balance + deposit) * growth)
}

/// Share of the investment gained, recomputed from a finished result.
pub fn implied_absolute_return(result: &CalculationResult) -> f64 {
    calculate_absolute_return(result.total_invested as f64, result.maturity_amount as f64)
}
