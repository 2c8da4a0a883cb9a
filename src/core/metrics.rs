use super::numeric::round2;

/// Total gain over the life of the investment in percent, not annualised.
pub fn calculate_absolute_return(invested: f64, maturity: f64) -> f64 {
    if invested <= 0.0 {
        return 0.0;
    }
    round2((maturity - invested) / invested * 100.0)
}

/// Compound annual growth rate in percent.
///
/// A negative `final_value` has no real-valued CAGR; `powf` then yields NaN
/// and the NaN is returned as-is.
pub fn calculate_cagr(initial: f64, final_value: f64, years: f64) -> f64 {
    if initial <= 0.0 || years <= 0.0 {
        return 0.0;
    }
    round2(((final_value / initial).powf(1.0 / years) - 1.0) * 100.0)
}
