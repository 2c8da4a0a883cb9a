use tracing::debug;

use super::calculators::DEFAULT_FD_COMPOUNDING;
use super::error::{CalcError, CalcResult};
use super::schemes::scheme;
use super::types::{RatePolicy, ResolvedInputs, SchemeId, SchemeInputs};

const MAX_COMPOUNDING_FREQUENCY: u32 = 365;
const WHOLE_TOLERANCE: f64 = 1e-9;

/// Longest tenure accepted for schemes without a statutory maturity.
pub const MAX_TENURE_YEARS: f64 = 100.0;

/// Checks `inputs` against the scheme's rules and resolves defaults. The
/// calculators are only reached with values that passed this gate.
pub fn validate(id: SchemeId, inputs: &SchemeInputs) -> CalcResult<ResolvedInputs> {
    let definition = scheme(id);

    let (field, amount) = id.amount_input(inputs);
    let amount = amount.ok_or(CalcError::MissingInput { scheme: id, field })?;
    require_finite(field, amount)?;
    if amount < definition.min_amount {
        return Err(CalcError::BelowMinimum {
            scheme: id,
            amount,
            min: definition.min_amount,
        });
    }
    if let Some(max) = definition.max_amount {
        if amount > max {
            return Err(CalcError::AboveMaximum {
                scheme: id,
                amount,
                max,
            });
        }
    }

    let years = if id.uses_years() {
        let years = inputs.years.ok_or(CalcError::MissingInput {
            scheme: id,
            field: "years",
        })?;
        require_positive("years", years)?;
        validate_tenure(id, years)?
    } else {
        definition.fixed_tenure.unwrap_or_default()
    };

    let rate = match definition.rate {
        RatePolicy::Default(default) => {
            let rate = inputs.rate.unwrap_or(default);
            require_positive("rate", rate)?;
            rate
        }
        RatePolicy::Fixed(fixed) => {
            if let Some(supplied) = inputs.rate {
                if supplied != fixed {
                    debug!(scheme = %id, supplied, fixed, "ignoring caller rate for fixed-rate scheme");
                }
            }
            fixed
        }
    };

    let compounding_frequency = inputs
        .compounding_frequency
        .unwrap_or(DEFAULT_FD_COMPOUNDING);
    if id == SchemeId::Fd && !(1..=MAX_COMPOUNDING_FREQUENCY).contains(&compounding_frequency) {
        return Err(CalcError::InvalidFrequency(compounding_frequency));
    }

    Ok(ResolvedInputs {
        amount,
        rate,
        years,
        compounding_frequency,
    })
}

/// Returns the tenure snapped to the period the scheme counts in, so the
/// calculators see exact whole years or months.
fn validate_tenure(id: SchemeId, years: f64) -> CalcResult<f64> {
    let definition = scheme(id);
    let max = definition
        .maturity_years
        .map_or(MAX_TENURE_YEARS, |maturity| maturity as f64);
    if years > max {
        return Err(CalcError::TenureTooLong {
            scheme: id,
            years,
            max,
        });
    }

    let snapped = match id {
        SchemeId::Ppf | SchemeId::Ssy => {
            if !is_whole(years) {
                return Err(CalcError::WholeYears { scheme: id, years });
            }
            years.round()
        }
        SchemeId::Rd => {
            let months = years * 12.0;
            if !is_whole(months) || months.round() < 1.0 {
                return Err(CalcError::WholeMonths { scheme: id, years });
            }
            months.round() / 12.0
        }
        _ => years,
    };

    if let Some(min) = definition.min_tenure {
        if snapped < min {
            return Err(CalcError::TenureTooShort {
                scheme: id,
                years,
                min,
            });
        }
    }
    Ok(snapped)
}

fn require_finite(field: &'static str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::NonFinite { field, value })
    }
}

fn require_positive(field: &'static str, value: f64) -> CalcResult<()> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::NonPositive { field, value })
    }
}

fn is_whole(value: f64) -> bool {
    (value - value.round()).abs() < WHOLE_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sip_inputs() -> SchemeInputs {
        SchemeInputs {
            monthly_investment: Some(5_000.0),
            rate: Some(12.0),
            years: Some(10.0),
            ..SchemeInputs::default()
        }
    }

    #[test]
    fn validate_resolves_sip_inputs() {
        let resolved = validate(SchemeId::Sip, &sip_inputs()).expect("valid inputs");
        assert_eq!(resolved.amount, 5_000.0);
        assert_eq!(resolved.rate, 12.0);
        assert_eq!(resolved.years, 10.0);
    }

    #[test]
    fn validate_defaults_market_rate_from_catalog() {
        let mut inputs = sip_inputs();
        inputs.rate = None;
        let resolved = validate(SchemeId::Sip, &inputs).expect("valid inputs");
        assert_eq!(resolved.rate, 12.0);
    }

    #[test]
    fn validate_uses_statutory_rate_for_fixed_schemes() {
        let inputs = SchemeInputs {
            yearly_deposit: Some(100_000.0),
            rate: Some(20.0),
            years: Some(15.0),
            ..SchemeInputs::default()
        };
        let resolved = validate(SchemeId::Ppf, &inputs).expect("valid inputs");
        assert_eq!(resolved.rate, 7.1);
    }

    #[test]
    fn validate_reports_missing_amount_field() {
        let err = validate(SchemeId::Rd, &sip_inputs()).expect_err("rd needs monthly deposit");
        assert_eq!(
            err,
            CalcError::MissingInput {
                scheme: SchemeId::Rd,
                field: "monthlyDeposit"
            }
        );
    }

    #[test]
    fn validate_rejects_amounts_outside_scheme_limits() {
        let mut inputs = sip_inputs();
        inputs.monthly_investment = Some(100.0);
        let err = validate(SchemeId::Sip, &inputs).expect_err("below minimum");
        assert!(matches!(err, CalcError::BelowMinimum { min, .. } if min == 500.0));

        let ppf = SchemeInputs {
            yearly_deposit: Some(150_001.0),
            years: Some(15.0),
            ..SchemeInputs::default()
        };
        let err = validate(SchemeId::Ppf, &ppf).expect_err("above maximum");
        assert!(matches!(err, CalcError::AboveMaximum { max, .. } if max == 150_000.0));
    }

    #[test]
    fn validate_accepts_amounts_on_the_limits() {
        let ppf = SchemeInputs {
            yearly_deposit: Some(150_000.0),
            years: Some(15.0),
            ..SchemeInputs::default()
        };
        assert!(validate(SchemeId::Ppf, &ppf).is_ok());

        let mut sip = sip_inputs();
        sip.monthly_investment = Some(500.0);
        assert!(validate(SchemeId::Sip, &sip).is_ok());
    }

    #[test]
    fn validate_rejects_non_finite_and_non_positive_values() {
        let mut inputs = sip_inputs();
        inputs.monthly_investment = Some(f64::NAN);
        assert!(matches!(
            validate(SchemeId::Sip, &inputs),
            Err(CalcError::NonFinite { field: "monthlyInvestment", .. })
        ));

        let mut inputs = sip_inputs();
        inputs.years = Some(0.0);
        assert!(matches!(
            validate(SchemeId::Sip, &inputs),
            Err(CalcError::NonPositive { field: "years", .. })
        ));

        let mut inputs = sip_inputs();
        inputs.rate = Some(-1.0);
        assert!(matches!(
            validate(SchemeId::Sip, &inputs),
            Err(CalcError::NonPositive { field: "rate", .. })
        ));

        let mut inputs = sip_inputs();
        inputs.rate = Some(f64::INFINITY);
        assert!(matches!(
            validate(SchemeId::Sip, &inputs),
            Err(CalcError::NonFinite { field: "rate", .. })
        ));
    }

    #[test]
    fn validate_requires_whole_periods_for_recurring_schemes() {
        let ssy = SchemeInputs {
            yearly_deposit: Some(1_000.0),
            years: Some(15.5),
            ..SchemeInputs::default()
        };
        assert!(matches!(
            validate(SchemeId::Ssy, &ssy),
            Err(CalcError::WholeYears { .. })
        ));

        let rd = SchemeInputs {
            monthly_deposit: Some(1_000.0),
            years: Some(1.01),
            ..SchemeInputs::default()
        };
        assert!(matches!(
            validate(SchemeId::Rd, &rd),
            Err(CalcError::WholeMonths { .. })
        ));

        let rd_half_year = SchemeInputs {
            years: Some(0.5),
            ..rd
        };
        assert!(validate(SchemeId::Rd, &rd_half_year).is_ok());
    }

    #[test]
    fn validate_enforces_minimum_tenure() {
        let ppf = SchemeInputs {
            yearly_deposit: Some(1_000.0),
            years: Some(10.0),
            ..SchemeInputs::default()
        };
        assert!(matches!(
            validate(SchemeId::Ppf, &ppf),
            Err(CalcError::TenureTooShort { min, .. }) if min == 15.0
        ));
    }

    #[test]
    fn validate_fills_fixed_tenure_for_certificates() {
        let nsc = SchemeInputs {
            principal: Some(10_000.0),
            ..SchemeInputs::default()
        };
        let resolved = validate(SchemeId::Nsc, &nsc).expect("years not needed");
        assert_eq!(resolved.years, 5.0);
    }

    #[test]
    fn validate_rejects_bad_compounding_frequency() {
        let fd = SchemeInputs {
            principal: Some(10_000.0),
            years: Some(1.0),
            compounding_frequency: Some(0),
            ..SchemeInputs::default()
        };
        assert_eq!(
            validate(SchemeId::Fd, &fd),
            Err(CalcError::InvalidFrequency(0))
        );
    }

    #[test]
    fn validate_snaps_near_whole_tenures_to_the_counted_period() {
        let ppf = SchemeInputs {
            yearly_deposit: Some(100_000.0),
            years: Some(15.0 + 1e-10),
            ..SchemeInputs::default()
        };
        assert_eq!(validate(SchemeId::Ppf, &ppf).expect("whole years").years, 15.0);

        let rd = SchemeInputs {
            monthly_deposit: Some(1_000.0),
            rate: Some(7.0),
            years: Some(1.0 - 1e-12),
            ..SchemeInputs::default()
        };
        assert_eq!(validate(SchemeId::Rd, &rd).expect("whole months").years, 1.0);
    }

    #[test]
    fn validate_keeps_every_whole_month_exact() {
        for months in 1..=(MAX_TENURE_YEARS as u32 * 12) {
            let rd = SchemeInputs {
                monthly_deposit: Some(1_000.0),
                years: Some(months as f64 / 12.0),
                ..SchemeInputs::default()
            };
            let years = validate(SchemeId::Rd, &rd).expect("whole months").years;
            assert_eq!((years * 12.0).floor(), months as f64);
        }
    }

    #[test]
    fn validate_rejects_tenures_beyond_maturity() {
        let mut sip = sip_inputs();
        sip.years = Some(1e6);
        assert!(matches!(
            validate(SchemeId::Sip, &sip),
            Err(CalcError::TenureTooLong { max, .. }) if max == MAX_TENURE_YEARS
        ));
        sip.years = Some(MAX_TENURE_YEARS);
        assert!(validate(SchemeId::Sip, &sip).is_ok());

        let ssy = SchemeInputs {
            yearly_deposit: Some(1_000.0),
            years: Some(1e12),
            ..SchemeInputs::default()
        };
        assert!(matches!(
            validate(SchemeId::Ssy, &ssy),
            Err(CalcError::TenureTooLong { max, .. }) if max == 21.0
        ));
        let ssy_at_maturity = SchemeInputs {
            years: Some(21.0),
            ..ssy
        };
        assert!(validate(SchemeId::Ssy, &ssy_at_maturity).is_ok());
    }
}
