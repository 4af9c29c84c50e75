//! Closed-form financial calculators: loan amortization (EMI), compound
//! interest, systematic investment plans, and fixed deposits.
//!
//! All calculators are pure functions of their scalar inputs and recompute
//! the full breakdown on every call. A zero or negative required input
//! yields `None` rather than an error - the uniform validity guard across
//! the module.

/// One row of an amortization schedule
#[derive(Clone, Debug, PartialEq)]
pub struct LoanPayment {
    pub month: u32,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoanResult {
    pub emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub schedule: Vec<LoanPayment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompoundYear {
    pub year: u32,
    pub amount: f64,
    pub interest: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompoundResult {
    pub final_amount: f64,
    pub total_interest: f64,
    pub yearly_breakdown: Vec<CompoundYear>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SipYear {
    pub year: u32,
    pub invested: f64,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SipResult {
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
    pub yearly_breakdown: Vec<SipYear>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FdResult {
    pub maturity_amount: f64,
    pub interest_earned: f64,
}

/// Equated monthly installment and full amortization schedule.
///
/// `EMI = P * r * (1+r)^n / ((1+r)^n - 1)` with the monthly rate
/// `r = annual_rate / 100 / 12`. Per-month principal and the running
/// balance are clamped at zero so floating-point drift never leaves a
/// negative residue in the last row.
pub fn loan_schedule(principal: f64, annual_rate: f64, months: u32) -> Option<LoanResult> {
    let p = principal;
    let r = annual_rate / 100.0 / 12.0;
    let n = months;

    if p <= 0.0 || r <= 0.0 || n == 0 {
        return None;
    }

    let growth = (1.0 + r).powi(n as i32);
    let emi = p * r * growth / (growth - 1.0);
    let total_payment = emi * f64::from(n);
    let total_interest = total_payment - p;

    let mut schedule = Vec::with_capacity(n as usize);
    let mut balance = p;
    for month in 1..=n {
        let interest = balance * r;
        let principal_part = emi - interest;
        balance -= principal_part;

        schedule.push(LoanPayment {
            month,
            principal: principal_part.max(0.0),
            interest,
            balance: balance.max(0.0),
        });
    }

    Some(LoanResult {
        emi,
        total_payment,
        total_interest,
        schedule,
    })
}

/// Compound interest: `A = P * (1 + r/n)^(n*t)` with a per-elapsed-year
/// breakdown computed by the same formula
pub fn compound_interest(
    principal: f64,
    annual_rate: f64,
    years: u32,
    periods_per_year: u32,
) -> Option<CompoundResult> {
    let p = principal;
    let r = annual_rate / 100.0;
    let t = years;
    let n = periods_per_year;

    if p <= 0.0 || r <= 0.0 || t == 0 || n == 0 {
        return None;
    }

    let rate_per_period = r / f64::from(n);
    let final_amount = p * (1.0 + rate_per_period).powi((n * t) as i32);
    let total_interest = final_amount - p;

    let mut yearly_breakdown = Vec::with_capacity(t as usize);
    for year in 1..=t {
        let amount = p * (1.0 + rate_per_period).powi((n * year) as i32);
        yearly_breakdown.push(CompoundYear {
            year,
            amount,
            interest: amount - p,
        });
    }

    Some(CompoundResult {
        final_amount,
        total_interest,
        yearly_breakdown,
    })
}

/// Future value of a recurring monthly investment (annuity-due variant):
/// `FV = P * ((1+r)^m - 1) / r * (1+r)` over `m = 12 * years` months
pub fn sip_future_value(monthly: f64, annual_rate: f64, years: u32) -> Option<SipResult> {
    let p = monthly;
    let r = annual_rate / 100.0 / 12.0;
    let months = years * 12;

    if p <= 0.0 || r <= 0.0 || months == 0 {
        return None;
    }

    let fv = |m: u32| p * (((1.0 + r).powi(m as i32) - 1.0) / r) * (1.0 + r);

    let total_value = fv(months);
    let invested_amount = p * f64::from(months);
    let estimated_returns = total_value - invested_amount;

    let mut yearly_breakdown = Vec::with_capacity(years as usize);
    for year in 1..=years {
        let elapsed = year * 12;
        yearly_breakdown.push(SipYear {
            year,
            invested: p * f64::from(elapsed),
            value: fv(elapsed),
        });
    }

    Some(SipResult {
        invested_amount,
        estimated_returns,
        total_value,
        yearly_breakdown,
    })
}

/// Fixed-deposit maturity with quarterly compounding over a term given in
/// months
pub fn fixed_deposit(principal: f64, annual_rate: f64, months: u32) -> Option<FdResult> {
    let p = principal;
    let r = annual_rate / 100.0;
    let t = f64::from(months) / 12.0;
    let n = 4.0; // quarterly

    if p <= 0.0 || r <= 0.0 || months == 0 {
        return None;
    }

    let maturity_amount = p * (1.0 + r / n).powf(n * t);
    Some(FdResult {
        maturity_amount,
        interest_earned: maturity_amount - p,
    })
}
