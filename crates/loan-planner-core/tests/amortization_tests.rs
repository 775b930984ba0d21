use loan_planner_core::amortization::schedule::{
    build_schedule, monthly_payment, payment_breakdown,
};
use loan_planner_core::amortization::summary::{summarize_schedule, SummaryInterval};
use loan_planner_core::LoanPlannerError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Schedule construction tests
// ===========================================================================

#[test]
fn test_reference_mortgage_schedule() {
    // 100k at 5% over 20 years: payment 659.96, 240 periods, closes at zero.
    let schedule = build_schedule(dec!(100_000), dec!(0.05), 20).unwrap();

    assert_eq!(schedule.term_months, 240);
    assert_eq!(schedule.periods.len(), 240);
    assert!((schedule.monthly_payment - dec!(659.96)).abs() < dec!(0.01));
    assert_eq!(schedule.periods[239].remaining_balance, Decimal::ZERO);

    // First month: interest = 100000 * 0.05/12 = 416.67
    let first = &schedule.periods[0];
    assert!((first.interest - dec!(416.67)).abs() < dec!(0.01));
    assert_eq!(first.payment, schedule.monthly_payment);
}

#[test]
fn test_each_period_payment_splits_exactly() {
    let schedule = build_schedule(dec!(75_000), dec!(0.04), 15).unwrap();
    for p in &schedule.periods {
        assert_eq!(p.payment, p.principal + p.interest, "period {}", p.period);
    }
}

#[test]
fn test_schedule_conserves_principal() {
    let schedule = build_schedule(dec!(75_000), dec!(0.04), 15).unwrap();
    let principal_sum: Decimal = schedule.periods.iter().map(|p| p.principal).sum();
    assert!((principal_sum - dec!(75_000)).abs() < dec!(0.0001));
}

#[test]
fn test_balance_never_negative_and_never_rises() {
    let schedule = build_schedule(dec!(20_000), dec!(0.07), 7).unwrap();
    let mut previous = schedule.principal;
    for p in &schedule.periods {
        assert!(p.remaining_balance >= Decimal::ZERO);
        assert!(p.remaining_balance <= previous);
        previous = p.remaining_balance;
    }
}

#[test]
fn test_zero_rate_loan_has_no_interest() {
    let schedule = build_schedule(dec!(24_000), Decimal::ZERO, 2).unwrap();
    assert_eq!(schedule.monthly_payment, dec!(1000));
    assert_eq!(schedule.total_interest, Decimal::ZERO);
    assert!(schedule.periods.iter().all(|p| p.interest.is_zero()));
}

#[test]
fn test_degenerate_inputs_yield_empty_schedule_not_error() {
    let zero_principal = build_schedule(Decimal::ZERO, dec!(0.05), 10).unwrap();
    assert!(zero_principal.periods.is_empty());
    assert_eq!(zero_principal.total_payments, Decimal::ZERO);

    let negative = build_schedule(dec!(-1000), dec!(0.05), 10).unwrap();
    assert!(negative.periods.is_empty());

    let zero_term = build_schedule(dec!(100_000), dec!(0.05), 0).unwrap();
    assert!(zero_term.periods.is_empty());
}

#[test]
fn test_invalid_rate_is_rejected() {
    let err = build_schedule(dec!(100_000), dec!(-1), 10).unwrap_err();
    match err {
        LoanPlannerError::InvalidInput { field, .. } => assert_eq!(field, "annual_rate"),
    }
}

#[test]
fn test_standalone_payment_matches_schedule_payment() {
    let schedule = build_schedule(dec!(60_000), dec!(0.045), 12).unwrap();
    let payment = monthly_payment(dec!(60_000), dec!(0.045), 12).unwrap();
    assert_eq!(payment, schedule.monthly_payment);
}

// ===========================================================================
// Breakdown tests
// ===========================================================================

#[test]
fn test_breakdown_percentages_sum_to_100() {
    let schedule = build_schedule(dec!(100_000), dec!(0.05), 20).unwrap();

    for period in [1, 120, 240] {
        let b = payment_breakdown(&schedule, period);
        assert!((b.principal_pct + b.interest_pct - dec!(100)).abs() < dec!(0.0001));
    }
}

#[test]
fn test_breakdown_shifts_toward_principal_over_time() {
    let schedule = build_schedule(dec!(100_000), dec!(0.05), 20).unwrap();
    let early = payment_breakdown(&schedule, 1);
    let late = payment_breakdown(&schedule, 240);

    assert!(early.interest_pct > early.principal_pct);
    assert!(late.principal_pct > late.interest_pct);
    assert_eq!(late.remaining_balance, Decimal::ZERO);
}

#[test]
fn test_breakdown_out_of_range_zero_filled() {
    let schedule = build_schedule(dec!(100_000), dec!(0.05), 20).unwrap();

    let past = payment_breakdown(&schedule, 500);
    assert_eq!(past.period, 500);
    assert_eq!(past.payment, Decimal::ZERO);

    let zero = payment_breakdown(&schedule, 0);
    assert_eq!(zero.period, 0);
    assert_eq!(zero.principal, Decimal::ZERO);
}

// ===========================================================================
// Summary tests
// ===========================================================================

#[test]
fn test_yearly_summary_of_reference_schedule() {
    let schedule = build_schedule(dec!(100_000), dec!(0.05), 20).unwrap();
    let points = summarize_schedule(&schedule, SummaryInterval::Yearly);

    assert_eq!(points.len(), 20);
    assert_eq!(points[0].label, "Year 1");
    assert_eq!(points[19].label, "Year 20");
    assert_eq!(points[19].remaining_balance, Decimal::ZERO);

    // Yearly principal contributions cover the whole loan.
    let total: Decimal = points.iter().map(|p| p.principal_paid).sum();
    assert!((total - dec!(100_000)).abs() < dec!(0.01));

    // Cumulative interest at the final point equals the schedule total.
    assert!(
        (points[19].cumulative_interest - schedule.total_interest).abs() < dec!(1),
        "cumulative interest should converge on total interest"
    );
}

#[test]
fn test_quarterly_summary_shape() {
    let schedule = build_schedule(dec!(30_000), dec!(0.06), 3).unwrap();
    let points = summarize_schedule(&schedule, SummaryInterval::Quarterly);

    assert_eq!(points.len(), 12);
    assert_eq!(points[0].label, "Q1");
    assert_eq!(points[0].period_end, 3);
    assert_eq!(points[11].label, "Q12");
    assert_eq!(points[11].period_end, 36);
}

#[test]
fn test_monthly_summary_is_one_to_one() {
    let schedule = build_schedule(dec!(10_000), dec!(0.05), 2).unwrap();
    let points = summarize_schedule(&schedule, SummaryInterval::Monthly);

    assert_eq!(points.len(), schedule.periods.len());
    for (point, period) in points.iter().zip(&schedule.periods) {
        assert_eq!(point.period_end, period.period);
        assert_eq!(point.principal_paid, period.principal);
        assert_eq!(point.interest_paid, period.interest);
    }
}

#[test]
fn test_empty_schedule_yields_empty_summary() {
    let schedule = build_schedule(Decimal::ZERO, dec!(0.05), 10).unwrap();
    assert!(summarize_schedule(&schedule, SummaryInterval::Monthly).is_empty());
    assert!(summarize_schedule(&schedule, SummaryInterval::Yearly).is_empty());
}
