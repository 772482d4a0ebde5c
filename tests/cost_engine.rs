//! 보증 비용 계산 엔진 회귀/속성 테스트.
use proptest::prelude::*;
use rent_guarantee_calculator::{
    compute, compute_raw, ContractInput, InterestLabel, PlanId, RateTable,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn input(duration_months: i64, rent: f64, expenses: f64) -> ContractInput {
    ContractInput {
        duration_months,
        rent,
        expenses,
    }
}

#[test]
fn default_rates_scenario() {
    let r = compute(&input(24, 250000.0, 50000.0), &RateTable::with_defaults());
    assert!(close(r.total, 504000.0), "total={}", r.total);
    assert!(close(r.upfront, 403200.0), "upfront={}", r.upfront);

    let three = r.plan(PlanId::Three).expect("three");
    let six = r.plan(PlanId::Six).expect("six");
    let twelve = r.plan(PlanId::Twelve).expect("twelve");
    assert!(close(three.amount, 180768.0), "three={}", three.amount);
    assert!(close(six.amount, 95256.0), "six={}", six.amount);
    assert!(close(twelve.amount, 52710.0), "twelve={}", twelve.amount);

    assert_eq!(three.label, InterestLabel::Interest(7.6));
    assert_eq!(six.label, InterestLabel::Interest(13.5));
    assert_eq!(twelve.label, InterestLabel::Interest(25.5));
    assert_eq!(
        r.plans.map(|q| q.installments),
        [3, 6, 12],
        "plans stay in display order"
    );
}

#[test]
fn default_input_matches_widget_start_values() {
    let r = compute(&ContractInput::default(), &RateTable::with_defaults());
    assert!(close(r.total, 504000.0));
}

#[test]
fn zero_or_unparsable_duration_zeroes_everything() {
    for duration in ["0", "", "meses", "-", "0x10"] {
        let r = compute_raw(duration, "250000", "50000", &RateTable::with_defaults());
        assert_eq!(r.total, 0.0, "duration={duration:?}");
        assert_eq!(r.upfront, 0.0);
        assert!(r.plans.iter().all(|q| q.amount == 0.0));
    }
}

#[test]
fn empty_and_garbage_amounts_zero_out() {
    let rates = RateTable::with_defaults();
    for (rent, expenses) in [("", ""), ("abc", "xyz"), ("$100", "NaN"), ("inf", "-inf")] {
        let r = compute_raw("24", rent, expenses, &rates);
        assert_eq!(r.total, 0.0, "rent={rent:?} expenses={expenses:?}");
        assert!(r.plans.iter().all(|q| q.amount == 0.0));
    }
}

#[test]
fn one_valid_amount_still_counts() {
    let r = compute_raw("12", "100000", "", &RateTable::with_defaults());
    assert!(close(r.total, 100000.0 * 12.0 * 0.07));
}

#[test]
fn unit_rate_means_no_interest_and_exact_split() {
    let rates = RateTable::with_defaults().with(PlanId::Six, 1.0);
    let r = compute(&input(36, 180000.0, 20000.0), &rates);
    let six = r.plan(PlanId::Six).expect("six");
    assert_eq!(six.label, InterestLabel::NoInterest);
    assert_eq!(six.amount, r.total / 6.0);
}

#[test]
fn missing_plan_rate_defaults_to_one() {
    let rates = RateTable::empty().with(PlanId::Three, 1.2);
    let r = compute(&input(24, 250000.0, 50000.0), &rates);
    let twelve = r.plan(PlanId::Twelve).expect("twelve");
    assert_eq!(twelve.rate, 1.0);
    assert_eq!(twelve.label, InterestLabel::NoInterest);
    assert_eq!(twelve.amount, r.total / 12.0);
    assert_eq!(r.plan(PlanId::Three).map(|q| q.label), Some(InterestLabel::Interest(20.0)));
}

#[test]
fn engine_does_not_clamp_duration() {
    let rates = RateTable::with_defaults();
    let short = compute(&input(1, 1000.0, 0.0), &rates);
    let long = compute(&input(120, 1000.0, 0.0), &rates);
    assert!(close(short.total, 70.0));
    assert!(close(long.total, 8400.0));
}

#[test]
fn overflowing_inputs_stay_finite() {
    let r = compute(&input(i64::MAX, f64::MAX, f64::MAX), &RateTable::with_defaults());
    assert!(r.total.is_finite());
    assert!(r.upfront.is_finite());
    assert!(r.plans.iter().all(|q| q.amount.is_finite()));
}

proptest! {
    #[test]
    fn total_and_upfront_follow_formula(
        rent in 0.0f64..1e9,
        expenses in 0.0f64..1e9,
        duration in 1i64..=120,
    ) {
        let r = compute(&input(duration, rent, expenses), &RateTable::with_defaults());
        prop_assert_eq!(r.total, (rent + expenses) * duration as f64 * 0.07);
        prop_assert_eq!(r.upfront, 0.80 * r.total);
    }

    #[test]
    fn plan_amounts_follow_rates(
        rent in 0.0f64..1e9,
        expenses in 0.0f64..1e9,
        duration in 1i64..=120,
        three in 1.0f64..2.0,
        six in 1.0f64..2.0,
        twelve in 1.0f64..2.0,
    ) {
        let rates = RateTable::empty()
            .with(PlanId::Three, three)
            .with(PlanId::Six, six)
            .with(PlanId::Twelve, twelve);
        let r = compute(&input(duration, rent, expenses), &rates);
        for q in &r.plans {
            let n = f64::from(q.plan.installments());
            prop_assert_eq!(q.amount, r.total * rates.rate(q.plan) / n);
        }
    }

    #[test]
    fn identical_inputs_give_bit_identical_results(
        duration in ".{0,8}",
        rent in ".{0,12}",
        expenses in ".{0,12}",
    ) {
        let rates = RateTable::with_defaults();
        let a = compute_raw(&duration, &rent, &expenses, &rates);
        let b = compute_raw(&duration, &rent, &expenses, &rates);
        prop_assert_eq!(a.total.to_bits(), b.total.to_bits());
        prop_assert_eq!(a.upfront.to_bits(), b.upfront.to_bits());
        for (qa, qb) in a.plans.iter().zip(b.plans.iter()) {
            prop_assert_eq!(qa.amount.to_bits(), qb.amount.to_bits());
        }
        prop_assert!(a.total.is_finite());
    }
}
