// tests/analytic_test.rs
use approx::assert_relative_eq;
use lookback_mc::analytics::continuity_correction::{
    discrete_fixed_strike_call, discrete_fixed_strike_put, discrete_floating_strike_call,
    discrete_floating_strike_put,
};
use lookback_mc::analytics::lookback_analytic::{
    fixed_strike_call, fixed_strike_put, floating_strike_call, floating_strike_put,
    ZERO_RATE_THRESHOLD,
};
use proptest::prelude::*;

const S0: f64 = 100.0;
const R: f64 = 0.1;
const SIGMA: f64 = 0.3;
const T: f64 = 0.5;
const K: f64 = 100.0;

fn all_prices(spot: f64, rate: f64, volatility: f64, maturity: f64, strike: f64) -> [f64; 4] {
    [
        floating_strike_call(spot, rate, volatility, maturity),
        floating_strike_put(spot, rate, volatility, maturity),
        fixed_strike_call(spot, rate, volatility, maturity, strike),
        fixed_strike_put(spot, rate, volatility, maturity, strike),
    ]
}

#[test]
fn test_fixed_strike_parity_identity() {
    // far strikes included: the identity is exact even where one leg is negative
    for &(spot, strike) in &[
        (100.0, 100.0),
        (100.0, 90.0),
        (100.0, 110.0),
        (80.0, 95.0),
        (100.0, 20.0),
        (100.0, 80.0),
        (100.0, 150.0),
        (100.0, 500.0),
    ] {
        let call = fixed_strike_call(spot, R, SIGMA, T, strike);
        let put = fixed_strike_put(spot, R, SIGMA, T, strike);

        let expected = floating_strike_put(spot.max(strike), R, SIGMA, T)
            - floating_strike_call(spot.min(strike), R, SIGMA, T)
            + 2.0 * spot
            - 2.0 * strike * (-R * T).exp();

        assert_relative_eq!(call - put, expected, epsilon = 1e-10);
    }
}

#[test]
fn test_far_strike_legs_are_not_floored() {
    // K = 500 call and K = 20 put sit far beyond the region where replication stays positive
    let call = fixed_strike_call(S0, R, SIGMA, T, 500.0);
    let put = fixed_strike_put(S0, R, SIGMA, T, 20.0);
    assert!(call < -290.0, "call {}", call);
    assert!(put < 0.0, "put {}", put);

    // the opposite legs are deep in the money and positive
    assert!(fixed_strike_put(S0, R, SIGMA, T, 500.0) > 390.0);
    assert!(fixed_strike_call(S0, R, SIGMA, T, 20.0) > 0.0);
}

#[test]
fn test_fixed_strike_moneyness() {
    // in-the-money at inception: 29.74 / 1.84; out-of-the-money: 12.25 / 22.67
    assert_relative_eq!(fixed_strike_call(S0, R, SIGMA, T, 90.0), 29.74190726282896, max_relative = 1e-9);
    assert_relative_eq!(fixed_strike_put(S0, R, SIGMA, T, 90.0), 1.84209161338282, max_relative = 1e-9);
    assert_relative_eq!(fixed_strike_call(S0, R, SIGMA, T, 110.0), 12.252574319603994, max_relative = 1e-9);
    assert_relative_eq!(fixed_strike_put(S0, R, SIGMA, T, 110.0), 22.67017381543249, max_relative = 1e-9);
}

#[test]
fn test_zero_rate_fixed_strike_values() {
    assert_relative_eq!(fixed_strike_call(S0, 0.0, SIGMA, T, K), 18.08240533352982, max_relative = 1e-9);
    assert_relative_eq!(fixed_strike_put(S0, 0.0, SIGMA, T, K), 15.83240533352982, max_relative = 1e-9);
}

#[test]
fn test_continuity_across_threshold_all_flavors() {
    for &sign in &[1.0, -1.0] {
        let inside = all_prices(S0, sign * ZERO_RATE_THRESHOLD * (1.0 - 1e-6), SIGMA, T, K);
        let outside = all_prices(S0, sign * ZERO_RATE_THRESHOLD * (1.0 + 1e-6), SIGMA, T, K);
        let at_zero = all_prices(S0, 0.0, SIGMA, T, K);

        for i in 0..4 {
            assert!(
                (inside[i] - outside[i]).abs() < 1e-5,
                "flavor {} jumps across the threshold: {} vs {}",
                i,
                inside[i],
                outside[i]
            );
            assert!((inside[i] - at_zero[i]).abs() < 1e-5);
        }
    }
}

#[test]
fn test_degenerate_inputs_all_flavors() {
    for &rate in &[-0.02, 0.0, 0.1] {
        assert_eq!(all_prices(S0, rate, SIGMA, 0.0, K), [0.0; 4]);
        assert_eq!(all_prices(S0, rate, 0.0, T, K), [0.0; 4]);
        assert_eq!(all_prices(S0, rate, -0.1, T, K), [0.0; 4]);
    }
}

#[test]
fn test_corrected_prices_converge_to_continuous() {
    let continuous = all_prices(S0, R, SIGMA, T, K);
    let corrected = |fixings: usize| {
        [
            discrete_floating_strike_call(S0, R, SIGMA, T, fixings),
            discrete_floating_strike_put(S0, R, SIGMA, T, fixings),
            discrete_fixed_strike_call(S0, R, SIGMA, T, K, fixings),
            discrete_fixed_strike_put(S0, R, SIGMA, T, K, fixings),
        ]
    };

    let coarse = corrected(12);
    let fine = corrected(1_000);
    let very_fine = corrected(10_000_000);

    for i in 0..4 {
        assert!(coarse[i] < fine[i] && fine[i] < continuous[i]);
        assert!(
            (very_fine[i] - continuous[i]).abs() < 0.01,
            "flavor {} has not converged: {} vs {}",
            i,
            very_fine[i],
            continuous[i]
        );
    }
}

#[test]
fn test_discrete_parity_approaches_continuous_parity() {
    let continuous_gap = fixed_strike_call(S0, R, SIGMA, T, K) - fixed_strike_put(S0, R, SIGMA, T, K);
    let gap_at = |fixings: usize| {
        discrete_fixed_strike_call(S0, R, SIGMA, T, K, fixings)
            - discrete_fixed_strike_put(S0, R, SIGMA, T, K, fixings)
            - continuous_gap
    };

    // the discrete identity is only asymptotic: the gap decays like 1/n
    let gaps: Vec<f64> = [10, 100, 1_000, 100_000].iter().map(|&n| gap_at(n)).collect();
    println!("discrete parity gaps: {:?}", gaps);

    assert!(gaps[0].abs() > 0.1);
    for pair in gaps.windows(2) {
        assert!(pair[1].abs() < pair[0].abs() / 5.0);
    }
    assert!(gaps[3].abs() < 1e-4);
}

proptest! {
    #[test]
    fn prop_prices_non_negative_and_finite(
        spot in 10.0f64..500.0,
        rate in -0.05f64..0.2,
        volatility in 0.05f64..1.0,
        maturity in 0.05f64..5.0,
        strike in 10.0f64..500.0,
        call_moneyness in 0.2f64..1.0,
        put_moneyness in 1.0f64..5.0,
    ) {
        for price in all_prices(spot, rate, volatility, maturity, strike) {
            prop_assert!(price.is_finite());
        }
        // fixed legs are unfloored: non-negative only with the strike on the near side of spot
        for price in [
            floating_strike_call(spot, rate, volatility, maturity),
            floating_strike_put(spot, rate, volatility, maturity),
            fixed_strike_call(spot, rate, volatility, maturity, call_moneyness * spot),
            fixed_strike_put(spot, rate, volatility, maturity, put_moneyness * spot),
        ] {
            prop_assert!(price >= 0.0);
        }
    }

    #[test]
    fn prop_corrected_prices_non_negative(
        spot in 10.0f64..500.0,
        rate in -0.05f64..0.1,
        volatility in 0.1f64..1.0,
        maturity in 0.05f64..2.0,
        call_moneyness in 0.2f64..1.0,
        put_moneyness in 1.0f64..5.0,
        fixings in 12usize..500,
    ) {
        for price in [
            discrete_floating_strike_call(spot, rate, volatility, maturity, fixings),
            discrete_floating_strike_put(spot, rate, volatility, maturity, fixings),
            discrete_fixed_strike_call(spot, rate, volatility, maturity, call_moneyness * spot, fixings),
            discrete_fixed_strike_put(spot, rate, volatility, maturity, put_moneyness * spot, fixings),
        ] {
            prop_assert!(price.is_finite() && price >= 0.0);
        }
    }

    #[test]
    fn prop_discrete_floating_below_continuous(
        spot in 10.0f64..500.0,
        rate in -0.05f64..0.15,
        volatility in 0.05f64..1.0,
        maturity in 0.05f64..5.0,
        fixings in 1usize..200,
    ) {
        let call = floating_strike_call(spot, rate, volatility, maturity);
        let put = floating_strike_put(spot, rate, volatility, maturity);
        let tol = 1e-9 * spot;

        prop_assert!(discrete_floating_strike_call(spot, rate, volatility, maturity, fixings) <= call + tol);
        prop_assert!(discrete_floating_strike_put(spot, rate, volatility, maturity, fixings) <= put + tol);
        prop_assert!(
            discrete_floating_strike_put(spot, rate, volatility, maturity, fixings)
                <= discrete_floating_strike_put(spot, rate, volatility, maturity, 2 * fixings) + tol
        );
    }
}
