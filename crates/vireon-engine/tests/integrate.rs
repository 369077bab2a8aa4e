//! End-to-end integration behaviour for both model variants.

use proptest::prelude::*;
use vireon_core::{all_finite, GrayScottConfig, GridConfig, ModelConfig, ModelKind, SqkConfig};
use vireon_engine::{integrate, run_gray_scott, run_sqk, RunStatus};
use vireon_test_utils::{tiny_grid, tiny_gray_scott, tiny_sqk};

fn stiff_sqk() -> SqkConfig {
    // Diffusion number Dy·dt/dx² ≈ 15 and strong quadratic gain.
    SqkConfig::builder()
        .grid(tiny_grid(10.0, 5000.0, 5))
        .gains(5.0, 5.0, 5.0)
        .build()
        .unwrap()
}

#[test]
fn runs_are_bit_identical_per_seed() {
    for cfg in [ModelConfig::from(tiny_sqk()), tiny_gray_scott().into()] {
        let a = integrate(&cfg, 42);
        let b = integrate(&cfg, 42);
        assert_eq!(a.final_digest(), b.final_digest());
        assert_eq!(a.final_state(), b.final_state());
        assert_eq!(a.times(), b.times());
        assert_eq!(a.status(), b.status());
    }
}

#[test]
fn different_seeds_differ() {
    let a = run_gray_scott(&tiny_gray_scott(), 1);
    let b = run_gray_scott(&tiny_gray_scott(), 2);
    assert_ne!(a.final_digest(), b.final_digest());
}

#[test]
fn every_field_has_grid_shape() {
    for cfg in [ModelConfig::from(tiny_sqk()), tiny_gray_scott().into()] {
        let n = cfg.grid().n();
        let names = cfg.kind().field_names();
        let r = integrate(&cfg, 3);
        for state in r.snapshots().iter().chain(std::iter::once(r.final_state())) {
            let keys: Vec<_> = state.keys().copied().collect();
            assert_eq!(keys, names);
            for field in state.values() {
                assert_eq!(field.n(), n);
                assert_eq!(field.len(), n * n);
            }
        }
    }
}

#[test]
fn stiff_sqk_blows_up_and_is_flagged() {
    let cfg = stiff_sqk();
    let r = run_sqk(&cfg, 0);
    let RunStatus::Blowup {
        stop_step,
        stop_time,
    } = r.status()
    else {
        panic!("expected blow-up, got {}", r.status());
    };
    assert!(stop_step >= 1);
    assert!(stop_step < cfg.grid().iterations());
    assert!((stop_time - stop_step as f64 * cfg.grid().dt()).abs() < 1e-9);
    assert!(!all_finite(r.final_state()));
    assert_eq!(r.elapsed(), stop_time);

    // Snapshots taken before divergence are retained and finite.
    assert!(!r.snapshots().is_empty());
    assert!(r.snapshots().iter().all(all_finite));
    assert!(r.times().iter().all(|&t| t < stop_time));
}

#[test]
fn default_sqk_gains_diverge_within_the_scenario_window() {
    let cfg = SqkConfig::builder()
        .grid(tiny_grid(0.05, 0.5, 2))
        .enable_forcing(false)
        .build()
        .unwrap();
    let r = run_sqk(&cfg, 0);
    assert_eq!(r.status().as_str(), "blowup");
    assert!(r.status().stop_step().unwrap() <= cfg.grid().iterations());
}

#[test]
fn long_horizon_divergence_is_reported_without_preallocating() {
    let grid = GridConfig::builder()
        .n(4)
        .dt(0.01)
        .t_end(1e12)
        .save_every(10)
        .build()
        .unwrap();
    let cfg = SqkConfig::builder().grid(grid).build().unwrap();
    assert!(cfg.grid().iterations() > 1_000_000_000_000);

    let r = run_sqk(&cfg, 0);
    let RunStatus::Blowup { stop_step, .. } = r.status() else {
        panic!("expected blow-up, got {}", r.status());
    };
    assert!(stop_step < 1_000);
    assert_eq!(r.snapshots().len() as u64, (stop_step - 1) / 10 + 1);
}

#[test]
fn finite_or_flagged() {
    for cfg in [
        ModelConfig::from(tiny_sqk()),
        tiny_gray_scott().into(),
        stiff_sqk().into(),
    ] {
        let r = integrate(&cfg, 11);
        if all_finite(r.final_state()) {
            assert_eq!(r.status(), RunStatus::Ok);
            assert!(r.status().stop_step().is_none());
        } else {
            assert!(r.status().stop_step().is_some());
            assert!(r.status().stop_time().is_some());
        }
    }
}

#[test]
fn gray_scott_forms_a_pattern() {
    let cfg = GrayScottConfig::builder()
        .grid(tiny_grid(1.0, 10.0, 10))
        .f(0.04)
        .k(0.06)
        .build()
        .unwrap();
    let r = run_gray_scott(&cfg, 0);
    assert_eq!(r.status(), RunStatus::Ok);
    assert_eq!(r.model(), ModelKind::GrayScott);
    let v = r.final_field("v").unwrap();
    assert!(v.is_finite());
    assert!(v.sum_abs_deviation() > 0.0);
}

#[test]
fn unforced_sqk_evolves() {
    let cfg = tiny_sqk();
    assert_eq!(cfg.forcing().scale(), 0.0);
    let r = run_sqk(&cfg, 0);
    assert_eq!(r.status(), RunStatus::Ok);
    assert!(all_finite(r.final_state()));
    let magnitude: f64 = r.final_state().values().map(|f| f.sum_abs()).sum();
    assert!(magnitude > 0.0);
    assert_ne!(r.snapshots()[0], *r.final_state());
}

#[test]
fn snapshots_are_independent_of_final_state() {
    let r = run_gray_scott(&tiny_gray_scott(), 5);
    let first = &r.snapshots()[0];
    let last = r.final_state();
    assert_ne!(first["v"], last["v"]);
    // Step 0 snapshot equals a fresh initial condition.
    let again = run_gray_scott(&tiny_gray_scott(), 5);
    assert_eq!(*first, again.snapshots()[0]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn times_are_multiples_of_stride(seed in 0u64..1000, stride in 1u64..6) {
        let cfg = GrayScottConfig::builder()
            .grid(tiny_grid(1.0, 6.0, stride))
            .build()
            .unwrap();
        let r = run_gray_scott(&cfg, seed);
        for (i, &t) in r.times().iter().enumerate() {
            prop_assert_eq!(t, (i as u64 * stride) as f64);
        }
        prop_assert_eq!(r.times().len() as u64, 7u64.div_ceil(stride));
    }
}
