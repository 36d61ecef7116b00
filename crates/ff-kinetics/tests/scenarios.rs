//! Scenario tests for the fermentation model under RK4.

use ff_core::{Tolerances, linspace, nearly_equal};
use ff_kinetics::state::{DO, P, S, T, V, X};
use ff_kinetics::{
    FeedMode, FermentationModel, KineticParams, OperatingConditions, integrate_fermentation,
};
use ff_sim::{SimError, Trajectory, status_code};

fn default_params() -> KineticParams {
    KineticParams {
        mu_max: 0.4,
        ks: 0.1,
        yxs: 0.5,
        ypx: 0.1,
        kd: 0.01,
        kio: 1e-4,
        kp: 50.0,
        maintenance: 0.005,
        q10: 2.0,
        t_ref: 30.0,
        kla: 200.0,
        c_star: 0.007,
        o2_maintenance: 5e-4,
        delta_h: 4e5,
        cp: 4180.0,
        u: 500.0,
        a: 2.0,
        rho: 1000.0,
    }
}

fn default_ops() -> OperatingConditions {
    OperatingConditions {
        volume: 5.0,
        feed_rate: 0.0,
        feed_substrate_conc: 500.0,
        feed_start: 0.0,
        feed_rate_end: 0.0,
        feed_tau: 2.0,
        feed_mode: FeedMode::Constant,
        do_setpoint: 0.0,
        do_kp: 0.0,
        aeration_rate: 1.0,
        agitation_speed: 300.0,
        cooling_temp: 25.0,
        coolant_flow: 1.0,
        agit_power_coeff: 2.0,
        agit_heat_eff: 0.5,
    }
}

/// Parameters under which nothing grows, reacts or exchanges heat.
fn inert_params() -> KineticParams {
    KineticParams {
        mu_max: 0.0,
        kd: 0.0,
        maintenance: 0.0,
        o2_maintenance: 0.0,
        kla: 0.0,
        delta_h: 0.0,
        u: 0.0,
        ..default_params()
    }
}

fn inert_ops() -> OperatingConditions {
    OperatingConditions {
        agit_power_coeff: 0.0,
        ..default_ops()
    }
}

#[test]
fn steady_state_without_growth() {
    let model = FermentationModel::extended(inert_params(), inert_ops());
    let grid = linspace(0.0, 10.0, 11).unwrap();
    let y0 = [1.0, 10.0, 0.0, 0.21, 30.0, 5.0];
    let traj = model.simulate(&grid, &y0).unwrap();

    let tol = Tolerances::default();
    for row in traj.rows() {
        for (v, v0) in row.iter().zip(&y0) {
            assert!(nearly_equal(*v, *v0, tol), "{v} != {v0}");
        }
    }
}

#[test]
fn batch_growth_consumes_substrate() {
    let model = FermentationModel::simple(default_params(), default_ops());
    let grid = linspace(0.0, 5.0, 501).unwrap();
    let y0 = [1.0, 20.0, 0.0, 0.005, 30.0];
    let traj = Trajectory::simulate(&model, &grid, &y0).unwrap();

    let end = traj.final_state();
    assert!(end[X] > y0[X]);
    assert!(end[S] < y0[S]);
    assert!(end[P] > 0.0);
    assert!(end.iter().all(|v| v.is_finite()));
    assert!(end[DO] >= 0.0);
    assert!(end[T].is_finite());
}

#[test]
fn constant_feed_grows_volume_linearly() {
    let ops = OperatingConditions {
        feed_rate: 0.1,
        ..default_ops()
    };
    let grid = linspace(0.0, 5.0, 501).unwrap();
    let y0 = [1.0, 20.0, 0.0, 0.005, 30.0, 5.0];
    let mut out = vec![0.0; grid.len() * 6];
    let result = integrate_fermentation(&grid, &y0, &default_params(), &ops, &mut out);
    assert_eq!(status_code(&result), 0);

    let final_v = out[out.len() - 6 + V];
    assert!((final_v - 5.5).abs() < 1e-9, "final volume {final_v}");
}

#[test]
fn delayed_feed_leaves_volume_untouched_until_start() {
    let ops = OperatingConditions {
        feed_rate: 0.2,
        feed_start: 2.0,
        ..inert_ops()
    };
    let model = FermentationModel::extended(inert_params(), ops);
    let grid = linspace(0.0, 4.0, 401).unwrap();
    let y0 = [1.0, 20.0, 0.0, 0.005, 30.0, 5.0];
    let traj = model.simulate(&grid, &y0).unwrap();

    let at_one = traj.row(100).unwrap();
    assert!((at_one[V] - 5.0).abs() < 1e-12);
    assert!((traj.final_state()[V] - 5.4).abs() < 1e-3);
}

#[test]
fn ramp_feed_accelerates_volume_growth() {
    let constant = OperatingConditions {
        feed_rate: 0.1,
        ..inert_ops()
    };
    let ramp = OperatingConditions {
        feed_mode: FeedMode::Ramp,
        feed_rate_end: 0.5,
        feed_tau: 4.0,
        ..constant
    };
    let grid = linspace(0.0, 4.0, 401).unwrap();
    let y0 = [1.0, 20.0, 0.0, 0.005, 30.0, 5.0];

    let flat_model = FermentationModel::extended(inert_params(), constant);
    let ramp_model = FermentationModel::extended(inert_params(), ramp);
    let flat = flat_model.simulate(&grid, &y0).unwrap();
    let rising = ramp_model.simulate(&grid, &y0).unwrap();

    // Ramp from 0.1 to 0.5 over 4 h adds 1.2 L
    assert!((flat.final_state()[V] - 5.4).abs() < 1e-9);
    assert!((rising.final_state()[V] - 6.2).abs() < 1e-6);

    let v = rising.series(V).unwrap();
    let early = v[100] - v[0];
    let late = v[400] - v[300];
    assert!(late > early);
}

#[test]
fn feeding_dilutes_biomass() {
    let ops = OperatingConditions {
        feed_rate: 1.0,
        feed_substrate_conc: 0.0,
        ..inert_ops()
    };
    let model = FermentationModel::extended(inert_params(), ops);
    let grid = linspace(0.0, 5.0, 501).unwrap();
    let y0 = [2.0, 0.0, 0.0, 0.005, 30.0, 5.0];
    let traj = model.simulate(&grid, &y0).unwrap();

    // X V is conserved without growth: 2 * 5 / 10
    let end = traj.final_state();
    assert!((end[V] - 10.0).abs() < 1e-9);
    assert!((end[X] - 1.0).abs() < 1e-6);
}

#[test]
fn wrong_initial_dimension_is_invalid() {
    let model = FermentationModel::simple(default_params(), default_ops());
    let grid = [0.0, 1.0];
    let mut out = vec![0.0; 12];
    let err = model
        .integrate(&grid, &[1.0, 20.0, 0.0, 0.005, 30.0, 5.0], &mut out)
        .unwrap_err();
    assert!(matches!(err, SimError::InvalidArg { .. }));
    assert!(out.iter().all(|&v| v == 0.0));
}

#[test]
fn short_grid_reports_status_minus_one() {
    let mut out = vec![0.0; 6];
    let result = integrate_fermentation(
        &[0.0],
        &[1.0, 20.0, 0.0, 0.005, 30.0, 5.0],
        &default_params(),
        &default_ops(),
        &mut out,
    );
    assert_eq!(status_code(&result), -1);
}

#[test]
fn rates_expose_feed_and_dilution() {
    let ops = OperatingConditions {
        feed_rate: 0.5,
        ..default_ops()
    };
    let model = FermentationModel::extended(default_params(), ops);
    let r = model.rates(1.0, &[1.0, 20.0, 0.0, 0.005, 30.0, 5.0]).unwrap();
    assert_eq!(r.feed, 0.5);
    assert!((r.dilution - 0.1).abs() < 1e-15);
    assert!(model.rates(1.0, &[1.0, 20.0]).is_none());
}

#[test]
fn extended_model_on_batch_state_uses_fixed_volume() {
    let ops = OperatingConditions {
        feed_rate: 0.5,
        ..inert_ops()
    };
    let model = FermentationModel::extended(inert_params(), ops);
    let grid = linspace(0.0, 1.0, 101).unwrap();
    let y0 = [2.0, 0.0, 0.0, 0.005, 30.0];

    let traj = Trajectory::simulate(&model, &grid, &y0).unwrap();
    assert_eq!(traj.state_dim(), 5);

    // D = 0.5 / 5 at the fixed operating volume
    let expected = 2.0 * (-0.1f64).exp();
    assert!((traj.final_state()[X] - expected).abs() < 1e-9);
}

#[test]
fn state_too_short_for_model_yields_nan() {
    let model = FermentationModel::simple(default_params(), default_ops());
    let traj = Trajectory::simulate(&model, &[0.0, 0.01], &[1.0, 20.0]).unwrap();

    assert_eq!(traj.row(0), Some(&[1.0, 20.0][..]));
    assert!(traj.final_state().iter().all(|v| v.is_nan()));
}

#[test]
fn simulate_checks_initial_dimension() {
    let model = FermentationModel::extended(default_params(), default_ops());
    let err = model
        .simulate(&[0.0, 1.0], &[1.0, 20.0, 0.0, 0.005, 30.0])
        .unwrap_err();
    assert_eq!(err.status_code(), -1);
}
