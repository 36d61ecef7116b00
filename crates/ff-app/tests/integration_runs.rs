//! End-to-end runs through the service layer.

use ff_app::{AppError, RunMode, run_simulation, run_sweep, state_variables, summarize};
use ff_project::SimulationRequest;

/// Five hours on a 0.01 h grid.
fn short_run() -> SimulationRequest {
    SimulationRequest {
        t_end: Some(5.0),
        n_points: Some(501),
        ..Default::default()
    }
}

#[test]
fn batch_run_shapes() {
    let response = run_simulation(&short_run(), RunMode::Batch).unwrap();

    assert_eq!(response.meta.mode, RunMode::Batch);
    assert_eq!(response.meta.n_points, 501);
    assert_eq!(response.meta.state_dim, 5);
    assert_eq!(response.time.len(), 501);
    assert_eq!(response.states.len(), 5);
    assert!(response.series("V").is_none());

    let names: Vec<_> = response.states.iter().map(|s| s.name).collect();
    let expected: Vec<_> = state_variables(RunMode::Batch)
        .iter()
        .map(|v| v.name)
        .collect();
    assert_eq!(names, expected);

    for series in &response.states {
        assert_eq!(series.values.len(), 501);
        assert!(series.values.iter().all(|v| v.is_some()));
    }
}

#[test]
fn batch_run_grows_biomass() {
    let response = run_simulation(&short_run(), RunMode::Batch).unwrap();

    let x = response.series("X").unwrap();
    assert_eq!(x[0], Some(1.0));
    assert!(response.final_value("X").unwrap() > 1.0);
    assert!(response.final_value("S").unwrap() < 20.0);
}

#[test]
fn fed_batch_volume_grows_with_feed() {
    let request = SimulationRequest {
        feed_rate: Some(0.1),
        ..short_run()
    };
    let response = run_simulation(&request, RunMode::FedBatch).unwrap();

    assert_eq!(response.meta.state_dim, 6);
    let v = response.series("V").unwrap();
    assert_eq!(v[0], Some(5.0));
    let final_v = response.final_value("V").unwrap();
    assert!((final_v - 5.5).abs() < 1e-9, "final volume {final_v}");
}

#[test]
fn ramp_feed_adds_more_volume_than_constant() {
    let constant = SimulationRequest {
        feed_rate: Some(0.1),
        t_end: Some(4.0),
        n_points: Some(401),
        ..Default::default()
    };
    let ramp = SimulationRequest {
        feed_mode: Some("ramp".into()),
        feed_rate_end: Some(0.5),
        feed_tau: Some(4.0),
        ..constant.clone()
    };

    let flat = run_simulation(&constant, RunMode::FedBatch).unwrap();
    let rising = run_simulation(&ramp, RunMode::FedBatch).unwrap();

    let v_flat = flat.final_value("V").unwrap();
    let v_ramp = rising.final_value("V").unwrap();
    assert!((v_flat - 5.4).abs() < 1e-9);
    assert!((v_ramp - 6.2).abs() < 1e-6);
}

#[test]
fn preset_values_reach_the_response() {
    let request = SimulationRequest {
        microbe_id: Some("E_coli_K12".into()),
        substrate_id: Some("glucose".into()),
        mu_max: Some(0.5),
        ..short_run()
    };
    let response = run_simulation(&request, RunMode::Batch).unwrap();

    let echoed = &response.meta.request;
    assert_eq!(echoed.mu_max, Some(0.5));
    assert_eq!(echoed.x0, Some(0.5));
    assert_eq!(echoed.t0, Some(37.0));
    assert_eq!(echoed.q10, Some(2.0));
    assert_eq!(response.series("X").unwrap()[0], Some(0.5));
    assert_eq!(response.series("T").unwrap()[0], Some(37.0));
}

#[test]
fn divergent_run_serializes_nulls() {
    // Jacket cooling this strong is far outside RK4 stability at one-hour steps
    let request = SimulationRequest {
        t_end: Some(24.0),
        n_points: Some(25),
        u: Some(1e12),
        ..Default::default()
    };
    let response = run_simulation(&request, RunMode::Batch).unwrap();
    assert!(response.non_finite_count() > 0);
    assert!(response.final_value("T").is_none());
    assert!(response.final_value("X").is_some());

    let json = response.to_json().unwrap();
    assert!(json.contains("null"));
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed["states"]["T"].as_array().unwrap().last().unwrap().is_null());
    assert_eq!(parsed["meta"]["mode"], "batch");
}

#[test]
fn json_layout() {
    let response = run_simulation(&short_run(), RunMode::FedBatch).unwrap();
    let json = response.to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["meta"]["mode"], "fed_batch");
    assert_eq!(parsed["meta"]["n_points"], 501);
    assert_eq!(parsed["meta"]["state_dim"], 6);
    assert_eq!(parsed["meta"]["request"]["Kla"], 200.0);
    assert_eq!(parsed["meta"]["request"]["feed_mode"], "constant");
    assert_eq!(parsed["time"].as_array().unwrap().len(), 501);
    for name in ["X", "S", "P", "DO", "T", "V"] {
        assert_eq!(parsed["states"][name].as_array().unwrap().len(), 501);
    }
}

#[test]
fn invalid_request_is_rejected() {
    let request = SimulationRequest {
        agit_heat_eff: Some(2.0),
        ..short_run()
    };
    let err = run_simulation(&request, RunMode::Batch).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn oversized_grid_is_rejected_before_allocation() {
    let request = SimulationRequest {
        n_points: Some(1 << 62),
        ..Default::default()
    };
    let err = run_simulation(&request, RunMode::Batch).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn summary_reports_range_and_final_values() {
    let response = run_simulation(&short_run(), RunMode::Batch).unwrap();
    let summary = summarize(&response).unwrap();

    assert_eq!(summary.mode, RunMode::Batch);
    assert_eq!(summary.time_range, (0.0, 5.0));
    assert_eq!(summary.n_points, 501);
    assert_eq!(summary.non_finite, 0);
    assert_eq!(summary.final_values.len(), 5);
    assert_eq!(summary.final_values[4].0, "T");
    assert_eq!(summary.final_values[0].1, response.final_value("X"));
}

#[test]
fn sweep_preserves_order() {
    let requests: Vec<_> = [0.2, 0.3, 0.4, 0.5]
        .into_iter()
        .map(|mu| SimulationRequest {
            mu_max: Some(mu),
            ..short_run()
        })
        .collect();

    let results = run_sweep(&requests, RunMode::Batch).unwrap();
    assert_eq!(results.len(), 4);

    let mut previous = 0.0;
    for (result, request) in results.iter().zip(&requests) {
        let response = result.as_ref().unwrap();
        assert_eq!(response.meta.request.mu_max, request.mu_max);
        let x_end = response.final_value("X").unwrap();
        assert!(x_end > previous);
        previous = x_end;
    }
}

#[test]
fn sweep_reports_failures_in_place() {
    let requests = vec![
        short_run(),
        SimulationRequest {
            n_points: Some(1),
            ..short_run()
        },
        short_run(),
    ];
    let results = run_sweep(&requests, RunMode::FedBatch).unwrap();

    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(AppError::Validation(_))));
    assert!(results[2].is_ok());
}
