#![forbid(unsafe_code)]

//! Golden checksums and recorded playback for the standard scenarios.
//!
//! # Updating Golden Checksums
//!
//! ```sh
//! BLESS=1 cargo test -p polylink-harness golden_
//! ```

use std::path::Path;

use polylink_core::{Operation, Polynomial, StepKind, generate, replay};
use polylink_harness::golden::{
    GoldenOutcome, golden_checksum_path, is_bless_mode, load_golden_checksums,
    save_golden_checksums, verify_checksums,
};
use polylink_harness::{RecordingRenderer, RenderCall, standard_scenarios, trace_checksum};
use polylink_runtime::{PlaybackConfig, PlaybackController, PlaybackState};

#[test]
fn golden_trace_checksums() {
    let base = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut failures = Vec::new();

    for scenario in standard_scenarios() {
        let steps = scenario.steps().unwrap();
        let actual = vec![trace_checksum(&steps).unwrap()];
        let path = golden_checksum_path(base, scenario.name);

        if is_bless_mode() {
            save_golden_checksums(&path, &actual).unwrap();
            continue;
        }
        let expected = load_golden_checksums(&path).unwrap();
        match verify_checksums(&actual, &expected) {
            GoldenOutcome::Pass => {}
            GoldenOutcome::Missing => failures.push(format!(
                "{}: no golden file at {}, got {:?}",
                scenario.name,
                path.display(),
                actual
            )),
            GoldenOutcome::Mismatch(_) => failures.push(format!(
                "{}: expected {:?}, got {:?}",
                scenario.name, expected, actual
            )),
        }
    }

    assert!(failures.is_empty(), "golden mismatches:\n{}", failures.join("\n"));
}

#[test]
fn every_scenario_has_a_golden_file() {
    let base = Path::new(env!("CARGO_MANIFEST_DIR"));
    for scenario in standard_scenarios() {
        let path = golden_checksum_path(base, scenario.name);
        let expected = load_golden_checksums(&path).unwrap();
        assert_eq!(expected.len(), 1, "{}: {}", scenario.name, path.display());
        assert!(expected[0].starts_with("fnv1a:"), "{}", scenario.name);
    }
}

#[test]
fn golden_traces_are_reproducible() {
    for scenario in standard_scenarios() {
        let first = trace_checksum(&scenario.steps().unwrap()).unwrap();
        let second = trace_checksum(&scenario.steps().unwrap()).unwrap();
        assert_eq!(first, second, "{}", scenario.name);
    }
}

#[tokio::test]
async fn recorded_playback_reproduces_trace() {
    for scenario in standard_scenarios() {
        let steps = scenario.steps().unwrap();
        let mut ctl =
            PlaybackController::with_config(RecordingRenderer::new(), PlaybackConfig::instant());
        ctl.load(steps.clone());
        assert_eq!(ctl.play().await, PlaybackState::Finished);

        let rendered: Vec<_> = ctl
            .renderer()
            .calls()
            .iter()
            .filter_map(|call| match call {
                RenderCall::Render { step, .. } => Some(step.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(rendered.as_slice(), steps.as_slice(), "{}", scenario.name);
    }
}

#[tokio::test]
async fn reset_then_load_is_idempotent() {
    let a = Polynomial::from_coefficients([(3, 2), (1, -1), (0, 4)]).unwrap();
    let b = Polynomial::from_coefficients([(2, 1), (0, -4)]).unwrap();
    let steps = generate(&a, &b, Operation::Subtraction);

    let mut ctl =
        PlaybackController::with_config(RecordingRenderer::new(), PlaybackConfig::instant());
    ctl.load(steps.clone());
    ctl.play().await;
    let first = ctl.renderer_mut().take();

    ctl.reset();
    ctl.renderer_mut().take();
    ctl.load(steps);
    ctl.play().await;
    let second = ctl.renderer_mut().take();

    assert_eq!(first, second);
    assert!(matches!(first.first(), Some(RenderCall::Reset)));
    assert!(matches!(first.get(1), Some(RenderCall::Speed(_))));
}

#[tokio::test]
async fn stepping_matches_playing() {
    let a = Polynomial::from_coefficients([(2, 1), (1, 1)]).unwrap();
    let b = Polynomial::from_coefficients([(1, 2), (0, 3)]).unwrap();
    let steps = generate(&a, &b, Operation::Multiplication);

    let mut stepped =
        PlaybackController::with_config(RecordingRenderer::new(), PlaybackConfig::instant());
    stepped.load(steps.clone());
    while stepped.step_once().await {}

    let mut played =
        PlaybackController::with_config(RecordingRenderer::new(), PlaybackConfig::instant());
    played.load(steps.clone());
    played.play().await;

    assert_eq!(stepped.renderer().calls(), played.renderer().calls());
    assert_eq!(
        stepped.renderer().rendered_indices(),
        (0..steps.len()).collect::<Vec<_>>()
    );
}

#[test]
fn addition_example_merges_each_power() {
    let scenario = &standard_scenarios()[0];
    let steps = scenario.steps().unwrap();
    let result = replay(&steps);
    assert_eq!(result.to_string(), "3x^2 + 8");

    let merges = steps
        .iter()
        .filter(|s| matches!(s.kind, StepKind::AddNode { source: polylink_core::Source::Merge, .. }))
        .count();
    assert_eq!(merges, 2);
    assert_eq!(steps.count("highlight"), 2);
    assert_eq!(steps.count("end"), 1);
}
