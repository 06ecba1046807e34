//! Integration Tests
//!
//! End-to-end tests for the Splicer file pipeline: WAV in, one operation,
//! WAV out.

use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use test_case::test_case;

use splicer::engine::{compare, generate_test_signal, load_wav, save_wav};
use splicer::jobs::{combine_files, run, separate_files, Job};
use splicer::{combine, separate, CombineOp, Operation, OperationParams, SeparateOp, SplicerError};

const BASE: [i16; 5] = [10, 20, 30, 40, 50];
const ADD: [i16; 2] = [100, 100];

fn write(dir: &Path, name: &str, samples: &[i16], sample_rate: u32) -> std::path::PathBuf {
    let path = dir.join(name);
    save_wav(&path, samples, sample_rate).unwrap();
    path
}

// === Concrete Scenarios ===

#[test_case(Operation::Insert, 2, vec![10, 20, 100, 100, 30, 40, 50] ; "insert in middle")]
#[test_case(Operation::Mix, 2, vec![10, 20, 65, 70, 50] ; "mix in middle")]
#[test_case(Operation::Insert, 9, vec![10, 20, 30, 40, 50, 100, 100] ; "insert past end appends")]
#[test_case(Operation::Mix, 4, vec![10, 20, 30, 40, 75, 50] ; "mix pads past end")]
fn test_combine_scenarios(mode: Operation, position: i64, expected: Vec<i16>) {
    let dir = tempdir().unwrap();
    let base = write(dir.path(), "base.wav", &BASE, 44100);
    let add = write(dir.path(), "add.wav", &ADD, 44100);
    let out = dir.path().join("out.wav");

    let report = combine_files(&base, &add, &out, &OperationParams::new(mode, position)).unwrap();

    assert_eq!(load_wav(&out).unwrap().samples, expected);
    assert_eq!(report.output_samples, expected.len());
}

#[test]
fn test_unmix_scenario() {
    let dir = tempdir().unwrap();
    let combined = write(dir.path(), "combined.wav", &[10, 20, 65, 70, 40, 50], 44100);
    let removal = write(dir.path(), "removal.wav", &ADD, 44100);
    let out = dir.path().join("recovered.wav");

    separate_files(
        &combined,
        &removal,
        &out,
        &OperationParams::new(Operation::Unmix, 2),
    )
    .unwrap();

    assert_eq!(load_wav(&out).unwrap().samples, vec![10, 20, 30, 40, 40, 50]);
}

// === File Round Trips ===

#[test]
fn test_insert_remove_files_exact() {
    let dir = tempdir().unwrap();
    let base_signal = generate_test_signal(4000, 44100, 1);
    let add_signal = generate_test_signal(1500, 44100, 2);

    let base = write(dir.path(), "base.wav", &base_signal.samples, 44100);
    let add = write(dir.path(), "add.wav", &add_signal.samples, 44100);
    let inserted = dir.path().join("inserted.wav");
    let recovered = dir.path().join("recovered.wav");

    combine_files(&base, &add, &inserted, &OperationParams::new(Operation::Insert, 1234)).unwrap();
    separate_files(
        &inserted,
        &add,
        &recovered,
        &OperationParams::new(Operation::Remove, 1234),
    )
    .unwrap();

    let recovered = load_wav(&recovered).unwrap();
    assert_eq!(recovered.samples, base_signal.samples);
    assert_eq!(recovered.sample_rate, 44100);
}

#[test]
fn test_mix_unmix_files_within_tolerance() {
    let dir = tempdir().unwrap();
    let base_signal = generate_test_signal(3000, 44100, 3);
    let add_signal = generate_test_signal(2000, 44100, 4);

    let base = write(dir.path(), "base.wav", &base_signal.samples, 44100);
    let add = write(dir.path(), "add.wav", &add_signal.samples, 44100);
    let mixed = dir.path().join("mixed.wav");
    let recovered = dir.path().join("recovered.wav");

    // runs past the end of the base, so the mix pads
    let params = OperationParams::new(Operation::Mix, 2000).with_mix_balance(0.25);
    let report = combine_files(&base, &add, &mixed, &params).unwrap();
    assert_eq!(report.output_samples, 4000);

    let params = OperationParams::new(Operation::Unmix, 2000).with_mix_balance(0.25);
    separate_files(&mixed, &add, &recovered, &params).unwrap();

    let mut padded = base_signal.samples.clone();
    padded.resize(4000, 0);

    let comparison = compare(&load_wav(&recovered).unwrap().samples, &padded);
    assert!(
        comparison.within(2),
        "max diff {} over {} samples",
        comparison.max_abs_diff,
        comparison.mismatched
    );
}

#[test]
fn test_normalized_mix_reaches_full_scale() {
    let dir = tempdir().unwrap();
    let base = write(dir.path(), "base.wav", &[1000, -2000, 500], 8000);
    let add = write(dir.path(), "add.wav", &[1000, 1000], 8000);
    let out = dir.path().join("out.wav");

    let params = OperationParams::new(Operation::Mix, 0).with_normalize(true);
    let report = combine_files(&base, &add, &out, &params).unwrap();

    assert_eq!(report.peak, i32::from(i16::MAX));
    assert!(report.normalization_scale.is_some());

    let samples = load_wav(&out).unwrap().samples;
    // mix gives [1000, -500, 500]: shape and sign survive the rescale
    assert_eq!(samples[0], i16::MAX);
    assert!(samples[1] < 0);
    assert_eq!(samples[1], -samples[2]);
}

#[test]
fn test_run_job_uses_first_input_rate() {
    let dir = tempdir().unwrap();
    let job = Job {
        input: write(dir.path(), "base.wav", &BASE, 22050),
        signal: write(dir.path(), "add.wav", &ADD, 48000),
        output: dir.path().join("out.wav"),
        params: OperationParams::new(Operation::Insert, 0).with_add_offset(1),
    };

    let report = run(&job).unwrap();
    assert_eq!(report.sample_rate, 22050);

    let loaded = load_wav(&job.output).unwrap();
    assert_eq!(loaded.samples, vec![100, 10, 20, 30, 40, 50]);
    assert_eq!(loaded.sample_rate, 22050);
}

// === Failure Handling ===

#[test]
fn test_negative_position_rejected_before_io() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.wav");

    for mode in Operation::ALL {
        let err = run(&Job {
            input: dir.path().join("missing.wav"),
            signal: dir.path().join("missing.wav"),
            output: out.clone(),
            params: OperationParams::new(mode, -1),
        })
        .unwrap_err();

        assert!(
            matches!(err, SplicerError::InvalidArgument { .. }),
            "{}: {:?}",
            mode,
            err
        );
    }
    assert!(!out.exists());
}

#[test]
fn test_decode_failure_leaves_existing_output() {
    let dir = tempdir().unwrap();
    let out = write(dir.path(), "out.wav", &[7, 7, 7], 8000);
    let garbage = dir.path().join("garbage.wav");
    std::fs::write(&garbage, b"RIFF but not really").unwrap();
    let add = write(dir.path(), "add.wav", &ADD, 8000);

    let err = combine_files(&garbage, &add, &out, &OperationParams::new(Operation::Mix, 0))
        .unwrap_err();
    assert_eq!(err.error_code(), "DECODE_ERROR");
    assert_eq!(load_wav(&out).unwrap().samples, vec![7, 7, 7]);
}

// === In-Memory API ===

#[test]
fn test_core_api_scenarios() {
    assert_eq!(
        combine(&BASE, &ADD, 2, CombineOp::insert()),
        vec![10, 20, 100, 100, 30, 40, 50]
    );
    assert_eq!(
        combine(&BASE, &ADD, 2, CombineOp::mix(0.5)),
        vec![10, 20, 65, 70, 50]
    );
    assert_eq!(
        separate(&[10, 20, 65, 70, 40, 50], &ADD, 2, SeparateOp::unmix(0.5)),
        vec![10, 20, 30, 40, 40, 50]
    );
    assert_eq!(
        separate(&[10, 20, 100, 100, 30, 40, 50], &ADD, 2, SeparateOp::Remove),
        BASE.to_vec()
    );
}
