use lsm_ampcalc::{compute_level_costs, estimate_bounds, report, ModelConfig, ModelError};
use std::fs;
use tempfile::TempDir;

#[test]
fn load_partial_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");
    fs::write(
        &path,
        r#"{
            "levels": { "user_write_rate_mibps": 50, "level_count": 1, "compression_ratio_per_level": [1.0, 0.5] },
            "throughput": { "mixed_effective_bandwidth_mibps": null, "write_amplification_candidates": [4] }
        }"#,
    )
    .unwrap();

    let config = ModelConfig::load(&path).unwrap();
    let levels = compute_level_costs(&config.levels).unwrap();
    assert_eq!(levels.rows.len(), 3);
    assert_eq!(levels.rows[0].write_mibps, 50.0);

    let bounds = estimate_bounds(&config.throughput).unwrap();
    assert_eq!(bounds.len(), config.throughput.compression_ratio_candidates.len());
    assert!(bounds.iter().all(|b| b.s_m.is_unbounded()));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ModelConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ModelError::Io(_)));
}

#[test]
fn malformed_json_is_serde_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ levels: ").unwrap();
    assert!(matches!(ModelConfig::load(&path), Err(ModelError::Serde(_))));
}

#[test]
fn saved_report_matches_rendered_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("levels.txt");
    let levels = compute_level_costs(&ModelConfig::default().levels).unwrap();
    let text = report::render_levels(&levels);
    report::save(&path, &text).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), text);
}
