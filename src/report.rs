//! Text and JSON rendering of model output.
//!
//! Rates use 2 decimals, percentages 1, `w_req`/`r_req` 4, and unbounded
//! values print as `inf`.

use serde::Serialize;
use std::{fmt::Write as _, fs, path::Path};

use crate::error::Result;
use crate::level_cost::LevelCostReport;
use crate::ratios::AmplificationRatios;
use crate::throughput::BoundResult;

pub fn render_levels(report: &LevelCostReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>12} {:>12} {:>8} {:>8}",
        "level", "read MiB/s", "write MiB/s", "read %", "write %"
    );
    for (row, util) in report.rows.iter().zip(&report.row_utilization) {
        let _ = writeln!(
            out,
            "{:<12} {:>12.2} {:>12.2} {:>8.1} {:>8.1}",
            row.tier, row.read_mibps, row.write_mibps, util.read_pct, util.write_pct
        );
    }
    let _ = writeln!(
        out,
        "{:<12} {:>12.2} {:>12.2} {:>8.1} {:>8.1}",
        "total",
        report.total_read_mibps,
        report.total_write_mibps,
        report.total_utilization.read_pct,
        report.total_utilization.write_pct
    );
    out
}

pub fn render_bounds(results: &[BoundResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6} {:>6} {:>8} {:>8} {:>10} {:>10} {:>10} {:>10} {:>12} {:>8}",
        "CR", "WA", "w_req", "r_req", "s_w", "s_r", "s_m", "s_max", "ops/s", "binding"
    );
    for r in results {
        let binding = r.binding.map_or("-".to_string(), |c| c.to_string());
        let _ = writeln!(
            out,
            "{:>6.2} {:>6.2} {:>8.4} {:>8.4} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12.0} {:>8}",
            r.compression_ratio,
            r.write_amplification,
            r.w_req,
            r.r_req,
            r.s_w,
            r.s_r,
            r.s_m,
            r.s_max,
            r.ops,
            binding
        );
    }
    out
}

pub fn render_ratios(ratios: &AmplificationRatios) -> String {
    let fmt = |v: Option<f64>| v.map_or("n/a".to_string(), |v| format!("{:.4}", v));
    format!(
        "write amplification: {}\nread amplification:  {}\ncompression ratio:   {}\n",
        fmt(ratios.write_amplification),
        fmt(ratios.read_amplification),
        fmt(ratios.compression_ratio)
    )
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes rendered output to `path`, replacing any existing file.
pub fn save(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, contents)?;
    log::info!("saved report to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level_cost::compute_level_costs;
    use crate::params::{EngineShapeParameters, ThroughputQueryParams};
    use crate::throughput::{bounds_for, estimate_bounds};

    #[test]
    fn level_table_has_header_rows_and_total() {
        let report = compute_level_costs(&EngineShapeParameters::default()).unwrap();
        let text = render_levels(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + report.rows.len() + 1);
        assert!(lines[1].starts_with("L0 (flush)"));
        assert!(lines[1].contains("100.00"));
        assert!(lines.last().unwrap().starts_with("total"));
    }

    #[test]
    fn bound_table_prints_inf() {
        let q = ThroughputQueryParams {
            wal_write_factor: 0.0,
            ..Default::default()
        };
        let r = bounds_for(&q, 0.5, 1.0).unwrap();
        let text = render_bounds(&[r]);
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains("inf"));
        assert!(row.contains("2000.00"));
    }

    #[test]
    fn json_uses_inf_token() {
        let q = ThroughputQueryParams {
            mixed_effective_bandwidth_mibps: None,
            ..Default::default()
        };
        let results = estimate_bounds(&q).unwrap();
        let json = to_json(&results).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["s_m"], "inf");
        assert_eq!(parsed[0]["binding"], "write");
    }

    #[test]
    fn ratios_render_missing_as_na() {
        let text = render_ratios(&AmplificationRatios {
            write_amplification: Some(3.0),
            read_amplification: None,
            compression_ratio: Some(0.5),
        });
        assert!(text.contains("3.0000"));
        assert!(text.contains("n/a"));
    }
}
