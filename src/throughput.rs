//! Steady-state put throughput bounds.
//!
//! Each resource (write bandwidth, read bandwidth, and an optional shared
//! channel where reads cost `eta` times a write) caps the sustainable user
//! put rate independently. The achievable rate is the smallest cap.

use serde::Serialize;
use std::fmt;

use crate::bound::Bound;
use crate::error::Result;
use crate::params::{non_negative, ThroughputQueryParams};

pub const BYTES_PER_MIB: f64 = 1_048_576.0;

/// Resource that limits the put rate.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Write,
    Read,
    Mixed,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Constraint::Write => "write",
            Constraint::Read => "read",
            Constraint::Mixed => "mixed",
        };
        f.pad(name)
    }
}

/// Bounds for one `(CR, WA)` pair. Rates are user MiB/s.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BoundResult {
    pub compression_ratio: f64,
    pub write_amplification: f64,
    /// Bytes written per user byte.
    pub w_req: f64,
    /// Bytes read per user byte.
    pub r_req: f64,
    pub s_w: Bound,
    pub s_r: Bound,
    pub s_m: Bound,
    pub s_max: Bound,
    /// `s_max` as put operations per second.
    pub ops: Bound,
    /// First resource (write, read, mixed order) whose bound equals `s_max`.
    pub binding: Option<Constraint>,
}

/// Evaluates a single pair against the bandwidths in `q`.
///
/// Bandwidths and weights in `q` are validated; the pair itself only has to
/// be finite and non-negative, so measured ratios are taken as they are.
/// Candidate ranges are enforced by [`estimate_bounds`].
pub fn bounds_for(q: &ThroughputQueryParams, cr: f64, wa: f64) -> Result<BoundResult> {
    q.validate_scalars()?;
    non_negative("compression_ratio", cr)?;
    non_negative("write_amplification", wa)?;
    Ok(evaluate(q, cr, wa))
}

/// Evaluates the full `CR x WA` cross product, outer loop over the
/// compression ratios, in the order given. No sorting or deduplication.
pub fn estimate_bounds(q: &ThroughputQueryParams) -> Result<Vec<BoundResult>> {
    q.validate()?;

    let mut results = Vec::with_capacity(
        q.compression_ratio_candidates.len() * q.write_amplification_candidates.len(),
    );
    for &cr in &q.compression_ratio_candidates {
        for &wa in &q.write_amplification_candidates {
            results.push(evaluate(q, cr, wa));
        }
    }

    let tightest = results.iter().fold(Bound::Unbounded, |acc, r| acc.min(r.s_max));
    log::info!(
        "throughput bounds: {} pairs, tightest s_max {:.2} MiB/s",
        results.len(),
        tightest
    );
    Ok(results)
}

fn evaluate(q: &ThroughputQueryParams, cr: f64, wa: f64) -> BoundResult {
    let w_req = cr * wa + q.wal_write_factor;
    let r_req = cr * (wa - 1.0).max(0.0);

    let s_w = Bound::ratio(q.write_bandwidth_mibps, w_req);
    let s_r = Bound::ratio(q.read_bandwidth_mibps, r_req);
    let s_m = match q.mixed_bandwidth() {
        Some(b_eff) => Bound::ratio(b_eff, w_req + q.read_cost_weight * r_req),
        None => Bound::Unbounded,
    };
    let s_max = s_w.min(s_r).min(s_m);
    let ops = s_max.map(|s| s * BYTES_PER_MIB / q.avg_record_size_bytes);

    let binding = [
        (Constraint::Write, s_w),
        (Constraint::Read, s_r),
        (Constraint::Mixed, s_m),
    ]
    .into_iter()
    .find(|&(_, b)| !b.is_unbounded() && b == s_max)
    .map(|(c, _)| c);

    log::debug!(
        "CR {:.2} WA {:.2}: w_req {:.4} r_req {:.4} s_max {:.2} MiB/s ({})",
        cr,
        wa,
        w_req,
        r_req,
        s_max,
        binding.map_or("none".to_string(), |c| c.to_string())
    );

    BoundResult {
        compression_ratio: cr,
        write_amplification: wa,
        w_req,
        r_req,
        s_w,
        s_r,
        s_m,
        s_max,
        ops,
        binding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> ThroughputQueryParams {
        ThroughputQueryParams {
            write_bandwidth_mibps: 1000.0,
            read_bandwidth_mibps: 2000.0,
            mixed_effective_bandwidth_mibps: Some(2500.0),
            read_cost_weight: 1.0,
            avg_record_size_bytes: 1024.0,
            compression_ratio_candidates: vec![1.0],
            write_amplification_candidates: vec![4.0],
            wal_write_factor: 1.0,
        }
    }

    #[test]
    fn write_bound_binds() {
        let r = bounds_for(&query(), 1.0, 4.0).unwrap();
        assert_eq!(r.w_req, 5.0);
        assert_eq!(r.r_req, 3.0);
        assert_eq!(r.s_w, Bound::Limited(200.0));
        assert!((r.s_r.as_f64() - 666.67).abs() < 0.01);
        assert_eq!(r.s_m, Bound::Limited(312.5));
        assert_eq!(r.s_max, Bound::Limited(200.0));
        assert_eq!(r.ops, Bound::Limited(204800.0));
        assert_eq!(r.binding, Some(Constraint::Write));
    }

    #[test]
    fn read_weight_can_make_mixed_bind() {
        let q = ThroughputQueryParams {
            read_cost_weight: 4.0,
            ..query()
        };
        let r = bounds_for(&q, 1.0, 4.0).unwrap();
        // 2500 / (5 + 4 * 3)
        assert!((r.s_m.as_f64() - 2500.0 / 17.0).abs() < 1e-9);
        assert_eq!(r.binding, Some(Constraint::Mixed));
    }

    #[test]
    fn missing_mixed_channel_is_unbounded() {
        let q = ThroughputQueryParams {
            mixed_effective_bandwidth_mibps: None,
            ..query()
        };
        let r = bounds_for(&q, 1.0, 4.0).unwrap();
        assert!(r.s_m.is_unbounded());
        assert_eq!(r.s_max, Bound::Limited(200.0));
    }

    #[test]
    fn no_demand_anywhere_is_unbounded() {
        let q = ThroughputQueryParams {
            wal_write_factor: 0.0,
            ..query()
        };
        let r = bounds_for(&q, 0.0, 1.0).unwrap();
        assert!(r.s_max.is_unbounded());
        assert!(r.ops.is_unbounded());
        assert_eq!(r.binding, None);
        assert_eq!(format!("{:.2}", r.ops), "inf");
    }

    #[test]
    fn rejects_bad_bandwidths_instead_of_unbounding() {
        let q = ThroughputQueryParams {
            write_bandwidth_mibps: -1000.0,
            ..query()
        };
        assert!(matches!(
            bounds_for(&q, 1.0, 4.0),
            Err(crate::error::ModelError::InvalidParameter(_))
        ));

        let q = ThroughputQueryParams {
            read_cost_weight: -10.0,
            ..query()
        };
        assert!(bounds_for(&q, 1.0, 4.0).is_err());
        assert!(bounds_for(&query(), f64::NAN, 4.0).is_err());
    }

    #[test]
    fn measured_pairs_are_not_range_checked() {
        let r = bounds_for(&query(), 1.0, 0.5).unwrap();
        assert_eq!(r.r_req, 0.0);
        assert!(r.s_r.is_unbounded());
    }

    #[test]
    fn rejects_non_positive_record_size() {
        let q = ThroughputQueryParams {
            avg_record_size_bytes: 0.0,
            ..query()
        };
        assert!(bounds_for(&q, 1.0, 4.0).is_err());
        assert!(estimate_bounds(&q).is_err());
    }
}
