//! Per-level read/write cost model for a leveled LSM engine.
//!
//! Every user byte is flushed once into L0, then compacted down through
//! L1..Ln. Compaction into level `i` reads the data arriving from level
//! `i - 1` plus the overlapping data already at `i` (scaled by
//! `alpha = T / (T - 1)` for fan-out `T`) and rewrites about `1 + alpha`
//! times the compressed volume destined for `i`. The WAL only writes.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::Result;
use crate::params::EngineShapeParameters;

/// Storage tier a row of the breakdown belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Flush,
    Level(usize),
    Wal,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Flush => f.pad("L0 (flush)"),
            Tier::Level(i) => f.pad(&format!("L{}", i)),
            Tier::Wal => f.pad("WAL"),
        }
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LevelRow {
    #[serde(rename = "level")]
    pub tier: Tier,
    pub read_mibps: f64,
    pub write_mibps: f64,
}

/// Bandwidth utilization in percent. Zero when the bandwidth is zero.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Utilization {
    pub read_pct: f64,
    pub write_pct: f64,
}

impl Utilization {
    fn of(read: f64, write: f64, read_bw: f64, write_bw: f64) -> Utilization {
        Utilization {
            read_pct: percent(read, read_bw),
            write_pct: percent(write, write_bw),
        }
    }

    pub fn oversubscribed(&self) -> bool {
        self.read_pct > 100.0 || self.write_pct > 100.0
    }
}

fn percent(rate: f64, bandwidth: f64) -> f64 {
    if bandwidth == 0.0 {
        0.0
    } else {
        100.0 * rate / bandwidth
    }
}

/// `(CR, WA)` pair recovered from a level breakdown.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ImpliedAmplification {
    pub compression_ratio: f64,
    pub write_amplification: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LevelCostReport {
    pub user_write_rate_mibps: f64,
    pub rows: Vec<LevelRow>,
    pub total_read_mibps: f64,
    pub total_write_mibps: f64,
    pub row_utilization: Vec<Utilization>,
    pub total_utilization: Utilization,
}

impl LevelCostReport {
    pub fn row(&self, tier: Tier) -> Option<&LevelRow> {
        self.rows.iter().find(|r| r.tier == tier)
    }

    /// Flush-tier compression ratio and the write amplification of the
    /// flush + compaction traffic (WAL excluded), relative to the
    /// compressed user stream. `None` when nothing is written.
    pub fn implied_amplification(&self) -> Option<ImpliedAmplification> {
        if self.user_write_rate_mibps <= 0.0 {
            return None;
        }
        let flush = self.row(Tier::Flush)?;
        let wal = self.row(Tier::Wal)?;
        let compression_ratio = flush.write_mibps / self.user_write_rate_mibps;
        if compression_ratio <= 0.0 {
            return None;
        }
        let write_amplification = (self.total_write_mibps - wal.write_mibps)
            / (self.user_write_rate_mibps * compression_ratio);
        Some(ImpliedAmplification {
            compression_ratio,
            write_amplification,
        })
    }
}

/// Computes the per-tier breakdown. Rows come out flush first, then
/// L1..Ln, then WAL; totals are summed in that order.
pub fn compute_level_costs(params: &EngineShapeParameters) -> Result<LevelCostReport> {
    params.validate()?;
    let alpha = params.alpha()?;
    let s = params.user_write_rate_mibps;
    let cr = &params.compression_ratio_per_level;

    let mut rows = Vec::with_capacity(params.level_count + 2);
    rows.push(LevelRow {
        tier: Tier::Flush,
        read_mibps: 0.0,
        write_mibps: s * cr[0],
    });
    for i in 1..=params.level_count {
        rows.push(LevelRow {
            tier: Tier::Level(i),
            read_mibps: s * (cr[i - 1] + cr[i] * alpha),
            write_mibps: s * cr[i] * (1.0 + alpha),
        });
    }
    rows.push(LevelRow {
        tier: Tier::Wal,
        read_mibps: 0.0,
        write_mibps: s * params.wal_write_factor,
    });

    let mut total_read = 0.0;
    let mut total_write = 0.0;
    let mut row_utilization = Vec::with_capacity(rows.len());
    for row in &rows {
        total_read += row.read_mibps;
        total_write += row.write_mibps;
        let util = Utilization::of(
            row.read_mibps,
            row.write_mibps,
            params.read_bandwidth_mibps,
            params.write_bandwidth_mibps,
        );
        log::debug!(
            "{}: read {:.2} MiB/s ({:.1}%), write {:.2} MiB/s ({:.1}%)",
            row.tier,
            row.read_mibps,
            util.read_pct,
            row.write_mibps,
            util.write_pct
        );
        row_utilization.push(util);
    }

    let total_utilization = Utilization::of(
        total_read,
        total_write,
        params.read_bandwidth_mibps,
        params.write_bandwidth_mibps,
    );
    log::info!(
        "level costs: {} tiers, total read {:.2} MiB/s, total write {:.2} MiB/s (alpha {:.4})",
        rows.len(),
        total_read,
        total_write,
        alpha
    );
    if total_utilization.oversubscribed() {
        log::warn!(
            "bandwidth oversubscribed: read {:.1}%, write {:.1}%",
            total_utilization.read_pct,
            total_utilization.write_pct
        );
    }

    Ok(LevelCostReport {
        user_write_rate_mibps: s,
        rows,
        total_read_mibps: total_read,
        total_write_mibps: total_write,
        row_utilization,
        total_utilization,
    })
}
