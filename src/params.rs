//! Input parameter records and the config file that carries them.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::{ModelError, Result};

/// Shape of a leveled engine, input to the per-level cost model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineShapeParameters {
    /// Sustained user write rate (MiB/s).
    pub user_write_rate_mibps: f64,
    /// Number of leveled tiers below the flush tier.
    pub level_count: usize,
    /// Size multiplier between adjacent levels.
    pub level_size_ratio: f64,
    /// One ratio per tier, flush tier first; `level_count + 1` entries.
    pub compression_ratio_per_level: Vec<f64>,
    /// WAL bytes written per user byte.
    pub wal_write_factor: f64,
    pub write_bandwidth_mibps: f64,
    pub read_bandwidth_mibps: f64,
}

impl Default for EngineShapeParameters {
    fn default() -> Self {
        EngineShapeParameters {
            user_write_rate_mibps: 100.0,
            level_count: 6,
            level_size_ratio: 10.0,
            compression_ratio_per_level: vec![1.0, 1.0, 0.6, 0.6, 0.5, 0.5, 0.5],
            wal_write_factor: 1.0,
            write_bandwidth_mibps: 1000.0,
            read_bandwidth_mibps: 2000.0,
        }
    }
}

impl EngineShapeParameters {
    pub fn validate(&self) -> Result<()> {
        non_negative("user_write_rate_mibps", self.user_write_rate_mibps)?;
        if self.level_count < 1 {
            return Err(ModelError::invalid("level_count must be at least 1"));
        }
        finite("level_size_ratio", self.level_size_ratio)?;
        if self.level_size_ratio <= 1.0 {
            return Err(ModelError::invalid(format!(
                "level_size_ratio must be greater than 1, got {}",
                self.level_size_ratio
            )));
        }
        let expected = self.level_count.checked_add(1).ok_or_else(|| {
            ModelError::invalid(format!("level_count {} is too large", self.level_count))
        })?;
        if self.compression_ratio_per_level.len() != expected {
            return Err(ModelError::invalid(format!(
                "compression_ratio_per_level has {} entries, expected level_count + 1 = {}",
                self.compression_ratio_per_level.len(),
                expected
            )));
        }
        for (i, &cr) in self.compression_ratio_per_level.iter().enumerate() {
            unit_fraction(&format!("compression_ratio_per_level[{}]", i), cr)?;
        }
        non_negative("wal_write_factor", self.wal_write_factor)?;
        non_negative("write_bandwidth_mibps", self.write_bandwidth_mibps)?;
        non_negative("read_bandwidth_mibps", self.read_bandwidth_mibps)?;
        Ok(())
    }

    /// `T / (T - 1)`, the fan-out correction used by the compaction terms.
    pub fn alpha(&self) -> Result<f64> {
        finite("level_size_ratio", self.level_size_ratio)?;
        if self.level_size_ratio <= 1.0 {
            return Err(ModelError::invalid(format!(
                "alpha is undefined for level_size_ratio {}",
                self.level_size_ratio
            )));
        }
        Ok(self.level_size_ratio / (self.level_size_ratio - 1.0))
    }
}

/// Inputs to the steady-state throughput bound estimator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct ThroughputQueryParams {
    /// Dedicated write bandwidth (MiB/s); 0 means unconstrained.
    pub write_bandwidth_mibps: f64,
    /// Dedicated read bandwidth (MiB/s); 0 means unconstrained.
    pub read_bandwidth_mibps: f64,
    /// Shared channel bandwidth; `None` or 0 means there is no shared channel.
    pub mixed_effective_bandwidth_mibps: Option<f64>,
    /// Cost of one unit of read bandwidth relative to write, on the shared channel.
    pub read_cost_weight: f64,
    pub avg_record_size_bytes: f64,
    pub compression_ratio_candidates: Vec<f64>,
    pub write_amplification_candidates: Vec<f64>,
    pub wal_write_factor: f64,
}

impl Default for ThroughputQueryParams {
    fn default() -> Self {
        ThroughputQueryParams {
            write_bandwidth_mibps: 1000.0,
            read_bandwidth_mibps: 2000.0,
            mixed_effective_bandwidth_mibps: Some(2500.0),
            read_cost_weight: 1.0,
            avg_record_size_bytes: 1024.0,
            compression_ratio_candidates: vec![1.0, 0.7, 0.5, 0.3],
            write_amplification_candidates: vec![2.0, 4.0, 8.0, 12.0, 16.0, 24.0],
            wal_write_factor: 1.0,
        }
    }
}

impl ThroughputQueryParams {
    /// Shared channel capacity, if one is configured.
    pub fn mixed_bandwidth(&self) -> Option<f64> {
        self.mixed_effective_bandwidth_mibps.filter(|&b| b > 0.0)
    }

    /// Checks everything except the candidate lists.
    pub fn validate_scalars(&self) -> Result<()> {
        finite("avg_record_size_bytes", self.avg_record_size_bytes)?;
        if self.avg_record_size_bytes <= 0.0 {
            return Err(ModelError::invalid(format!(
                "avg_record_size_bytes must be positive, got {}",
                self.avg_record_size_bytes
            )));
        }
        non_negative("write_bandwidth_mibps", self.write_bandwidth_mibps)?;
        non_negative("read_bandwidth_mibps", self.read_bandwidth_mibps)?;
        if let Some(b) = self.mixed_effective_bandwidth_mibps {
            non_negative("mixed_effective_bandwidth_mibps", b)?;
        }
        non_negative("read_cost_weight", self.read_cost_weight)?;
        non_negative("wal_write_factor", self.wal_write_factor)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_scalars()?;
        for (i, &cr) in self.compression_ratio_candidates.iter().enumerate() {
            unit_fraction(&format!("compression_ratio_candidates[{}]", i), cr)?;
        }
        for (i, &wa) in self.write_amplification_candidates.iter().enumerate() {
            finite(&format!("write_amplification_candidates[{}]", i), wa)?;
            if wa < 1.0 {
                return Err(ModelError::invalid(format!(
                    "write_amplification_candidates[{}] must be at least 1, got {}",
                    i, wa
                )));
            }
        }
        Ok(())
    }
}

/// On-disk config: both parameter groups, each optional in the file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub levels: EngineShapeParameters,
    pub throughput: ThroughputQueryParams,
}

impl ModelConfig {
    /// Reads a JSON config; missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<ModelConfig> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config: ModelConfig = serde_json::from_str(&raw)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

fn finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::invalid(format!("{} must be finite, got {}", name, value)))
    }
}

pub(crate) fn non_negative(name: &str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(ModelError::invalid(format!("{} must not be negative, got {}", name, value)));
    }
    Ok(())
}

fn unit_fraction(name: &str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value <= 0.0 || value > 1.0 {
        return Err(ModelError::invalid(format!("{} must be in (0, 1], got {}", name, value)));
    }
    Ok(())
}
