use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::params::{EngineShapeParameters, ThroughputQueryParams};
use crate::ratios::AmplificationSample;

#[derive(Parser, Debug)]
#[command(name = "lsm-ampcalc")]
#[command(version, about = "Leveled LSM I/O cost and throughput bound estimator")]
pub struct Cli {
    /// JSON config with `levels` and `throughput` sections
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit JSON instead of text tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Also write the output to this file
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Per-level read/write breakdown
    Levels(LevelArgs),

    /// Throughput bounds over a CR x WA grid
    Bounds(BoundArgs),

    /// WA, RA and CR from measured byte counters
    Ratios(RatioArgs),

    /// Level breakdown, the bound it implies, and the bound grid
    All {
        #[command(flatten)]
        levels: LevelArgs,
        #[command(flatten)]
        bounds: BoundArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct LevelArgs {
    /// User write rate (MiB/s)
    #[arg(long)]
    pub user_write_rate: Option<f64>,

    /// Number of levels below L0
    #[arg(long)]
    pub levels: Option<usize>,

    /// Size ratio between adjacent levels
    #[arg(long)]
    pub size_ratio: Option<f64>,

    /// Per-level compression ratios, L0 first
    #[arg(long, value_delimiter = ',')]
    pub compression: Option<Vec<f64>>,

    /// WAL bytes per user byte
    #[arg(id = "level_wal_factor", long = "level-wal-factor")]
    pub wal_factor: Option<f64>,

    /// Write bandwidth (MiB/s) used for utilization
    #[arg(id = "level_write_bw", long = "level-write-bw")]
    pub write_bw: Option<f64>,

    /// Read bandwidth (MiB/s) used for utilization
    #[arg(id = "level_read_bw", long = "level-read-bw")]
    pub read_bw: Option<f64>,
}

impl LevelArgs {
    pub fn apply(&self, params: &mut EngineShapeParameters) {
        if let Some(v) = self.user_write_rate {
            params.user_write_rate_mibps = v;
        }
        if let Some(v) = self.levels {
            params.level_count = v;
        }
        if let Some(v) = self.size_ratio {
            params.level_size_ratio = v;
        }
        if let Some(v) = &self.compression {
            params.compression_ratio_per_level = v.clone();
        }
        if let Some(v) = self.wal_factor {
            params.wal_write_factor = v;
        }
        if let Some(v) = self.write_bw {
            params.write_bandwidth_mibps = v;
        }
        if let Some(v) = self.read_bw {
            params.read_bandwidth_mibps = v;
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct BoundArgs {
    /// Write bandwidth (MiB/s), 0 for unconstrained
    #[arg(long)]
    pub write_bw: Option<f64>,

    /// Read bandwidth (MiB/s), 0 for unconstrained
    #[arg(long)]
    pub read_bw: Option<f64>,

    /// Shared channel bandwidth (MiB/s), 0 to disable
    #[arg(long)]
    pub mixed_bw: Option<f64>,

    /// Relative cost of reads on the shared channel
    #[arg(long)]
    pub eta: Option<f64>,

    /// Average record size in bytes
    #[arg(long)]
    pub record_size: Option<f64>,

    /// Compression ratio candidates
    #[arg(long, value_delimiter = ',')]
    pub cr: Option<Vec<f64>>,

    /// Write amplification candidates
    #[arg(long, value_delimiter = ',')]
    pub wa: Option<Vec<f64>>,

    /// WAL bytes per user byte
    #[arg(long)]
    pub wal_factor: Option<f64>,
}

impl BoundArgs {
    pub fn apply(&self, q: &mut ThroughputQueryParams) {
        if let Some(v) = self.write_bw {
            q.write_bandwidth_mibps = v;
        }
        if let Some(v) = self.read_bw {
            q.read_bandwidth_mibps = v;
        }
        if let Some(v) = self.mixed_bw {
            q.mixed_effective_bandwidth_mibps = Some(v);
        }
        if let Some(v) = self.eta {
            q.read_cost_weight = v;
        }
        if let Some(v) = self.record_size {
            q.avg_record_size_bytes = v;
        }
        if let Some(v) = &self.cr {
            q.compression_ratio_candidates = v.clone();
        }
        if let Some(v) = &self.wa {
            q.write_amplification_candidates = v.clone();
        }
        if let Some(v) = self.wal_factor {
            q.wal_write_factor = v;
        }
    }
}

#[derive(Args, Debug)]
pub struct RatioArgs {
    /// Bytes written by the user
    #[arg(long)]
    pub user_written: u64,
    /// Bytes written to the device
    #[arg(long)]
    pub device_written: u64,
    #[arg(long, default_value_t = 0)]
    pub user_read: u64,
    #[arg(long, default_value_t = 0)]
    pub device_read: u64,
    #[arg(long, default_value_t = 0)]
    pub uncompressed: u64,
    #[arg(long, default_value_t = 0)]
    pub compressed: u64,

    /// Evaluate the throughput bound for the measured CR and WA
    #[arg(long)]
    pub bound: bool,
}

impl RatioArgs {
    pub fn sample(&self) -> AmplificationSample {
        AmplificationSample {
            user_bytes_written: self.user_written,
            user_bytes_read: self.user_read,
            device_bytes_written: self.device_written,
            device_bytes_read: self.device_read,
            uncompressed_bytes: self.uncompressed,
            compressed_bytes: self.compressed,
        }
    }
}
