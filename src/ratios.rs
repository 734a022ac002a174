//! Amplification and compression ratios from measured byte counters.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AmplificationSample {
    pub user_bytes_written: u64,
    pub user_bytes_read: u64,
    pub device_bytes_written: u64,
    pub device_bytes_read: u64,
    pub uncompressed_bytes: u64,
    pub compressed_bytes: u64,
}

/// A ratio is `None` when its denominator counter is zero.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct AmplificationRatios {
    pub write_amplification: Option<f64>,
    pub read_amplification: Option<f64>,
    pub compression_ratio: Option<f64>,
}

pub fn compute_ratios(sample: &AmplificationSample) -> AmplificationRatios {
    let ratios = AmplificationRatios {
        write_amplification: ratio(sample.device_bytes_written, sample.user_bytes_written),
        read_amplification: ratio(sample.device_bytes_read, sample.user_bytes_read),
        compression_ratio: ratio(sample.compressed_bytes, sample.uncompressed_bytes),
    };
    log::info!("measured ratios: {:?}", ratios);
    ratios
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_from_counters() {
        let sample = AmplificationSample {
            user_bytes_written: 1000,
            user_bytes_read: 400,
            device_bytes_written: 12_000,
            device_bytes_read: 1_000,
            uncompressed_bytes: 4096,
            compressed_bytes: 1024,
        };
        let r = compute_ratios(&sample);
        assert_eq!(r.write_amplification, Some(12.0));
        assert_eq!(r.read_amplification, Some(2.5));
        assert_eq!(r.compression_ratio, Some(0.25));
    }

    #[test]
    fn zero_denominators_are_absent() {
        let r = compute_ratios(&AmplificationSample {
            device_bytes_written: 10,
            ..Default::default()
        });
        assert_eq!(r.write_amplification, None);
        assert_eq!(r.read_amplification, None);
        assert_eq!(r.compression_ratio, None);
    }

    #[test]
    fn incompressible_data_reported_as_is() {
        let r = compute_ratios(&AmplificationSample {
            uncompressed_bytes: 100,
            compressed_bytes: 110,
            ..Default::default()
        });
        assert_eq!(r.compression_ratio, Some(1.1));
    }
}
