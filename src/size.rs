//! Human-readable byte sizes for the progress readout

use serde::{Deserialize, Serialize};

/// How byte counts are rendered in the progress block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SizeFormat {
    /// TiB above 1e12 bytes, GiB above 1e9 bytes, raw bytes otherwise
    #[default]
    Legacy,
    /// Full IEC ladder (KiB, MiB, GiB, ...)
    Binary,
}

impl SizeFormat {
    pub fn format(self, bytes: u64) -> String {
        match self {
            SizeFormat::Legacy => format_size(bytes),
            SizeFormat::Binary => bytesize::to_string(bytes, true),
        }
    }
}

/// Format a byte count the way the scanner's web client always has.
///
/// The MiB and KiB rungs share the `> 1e9` threshold with GiB, so they are
/// never selected: anything up to 1e9 bytes prints as plain bytes.
/// Use [`SizeFormat::Binary`] for the corrected ladder.
pub fn format_size(bytes: u64) -> String {
    let size = bytes as f64;

    if size > 1e12 {
        format!("{} TiB", round_to_tenth(size, 40))
    } else if size > 1e9 {
        format!("{} GiB", round_to_tenth(size, 30))
    } else {
        format!("{} B", bytes)
    }
}

/// `size / 2^shift`, rounded to one decimal place
fn round_to_tenth(size: f64, shift: i32) -> f64 {
    (size / 2f64.powi(shift) * 10.0).round() / 10.0
}
