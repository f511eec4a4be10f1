//! Maps client state to what the front ends display
//!
//! Everything here is a pure function of [`ClientState`]; the terminal UI and
//! the plain output only decide how to draw it.

use crate::scan_state::{ClientState, ScanStatus};
use crate::size::SizeFormat;

/// Counters shown while the scan is running
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBlock {
    pub item_count: u64,
    pub size: String,
}

/// One slice of the summary chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSlice {
    pub value: u64,
    /// RGB color of the slice
    pub color: (u8, u8, u8),
}

/// Summary visualization shown once the scan is done
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryChart {
    pub slices: Vec<ChartSlice>,
}

/// Placeholder dataset; the chart is not fed from scan results yet.
const SUMMARY_DATASET: [ChartSlice; 3] = [
    ChartSlice { value: 1, color: (0xff, 0x00, 0x00) },
    ChartSlice { value: 2, color: (0x00, 0xff, 0x00) },
    ChartSlice { value: 3, color: (0x00, 0x00, 0xff) },
];

/// Complete presentation of one state snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub status: Option<&'static str>,
    pub progress: Option<ProgressBlock>,
    pub chart: Option<SummaryChart>,
}

/// Status label, present only once progress has been seen
pub fn status_label(state: &ClientState) -> Option<&'static str> {
    match state.status {
        ScanStatus::Unset => None,
        ScanStatus::Scanning => Some("Scanning..."),
        ScanStatus::Done => Some("Done"),
    }
}

/// Progress counters, present only while scanning
pub fn progress_block(state: &ClientState, size_format: SizeFormat) -> Option<ProgressBlock> {
    if state.status != ScanStatus::Scanning {
        return None;
    }

    Some(ProgressBlock {
        item_count: state.item_count,
        size: size_format.format(state.total_size_bytes),
    })
}

/// Summary chart, present only once the scan is done
pub fn summary_chart(state: &ClientState) -> Option<SummaryChart> {
    if state.status != ScanStatus::Done {
        return None;
    }

    Some(SummaryChart {
        slices: SUMMARY_DATASET.to_vec(),
    })
}

pub fn present(state: &ClientState, size_format: SizeFormat) -> View {
    View {
        status: status_label(state),
        progress: progress_block(state, size_format),
        chart: summary_chart(state),
    }
}
