//! JSON-lines replay of recorded joint samples
//!
//! Every input line is one [`SampleRecord`]; every output line is the same
//! record with its pose replaced by the stabilized pose.

use std::io::{BufRead, Write};

use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StabilizerError};
use crate::filter::JointStabilizer;
use crate::joint::{HandSide, JointId};

/// One recorded joint sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub side: HandSide,
    pub joint: JointId,
    pub position: [f32; 3],
    /// Quaternion as `[x, y, z, w]`
    pub rotation: [f32; 4],
    /// Seconds
    pub timestamp: f64,
}

impl SampleRecord {
    pub fn pose(&self) -> (Vec3, Quat) {
        (Vec3::from_array(self.position), Quat::from_array(self.rotation))
    }

    pub fn with_pose(&self, position: Vec3, rotation: Quat) -> Self {
        Self {
            position: position.to_array(),
            rotation: rotation.to_array(),
            ..self.clone()
        }
    }
}

/// Counters reported after a replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub samples: usize,
    pub skipped_lines: usize,
}

/// Stabilize every record from `input`, writing filtered records to `output`
pub fn replay<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    stabilizer: &mut JointStabilizer,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            summary.skipped_lines += 1;
            continue;
        }

        let record: SampleRecord = serde_json::from_str(&line)
            .map_err(|source| StabilizerError::Replay { line: index + 1, source })?;

        let (position, rotation) = record.pose();
        let (position, rotation) =
            stabilizer.filter_joint(record.side, record.joint, position, rotation, record.timestamp);

        serde_json::to_writer(&mut output, &record.with_pose(position, rotation))?;
        output.write_all(b"\n")?;
        summary.samples += 1;
    }

    output.flush()?;
    debug!(samples = summary.samples, skipped = summary.skipped_lines, "Replay finished");
    Ok(summary)
}
