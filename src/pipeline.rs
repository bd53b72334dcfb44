//! Sequential frame loop: read frame -> detect -> hand result to a sink.
//!
//! The loop ends at the first frame the source cannot produce. Frames are not
//! retried or skipped.

use crate::error::Result;
use crate::tools::collect_images;
use crate::{DetectionTelemetry, Detector, StickerGrid};
use image::RgbImage;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplier of color frames, one at a time
pub trait FrameSource {
    /// Next frame, or `None` at end of stream
    fn next_frame(&mut self) -> Option<RgbImage>;
}

/// Frames stored as image files in one directory, read in file-name order.
///
/// An unreadable file ends the stream, like a dropped frame from a camera.
pub struct DirectoryFrames {
    paths: std::vec::IntoIter<PathBuf>,
}

impl DirectoryFrames {
    /// List the image files under `root`, optionally keeping only the first `limit`.
    ///
    /// Fails when `root` itself cannot be read; unreadable subdirectories are skipped.
    pub fn open<P: AsRef<Path>>(root: P, limit: Option<usize>) -> Result<Self> {
        let root = root.as_ref();
        fs::read_dir(root)?;
        let mut paths = collect_images(root);
        paths.sort();
        if let Some(limit) = limit {
            paths.truncate(limit);
        }
        Ok(Self {
            paths: paths.into_iter(),
        })
    }

    /// Frames not yet read
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl FrameSource for DirectoryFrames {
    fn next_frame(&mut self) -> Option<RgbImage> {
        let path = self.paths.next()?;
        match image::open(&path) {
            Ok(img) => {
                log::debug!("frame {}", path.display());
                Some(img.to_rgb8())
            }
            Err(err) => {
                log::warn!("stopping at unreadable frame {}: {}", path.display(), err);
                None
            }
        }
    }
}

/// In-memory frames, mostly for tests and benchmarks
impl FrameSource for std::vec::IntoIter<RgbImage> {
    fn next_frame(&mut self) -> Option<RgbImage> {
        self.next()
    }
}

/// Result of one frame of the loop
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    /// Zero-based frame number
    pub index: usize,
    /// Located face, if any
    pub grid: Option<StickerGrid>,
    /// Stage counters for the frame
    pub telemetry: DetectionTelemetry,
}

/// Totals over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Frames read from the source
    pub frames: usize,
    /// Frames in which a full grid was located
    pub frames_with_grid: usize,
}

/// Drive `source` to exhaustion, passing each frame and its report to `sink`.
pub fn run_frames<S, F>(source: &mut S, detector: &Detector, mut sink: F) -> ScanSummary
where
    S: FrameSource + ?Sized,
    F: FnMut(&RgbImage, &FrameReport),
{
    let mut summary = ScanSummary::default();

    while let Some(frame) = source.next_frame() {
        let (grid, telemetry) = detector.detect_frame_with_telemetry(&frame);
        let report = FrameReport {
            index: summary.frames,
            grid,
            telemetry,
        };

        summary.frames += 1;
        if report.grid.is_some() {
            summary.frames_with_grid += 1;
        }
        log::trace!(
            "frame {}: grid={} candidates={}",
            report.index,
            report.grid.is_some(),
            report.telemetry.candidates
        );
        sink(&frame, &report);
    }

    log::debug!(
        "frame loop finished: {} frames, {} with grid",
        summary.frames,
        summary.frames_with_grid
    );
    summary
}
