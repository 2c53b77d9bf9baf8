use std::path::{Path, PathBuf};

use crate::capture::domain::display::{ControlSignal, FrameDisplay};
use crate::capture::domain::frame_source::FrameSource;
use crate::capture::domain::image_writer::ImageWriter;
use crate::capture::domain::overlay::{draw_rectangles, BOX_COLOR, BOX_THICKNESS};
use crate::detection::domain::box_deduplicator::BoxDeduplicator;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::{CAPTURE_FILE_PREFIX, CAPTURE_TIMESTAMP_FORMAT};
use crate::shared::error::CaptureError;
use crate::shared::frame::Frame;

/// Loop totals, logged at exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureSummary {
    pub frames_processed: usize,
    pub faces_saved: usize,
}

/// Runs the interactive capture loop: read a frame, detect faces, merge
/// overlapping boxes, render, and save a crop when the user asks.
///
/// One frame is fully processed before the next is acquired; the merged
/// box set is recomputed from scratch every frame and nothing carries
/// over between iterations.
pub struct CaptureFacesUseCase {
    source: Box<dyn FrameSource>,
    detector: Box<dyn FaceDetector>,
    deduplicator: Box<dyn BoxDeduplicator>,
    display: Box<dyn FrameDisplay>,
    image_writer: Box<dyn ImageWriter>,
    output_root: PathBuf,
}

impl CaptureFacesUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn FaceDetector>,
        deduplicator: Box<dyn BoxDeduplicator>,
        display: Box<dyn FrameDisplay>,
        image_writer: Box<dyn ImageWriter>,
        output_root: &Path,
    ) -> Self {
        Self {
            source,
            detector,
            deduplicator,
            display,
            image_writer,
            output_root: output_root.to_path_buf(),
        }
    }

    /// Runs the loop until the quit signal or the end of the stream.
    ///
    /// The camera is released on every exit path. A frame-read failure
    /// ends the loop gracefully; anything else escaping the loop is
    /// logged and wrapped in [`CaptureError::Unexpected`].
    pub fn execute(&mut self, user_name: &str) -> Result<CaptureSummary, CaptureError> {
        log::info!("starting face capture for user '{user_name}'");

        if let Err(e) = self.source.open() {
            log::error!("could not open camera: {e}");
            return Err(CaptureError::DeviceOpen(e.to_string()));
        }

        let result = self.run_loop(user_name);
        self.source.close();

        match result {
            Ok(summary) => {
                log::info!(
                    "capture ended: {} frames processed, {} faces saved",
                    summary.frames_processed,
                    summary.faces_saved
                );
                Ok(summary)
            }
            Err(e) => {
                log::error!("capture loop failed: {e}");
                Err(CaptureError::unexpected(e))
            }
        }
    }

    fn run_loop(&mut self, user_name: &str) -> Result<CaptureSummary, Box<dyn std::error::Error>> {
        let mut summary = CaptureSummary::default();

        loop {
            let frame = match self.source.read() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    log::warn!("camera stream ended");
                    break;
                }
                Err(e) => {
                    log::error!("could not read frame from camera: {e}");
                    break;
                }
            };
            summary.frames_processed += 1;

            let merged = self
                .detect_and_merge(&frame)
                .map_err(|e| format!("face detection failed: {e}"))?;

            let mut annotated = frame.clone();
            draw_rectangles(&mut annotated, &merged, BOX_COLOR, BOX_THICKNESS);
            self.display
                .show(&annotated)
                .map_err(|e| format!("preview display failed: {e}"))?;

            let signal = self
                .display
                .poll()
                .map_err(|e| format!("input polling failed: {e}"))?;

            match signal {
                ControlSignal::Capture => {
                    // Saves whatever box currently sits at index 0
                    if let Some(first) = merged.first() {
                        if self.save_face(&frame, first, user_name)?.is_some() {
                            summary.faces_saved += 1;
                        }
                    } else {
                        log::warn!("capture requested but no face detected");
                    }
                }
                ControlSignal::Quit => break,
                ControlSignal::None => {}
            }
        }

        Ok(summary)
    }

    fn detect_and_merge(
        &mut self,
        frame: &Frame,
    ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        let detections = self.detector.detect(frame)?;
        let boxes: Vec<BoundingBox> = detections
            .iter()
            .map(|d| d.to_pixels(frame.width(), frame.height()))
            .collect();
        Ok(self.deduplicator.merge(&boxes))
    }

    fn save_face(
        &self,
        frame: &Frame,
        region: &BoundingBox,
        user_name: &str,
    ) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
        let crop = frame.crop(region);
        if crop.width() == 0 || crop.height() == 0 {
            log::warn!("skipping capture: face region lies outside the frame");
            return Ok(None);
        }

        let timestamp = chrono::Local::now().format(CAPTURE_TIMESTAMP_FORMAT);
        let path = self
            .output_root
            .join(user_name)
            .join(format!("{CAPTURE_FILE_PREFIX}-{timestamp}.jpg"));

        self.image_writer
            .write(&path, &crop)
            .map_err(|e| format!("could not write {}: {e}", path.display()))?;
        log::info!("saved captured face to {}", path.display());
        Ok(Some(path))
    }
}
