use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;

/// Webcam frame source backed by `opencv::videoio`.
///
/// OpenCV delivers BGR; conversion to the internal RGB [`Frame`] layout
/// happens here, at the I/O boundary.
pub struct OpencvCamera {
    device: u32,
    capture: Option<VideoCapture>,
    next_index: usize,
}

impl OpencvCamera {
    pub fn new(device: u32) -> Self {
        Self {
            device,
            capture: None,
            next_index: 0,
        }
    }
}

impl FrameSource for OpencvCamera {
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let capture = VideoCapture::new(self.device as i32, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(format!("device index {} did not open", self.device).into());
        }
        self.capture = Some(capture);
        self.next_index = 0;
        Ok(())
    }

    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let capture = self
            .capture
            .as_mut()
            .ok_or("OpencvCamera: read before open")?;

        let mut mat = Mat::default();
        if !capture.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }

        let frame = bgr_mat_to_frame(&mat, self.next_index)?;
        self.next_index += 1;
        Ok(Some(frame))
    }

    fn close(&mut self) {
        // VideoCapture releases the device on drop
        self.capture = None;
    }
}

fn bgr_mat_to_frame(mat: &Mat, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    if mat.channels() != 3 {
        return Err(format!("expected a 3-channel BGR frame, got {}", mat.channels()).into());
    }
    let width = mat.cols() as u32;
    let height = mat.rows() as u32;

    // data_bytes() requires a continuous Mat; camera frames always are
    let bgr = mat.data_bytes()?;
    let mut rgb = Vec::with_capacity(bgr.len());
    for px in bgr.chunks_exact(3) {
        rgb.push(px[2]);
        rgb.push(px[1]);
        rgb.push(px[0]);
    }

    Ok(Frame::new(rgb, width, height, 3, index))
}
