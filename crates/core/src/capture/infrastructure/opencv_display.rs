use opencv::core::{Mat, Scalar, CV_8UC3};
use opencv::highgui;
use opencv::prelude::*;

use crate::capture::domain::display::{ControlSignal, FrameDisplay};
use crate::shared::frame::Frame;

const CAPTURE_KEY: char = 'c';
const QUIT_KEY: char = 'q';

/// Preview window backed by `opencv::highgui`.
///
/// The window is created lazily on the first `show` and torn down on
/// drop, so a headless failure surfaces as an error from `show` rather
/// than at construction.
pub struct OpencvDisplay {
    window: String,
    window_created: bool,
}

impl OpencvDisplay {
    pub fn new(window: &str) -> Self {
        Self {
            window: window.to_string(),
            window_created: false,
        }
    }
}

impl FrameDisplay for OpencvDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if !self.window_created {
            highgui::named_window(&self.window, highgui::WINDOW_AUTOSIZE)?;
            self.window_created = true;
        }
        let mat = frame_to_bgr_mat(frame)?;
        highgui::imshow(&self.window, &mat)?;
        Ok(())
    }

    fn poll(&mut self) -> Result<ControlSignal, Box<dyn std::error::Error>> {
        let key = highgui::wait_key(1)?;
        Ok(signal_for_key(key))
    }
}

impl Drop for OpencvDisplay {
    fn drop(&mut self) {
        if self.window_created {
            let _ = highgui::destroy_window(&self.window);
        }
    }
}

fn signal_for_key(key: i32) -> ControlSignal {
    match key {
        k if k == CAPTURE_KEY as i32 => ControlSignal::Capture,
        k if k == QUIT_KEY as i32 => ControlSignal::Quit,
        _ => ControlSignal::None,
    }
}

fn frame_to_bgr_mat(frame: &Frame) -> Result<Mat, Box<dyn std::error::Error>> {
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        CV_8UC3,
        Scalar::all(0.0),
    )?;

    let bgr = mat.data_bytes_mut()?;
    for (dst, src) in bgr.chunks_exact_mut(3).zip(frame.data().chunks_exact(3)) {
        dst[0] = src[2];
        dst[1] = src[1];
        dst[2] = src[0];
    }

    Ok(mat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_key_maps_to_capture() {
        assert_eq!(signal_for_key('c' as i32), ControlSignal::Capture);
    }

    #[test]
    fn test_quit_key_maps_to_quit() {
        assert_eq!(signal_for_key('q' as i32), ControlSignal::Quit);
    }

    #[test]
    fn test_no_key_maps_to_none() {
        // highgui::wait_key returns -1 when no key was pressed
        assert_eq!(signal_for_key(-1), ControlSignal::None);
        assert_eq!(signal_for_key('x' as i32), ControlSignal::None);
    }

    #[test]
    fn test_frame_converts_to_bgr_mat() {
        // Solid red RGB (255, 0, 0) must come out as BGR (0, 0, 255)
        let frame = Frame::new(vec![255, 0, 0, 255, 0, 0], 2, 1, 3, 0);
        let mat = frame_to_bgr_mat(&frame).unwrap();
        assert_eq!(mat.rows(), 1);
        assert_eq!(mat.cols(), 2);
        assert_eq!(&mat.data_bytes().unwrap()[..3], &[0, 0, 255]);
    }
}
