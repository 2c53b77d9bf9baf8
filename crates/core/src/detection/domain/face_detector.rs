use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// A raw detection in the detector's native relative coordinates,
/// each component in `[0.0, 1.0]` of the frame dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelativeDetection {
    pub xmin: f64,
    pub ymin: f64,
    pub width: f64,
    pub height: f64,
    pub score: f64,
}

impl RelativeDetection {
    /// Scales into pixel space, truncating toward zero so boxes stay
    /// pixel-aligned.
    pub fn to_pixels(&self, frame_width: u32, frame_height: u32) -> BoundingBox {
        BoundingBox::new(
            (self.xmin * frame_width as f64) as i32,
            (self.ymin * frame_height as f64) as i32,
            (self.width * frame_width as f64) as i32,
            (self.height * frame_height as f64) as i32,
        )
    }
}

/// Domain interface for face detection backends.
///
/// Implementations may hold inference state, hence `&mut self`. The
/// returned order is the backend's own and must be passed through to
/// the deduplicator unchanged.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame)
        -> Result<Vec<RelativeDetection>, Box<dyn std::error::Error>>;
}
