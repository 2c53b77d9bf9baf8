use ndarray::{ArrayView3, ArrayViewMut3};

use crate::shared::bounding_box::BoundingBox;

/// A single camera frame: contiguous RGB bytes in row-major order.
///
/// Pixel-format conversion (the camera delivers BGR) happens at I/O
/// boundaries only; everything above the infrastructure layer sees RGB.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies out the sub-frame covered by `region`, clamped to frame
    /// bounds. A region entirely outside the frame yields a zero-sized
    /// frame; callers decide whether that is worth persisting.
    pub fn crop(&self, region: &BoundingBox) -> Frame {
        let b = region.clamped_to(self.width as i32, self.height as i32);
        let (x1, y1) = (b.x as usize, b.y as usize);
        let (w, h) = (b.width as usize, b.height as usize);
        let channels = self.channels as usize;

        let src = self.as_ndarray();
        let mut data = Vec::with_capacity(w * h * channels);
        for row in y1..y1 + h {
            for col in x1..x1 + w {
                for c in 0..channels {
                    data.push(src[[row, col, c]]);
                }
            }
        }

        Frame::new(data, w as u32, h as u32, self.channels, self.index)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
