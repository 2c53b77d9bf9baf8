use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Outline color for detected face regions (RGB).
pub const BOX_COLOR: [u8; 3] = [0, 0, 255];

/// Outline thickness in pixels.
pub const BOX_THICKNESS: i32 = 2;

/// Draws rectangle outlines for each box directly into the RGB buffer,
/// clipped to the frame.
pub fn draw_rectangles(frame: &mut Frame, boxes: &[BoundingBox], color: [u8; 3], thickness: i32) {
    for b in boxes {
        draw_rectangle(frame, b, color, thickness);
    }
}

fn draw_rectangle(frame: &mut Frame, b: &BoundingBox, color: [u8; 3], thickness: i32) {
    let t = thickness.max(1);
    let (x1, y1) = (b.x, b.y);
    let (x2, y2) = (b.x + b.width, b.y + b.height);

    // Four edge bands; corners overlap, which is harmless.
    fill_band(frame, x1, y1, x2, y1 + t, color); // top
    fill_band(frame, x1, y2 - t, x2, y2, color); // bottom
    fill_band(frame, x1, y1, x1 + t, y2, color); // left
    fill_band(frame, x2 - t, y1, x2, y2, color); // right
}

fn fill_band(frame: &mut Frame, x1: i32, y1: i32, x2: i32, y2: i32, color: [u8; 3]) {
    let w = frame.width() as i32;
    let h = frame.height() as i32;
    let x1 = x1.clamp(0, w);
    let x2 = x2.clamp(0, w);
    let y1 = y1.clamp(0, h);
    let y2 = y2.clamp(0, h);

    let mut px = frame.as_ndarray_mut();
    for row in y1..y2 {
        for col in x1..x2 {
            for (c, &value) in color.iter().enumerate() {
                px[[row as usize, col as usize, c]] = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![0u8; (w * h * 3) as usize], w, h, 3, 0)
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let px = frame.as_ndarray();
        [px[[y, x, 0]], px[[y, x, 1]], px[[y, x, 2]]]
    }

    const RED: [u8; 3] = [255, 0, 0];

    #[test]
    fn test_draws_all_four_edges() {
        let mut frame = black_frame(20, 20);
        draw_rectangles(&mut frame, &[BoundingBox::new(5, 5, 10, 10)], RED, 1);

        assert_eq!(pixel(&frame, 10, 5), RED); // top edge
        assert_eq!(pixel(&frame, 10, 14), RED); // bottom edge
        assert_eq!(pixel(&frame, 5, 10), RED); // left edge
        assert_eq!(pixel(&frame, 14, 10), RED); // right edge
    }

    #[test]
    fn test_interior_left_untouched() {
        let mut frame = black_frame(20, 20);
        draw_rectangles(&mut frame, &[BoundingBox::new(5, 5, 10, 10)], RED, 2);
        assert_eq!(pixel(&frame, 10, 10), [0, 0, 0]);
    }

    #[test]
    fn test_thickness_widens_edges() {
        let mut frame = black_frame(20, 20);
        draw_rectangles(&mut frame, &[BoundingBox::new(5, 5, 10, 10)], RED, 2);
        assert_eq!(pixel(&frame, 10, 5), RED);
        assert_eq!(pixel(&frame, 10, 6), RED);
        assert_eq!(pixel(&frame, 10, 7), [0, 0, 0]);
    }

    #[test]
    fn test_box_overhanging_frame_is_clipped() {
        let mut frame = black_frame(10, 10);
        // Must not panic, and the visible part is drawn
        draw_rectangles(&mut frame, &[BoundingBox::new(-5, -5, 12, 12)], RED, 1);
        assert_eq!(pixel(&frame, 6, 3), RED); // right edge at x = -5 + 12 - 1
    }

    #[test]
    fn test_box_fully_outside_frame_is_noop() {
        let mut frame = black_frame(10, 10);
        draw_rectangles(&mut frame, &[BoundingBox::new(100, 100, 10, 10)], RED, 2);
        assert!(frame.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_multiple_boxes_drawn() {
        let mut frame = black_frame(30, 30);
        let boxes = [BoundingBox::new(1, 1, 5, 5), BoundingBox::new(20, 20, 5, 5)];
        draw_rectangles(&mut frame, &boxes, RED, 1);
        assert_eq!(pixel(&frame, 1, 1), RED);
        assert_eq!(pixel(&frame, 20, 20), RED);
    }

    #[test]
    fn test_empty_box_list_is_noop() {
        let mut frame = black_frame(10, 10);
        draw_rectangles(&mut frame, &[], RED, 2);
        assert!(frame.data().iter().all(|&v| v == 0));
    }
}
