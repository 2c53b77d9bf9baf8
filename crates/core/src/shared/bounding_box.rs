/// An axis-aligned detection box in pixel coordinates.
///
/// `(x, y)` is the top-left corner. Boxes are immutable values; merging
/// produces new boxes rather than mutating inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    /// Intersection-over-Union of two boxes, always in `[0.0, 1.0]`.
    ///
    /// Returns exactly 0.0 for disjoint boxes without dividing, and 0.0
    /// for the degenerate case where both boxes have zero union area.
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let x_left = self.x.max(other.x);
        let y_top = self.y.max(other.y);
        let x_right = (self.x + self.width).min(other.x + other.width);
        let y_bottom = (self.y + self.height).min(other.y + other.height);

        if x_right < x_left || y_bottom < y_top {
            return 0.0;
        }

        let intersection = (x_right - x_left) as f64 * (y_bottom - y_top) as f64;
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return 0.0;
        }
        intersection / union
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union_with(&self, other: &BoundingBox) -> BoundingBox {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = (self.x + self.width).max(other.x + other.width);
        let y2 = (self.y + self.height).max(other.y + other.height);
        BoundingBox::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Clamps the box to `[0, frame_width] × [0, frame_height]`.
    ///
    /// A box entirely outside the frame collapses to zero width or height.
    pub fn clamped_to(&self, frame_width: i32, frame_height: i32) -> BoundingBox {
        let x1 = self.x.clamp(0, frame_width);
        let y1 = self.y.clamp(0, frame_height);
        let x2 = (self.x + self.width).clamp(x1, frame_width);
        let y2 = (self.y + self.height).clamp(y1, frame_height);
        BoundingBox::new(x1, y1, x2 - x1, y2 - y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn bbox(x: i32, y: i32, w: i32, h: i32) -> BoundingBox {
        BoundingBox::new(x, y, w, h)
    }

    // ── IoU ──────────────────────────────────────────────────────────

    #[test]
    fn test_iou_identical_boxes() {
        let a = bbox(10, 10, 100, 100);
        assert_relative_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn test_iou_disjoint_boxes() {
        let a = bbox(0, 0, 50, 50);
        let b = bbox(100, 100, 50, 50);
        assert_relative_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        // a: [0,0]-[10,10], b: [2,2]-[12,12]
        // intersection: [2,2]-[10,10] = 64
        // union: 100 + 100 - 64 = 136
        let a = bbox(0, 0, 10, 10);
        let b = bbox(2, 2, 10, 10);
        assert_relative_eq!(a.iou(&b), 64.0 / 136.0);
    }

    #[test]
    fn test_iou_contained_box() {
        let a = bbox(0, 0, 100, 100);
        let b = bbox(25, 25, 50, 50);
        assert_relative_eq!(a.iou(&b), 2500.0 / 10000.0);
    }

    #[test]
    fn test_iou_touching_edges_is_zero() {
        let a = bbox(0, 0, 50, 50);
        let b = bbox(50, 0, 50, 50);
        assert_relative_eq!(a.iou(&b), 0.0);
    }

    #[rstest]
    #[case::left_right(bbox(0, 0, 10, 10), bbox(2, 2, 10, 10))]
    #[case::nested(bbox(0, 0, 100, 100), bbox(25, 25, 50, 50))]
    #[case::disjoint(bbox(0, 0, 5, 5), bbox(50, 50, 5, 5))]
    fn test_iou_symmetric(#[case] a: BoundingBox, #[case] b: BoundingBox) {
        assert_relative_eq!(a.iou(&b), b.iou(&a));
    }

    #[rstest]
    #[case(bbox(0, 0, 10, 10), bbox(2, 2, 10, 10))]
    #[case(bbox(0, 0, 10, 10), bbox(0, 0, 10, 10))]
    #[case(bbox(0, 0, 0, 0), bbox(0, 0, 0, 0))]
    #[case(bbox(-5, -5, 10, 10), bbox(0, 0, 10, 10))]
    fn test_iou_in_unit_range(#[case] a: BoundingBox, #[case] b: BoundingBox) {
        let iou = a.iou(&b);
        assert!((0.0..=1.0).contains(&iou));
    }

    #[rstest]
    #[case::zero_width(bbox(0, 0, 0, 100), bbox(0, 0, 50, 50))]
    #[case::zero_height(bbox(0, 0, 100, 0), bbox(0, 0, 50, 50))]
    fn test_iou_zero_area_box(#[case] a: BoundingBox, #[case] b: BoundingBox) {
        assert_relative_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_two_zero_area_boxes_at_same_spot() {
        // Union area is zero; must not divide.
        let a = bbox(5, 5, 0, 0);
        assert_relative_eq!(a.iou(&a), 0.0);
    }

    #[test]
    fn test_iou_exactly_half() {
        // intersection 4, union 4 + 8 - 4 = 8
        let a = bbox(0, 0, 2, 2);
        let b = bbox(0, 0, 2, 4);
        assert_relative_eq!(a.iou(&b), 0.5);
    }

    // ── Union ────────────────────────────────────────────────────────

    #[test]
    fn test_union_with_overlapping() {
        let a = bbox(0, 0, 10, 10);
        let b = bbox(2, 2, 10, 10);
        assert_eq!(a.union_with(&b), bbox(0, 0, 12, 12));
    }

    #[test]
    fn test_union_with_disjoint() {
        let a = bbox(0, 0, 4, 4);
        let b = bbox(10, 20, 4, 4);
        assert_eq!(a.union_with(&b), bbox(0, 0, 14, 24));
    }

    #[test]
    fn test_union_with_contained() {
        let a = bbox(0, 0, 100, 100);
        let b = bbox(25, 25, 50, 50);
        assert_eq!(a.union_with(&b), a);
    }

    #[test]
    fn test_union_with_negative_coordinates() {
        let a = bbox(-5, -5, 10, 10);
        let b = bbox(0, 0, 10, 10);
        assert_eq!(a.union_with(&b), bbox(-5, -5, 15, 15));
    }

    // ── Clamping ─────────────────────────────────────────────────────

    #[test]
    fn test_clamped_to_inside_unchanged() {
        let b = bbox(10, 10, 20, 20);
        assert_eq!(b.clamped_to(100, 100), b);
    }

    #[test]
    fn test_clamped_to_cuts_negative_origin() {
        let b = bbox(-10, -5, 30, 30);
        assert_eq!(b.clamped_to(100, 100), bbox(0, 0, 20, 25));
    }

    #[test]
    fn test_clamped_to_cuts_overhang() {
        let b = bbox(90, 95, 30, 30);
        assert_eq!(b.clamped_to(100, 100), bbox(90, 95, 10, 5));
    }

    #[test]
    fn test_clamped_to_fully_outside_collapses() {
        let b = bbox(200, 200, 30, 30);
        let clamped = b.clamped_to(100, 100);
        assert_eq!(clamped.width, 0);
        assert_eq!(clamped.height, 0);
    }
}
