pub mod box_deduplicator;
pub mod face_detector;
