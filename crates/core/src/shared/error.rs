use thiserror::Error;

/// Errors escaping the capture loop.
///
/// Geometry and box merging are total functions and never produce one of
/// these; all variants come from the I/O boundary.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("could not open camera device: {0}")]
    DeviceOpen(String),
    #[error("unexpected error in {file}: {message}")]
    Unexpected { file: &'static str, message: String },
}

impl CaptureError {
    /// Wraps an unexpected error with the source file of the wrap site,
    /// so log entries point at the failing component.
    #[track_caller]
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        CaptureError::Unexpected {
            file: std::panic::Location::caller().file(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_open_message() {
        let err = CaptureError::DeviceOpen("device 0".into());
        assert_eq!(err.to_string(), "could not open camera device: device 0");
    }

    #[test]
    fn test_unexpected_records_wrap_site_file() {
        let err = CaptureError::unexpected("boom");
        let CaptureError::Unexpected { file, message } = err else {
            panic!("expected Unexpected variant");
        };
        assert!(file.ends_with("error.rs"));
        assert_eq!(message, "boom");
    }

    #[test]
    fn test_unexpected_display_includes_file_and_message() {
        let err = CaptureError::unexpected("camera exploded");
        let text = err.to_string();
        assert!(text.contains("unexpected error in"));
        assert!(text.contains("camera exploded"));
    }
}
