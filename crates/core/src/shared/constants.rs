pub const BLAZEFACE_MODEL_NAME: &str = "blazeface_short_range.onnx";
pub const BLAZEFACE_MODEL_URL: &str =
    "https://github.com/facecapture/facecapture/releases/download/v0.1.0/blazeface_short_range.onnx";

/// Default root for captured face images; one subdirectory per user.
pub const RAW_DATA_DIR: &str = "artifacts/raw";

pub const CAPTURE_FILE_PREFIX: &str = "captured_face";

/// Second-granularity timestamp embedded in capture file names.
pub const CAPTURE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";
