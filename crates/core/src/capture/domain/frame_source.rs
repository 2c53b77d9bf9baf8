use crate::shared::frame::Frame;

/// Provides frames from a camera or other live source.
///
/// The source exclusively owns its device between `open` and `close`;
/// the capture loop releases it on every exit path.
pub trait FrameSource: Send {
    /// Acquires the device. Fails if the device cannot be opened.
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Blocks until the next frame is available. `Ok(None)` means the
    /// stream has ended.
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the device.
    fn close(&mut self);
}
