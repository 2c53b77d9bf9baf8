use crate::shared::frame::Frame;

/// A discrete control signal polled once per loop iteration, decoupling
/// the capture loop from any particular UI toolkit's key handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlSignal {
    /// No input this iteration.
    None,
    /// Save the current frame's first merged face region.
    Capture,
    /// End the capture loop.
    Quit,
}

/// Renders annotated frames and reports user input.
pub trait FrameDisplay: Send {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Returns at most one signal per call.
    fn poll(&mut self) -> Result<ControlSignal, Box<dyn std::error::Error>>;
}
