/// Struct to represent a captured frame with timestamp
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FrameData {
    /// JPEG bytes wrapped in a `data:image/jpeg;base64,` URI, ready for
    /// embedding in JSON API calls.
    pub base64: String,
    /// The time actually captured, in seconds. Equals the requested
    /// timestamp unless it was clamped to the resource duration.
    pub timestamp: f64,
    pub width: u32,
    pub height: u32,
}
