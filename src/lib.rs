pub mod envelope;
pub use envelope::{
    extract_entity, extract_list, extract_payload, extract_session, ListKind, MAX_ENVELOPE_DEPTH,
};

pub mod frames;
pub use frames::{
    sample_frames, sample_frames_cancellable, CancellationToken, DecodeSession, FrameData,
    H264StreamSession,
};

pub mod source;
pub use source::{fetch_json, load_bytes};

pub mod errors;
pub use errors::{
    FrameError, MediaLoadError, RallyMediaError, RallyMediaResult, SeekError, StreamError,
};

/// Open `source` as an H.264 elementary stream and capture one still image
/// per timestamp, in input order.
///
/// `source` may be a `http(s)://` URL or a local path; `frame_rate` fixes
/// the stream timeline (elementary streams carry no container timing).
pub async fn sample_video_frames(
    source: String,
    frame_rate: f64,
    timestamps: &[f64],
    max_width: u32,
    max_height: u32,
) -> RallyMediaResult<Vec<FrameData>> {
    let session = H264StreamSession::open(&source, frame_rate).await?;
    frames::sample_frames(session, timestamps, max_width, max_height).await
}

/// Fetch a response envelope from a remote endpoint.
pub async fn fetch_envelope(url: String) -> RallyMediaResult<serde_json::Value> {
    source::fetch_json(&url).await
}
