mod annexb;
mod h264;
pub mod sampler;
mod session;
mod types;
mod utils;

pub use annexb::{scan_bytestream, NalKind, NalUnit};
pub use h264::H264StreamSession;
pub use sampler::{sample_frames, sample_frames_cancellable};
pub use session::{CancellationToken, DecodeSession};
pub use types::FrameData;
