use super::annexb::{scan_bytestream, NalKind};
use super::session::DecodeSession;
use crate::errors::{FrameError, MediaLoadError, RallyMediaResult};
use crate::source;
use async_trait::async_trait;
use image::RgbImage;
use std::fmt;
use log::{debug, info};
use openh264::decoder::Decoder;
use openh264::formats::YUVSource;

const START_CODE: [u8; 4] = [0, 0, 0, 1];

/// Decode session over an H.264 Annex B elementary stream.
///
/// Elementary streams carry no container timing, so the timeline is derived
/// from a caller-supplied frame rate: slice `i` is shown at `i / frame_rate`
/// seconds. Forward seeks decode sequentially from the current position;
/// backward seeks recreate the decoder and replay from the start of the
/// stream, since the decoder exposes a single read position.
pub struct H264StreamSession {
    decoder: Decoder,
    /// SPS and PPS units with start codes, replayed after a decoder reset.
    parameter_sets: Vec<u8>,
    /// One start-code-prefixed video slice per frame, in stream order.
    frames: Vec<Vec<u8>>,
    frame_rate: f64,
    dimensions: (u32, u32),
    decoded_index: usize,
    current: RgbImage,
}

impl fmt::Debug for H264StreamSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The decoder handle is opaque; report the stream metadata only.
        f.debug_struct("H264StreamSession")
            .field("frames", &self.frames.len())
            .field("frame_rate", &self.frame_rate)
            .field("dimensions", &self.dimensions)
            .field("decoded_index", &self.decoded_index)
            .finish()
    }
}

impl H264StreamSession {
    /// Open a session over raw Annex B bytes.
    ///
    /// Fails with a media-load error when the stream has no parameter sets
    /// or no video slices, or when the first frame cannot be decoded (the
    /// first frame supplies the stream dimensions).
    pub fn from_bytes(data: &[u8], frame_rate: f64) -> RallyMediaResult<Self> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(MediaLoadError::new(format!("invalid frame rate: {}", frame_rate)).into());
        }

        let units = scan_bytestream(data);
        if units.is_empty() {
            return Err(MediaLoadError::new("no NAL units found in stream").into());
        }

        let mut parameter_sets = Vec::new();
        let mut frames = Vec::new();
        for unit in &units {
            match unit.kind {
                NalKind::Sps | NalKind::Pps => {
                    parameter_sets.extend_from_slice(&START_CODE);
                    parameter_sets.extend_from_slice(&unit.data);
                }
                kind if kind.is_slice() => {
                    let mut frame = Vec::with_capacity(START_CODE.len() + unit.data.len());
                    frame.extend_from_slice(&START_CODE);
                    frame.extend_from_slice(&unit.data);
                    frames.push(frame);
                }
                _ => {}
            }
        }

        if parameter_sets.is_empty() {
            return Err(MediaLoadError::new("stream carries no SPS/PPS parameter sets").into());
        }
        if frames.is_empty() {
            return Err(MediaLoadError::new("stream carries no video slices").into());
        }

        let mut decoder = Decoder::new()
            .map_err(|e| MediaLoadError::new(format!("failed to create decoder: {}", e)))?;
        feed_parameter_sets(&mut decoder, &parameter_sets)?;

        // The first decoded frame supplies the stream metadata.
        let current = decode_frame(&mut decoder, &frames[0])
            .map_err(|e| MediaLoadError::new(format!("failed to decode first frame: {}", e)))?;
        let dimensions = (current.width(), current.height());

        info!(
            "Opened H.264 stream: {} frames at {:.2} fps, {}x{}",
            frames.len(),
            frame_rate,
            dimensions.0,
            dimensions.1
        );

        Ok(Self {
            decoder,
            parameter_sets,
            frames,
            frame_rate,
            dimensions,
            decoded_index: 0,
            current,
        })
    }

    /// Load `source` (a `http(s)://` URL or a local path) and open a session
    /// over its bytes.
    pub async fn open(source: &str, frame_rate: f64) -> RallyMediaResult<Self> {
        let bytes = source::load_bytes(source).await?;
        Self::from_bytes(&bytes, frame_rate)
    }

    /// Number of video frames in the stream.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame_index_for(&self, timestamp: f64) -> usize {
        let index = (timestamp * self.frame_rate).floor() as usize;
        index.min(self.frames.len() - 1)
    }

    fn reset(&mut self) -> RallyMediaResult<()> {
        let mut decoder = Decoder::new()
            .map_err(|e| FrameError::new(format!("failed to recreate decoder: {}", e)))?;
        feed_parameter_sets(&mut decoder, &self.parameter_sets)?;
        self.current = decode_frame(&mut decoder, &self.frames[0])?;
        self.decoder = decoder;
        self.decoded_index = 0;
        Ok(())
    }
}

#[async_trait]
impl DecodeSession for H264StreamSession {
    fn duration(&self) -> f64 {
        self.frames.len() as f64 / self.frame_rate
    }

    fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    async fn seek(&mut self, timestamp: f64) -> RallyMediaResult<()> {
        let target = self.frame_index_for(timestamp);

        if target < self.decoded_index {
            debug!(
                "Backward seek to frame {}, replaying stream from the start",
                target
            );
            self.reset()?;
        }

        while self.decoded_index < target {
            let next = self.decoded_index + 1;
            self.current = decode_frame(&mut self.decoder, &self.frames[next])?;
            self.decoded_index = next;
        }

        Ok(())
    }

    fn current_frame(&mut self) -> RallyMediaResult<RgbImage> {
        Ok(self.current.clone())
    }
}

fn feed_parameter_sets(decoder: &mut Decoder, parameter_sets: &[u8]) -> RallyMediaResult<()> {
    decoder.decode(parameter_sets).map_err(|e| {
        MediaLoadError::new(format!(
            "failed to initialize decoder with parameter sets: {}",
            e
        ))
    })?;
    Ok(())
}

fn decode_frame(decoder: &mut Decoder, frame_data: &[u8]) -> RallyMediaResult<RgbImage> {
    match decoder.decode(frame_data) {
        Ok(Some(yuv)) => {
            let dimensions = yuv.dimensions();
            let mut rgb_data = vec![0u8; yuv.rgb8_len()];
            yuv.write_rgb8(&mut rgb_data);

            RgbImage::from_raw(dimensions.0 as u32, dimensions.1 as u32, rgb_data).ok_or_else(
                || FrameError::new("failed to build RGB image from decoded frame").into(),
            )
        }
        Ok(None) => Err(FrameError::new("decoder produced no frame for slice").into()),
        Err(e) => Err(FrameError::new(format!("H.264 decoding failed: {}", e)).into()),
    }
}
