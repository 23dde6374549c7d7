use super::session::{CancellationToken, DecodeSession};
use super::types::FrameData;
use super::utils::{encode_jpeg_base64, resize_to_fit, JPEG_QUALITY};
use crate::errors::{RallyMediaError, RallyMediaResult, SeekError};
use log::{debug, info};

/// Capture one encoded still per timestamp, in input order.
///
/// The session is owned by the call and released on every exit path. On
/// success the result holds exactly one [`FrameData`] per input timestamp;
/// any failure returns an error and no frames. Timestamps past the resource
/// duration are clamped to it before seeking.
pub async fn sample_frames<S: DecodeSession>(
    session: S,
    timestamps: &[f64],
    max_width: u32,
    max_height: u32,
) -> RallyMediaResult<Vec<FrameData>> {
    sample_frames_cancellable(
        session,
        timestamps,
        max_width,
        max_height,
        &CancellationToken::new(),
    )
    .await
}

/// Like [`sample_frames`], with a cooperative cancellation token checked
/// before each seek step.
pub async fn sample_frames_cancellable<S: DecodeSession>(
    mut session: S,
    timestamps: &[f64],
    max_width: u32,
    max_height: u32,
    token: &CancellationToken,
) -> RallyMediaResult<Vec<FrameData>> {
    let duration = session.duration();
    info!(
        "Sampling {} frames from a {:.2}s resource",
        timestamps.len(),
        duration
    );

    let mut frames = Vec::with_capacity(timestamps.len());

    // One in-flight seek at a time: the session exposes a single read position.
    for &requested in timestamps {
        if token.is_cancelled() {
            info!(
                "Sampling cancelled after {} of {} frames",
                frames.len(),
                timestamps.len()
            );
            return Err(RallyMediaError::Cancelled);
        }

        let target = requested.clamp(0.0, duration);
        if target != requested {
            debug!(
                "Clamped timestamp {:.3}s into [0, {:.3}]",
                requested, duration
            );
        }

        session
            .seek(target)
            .await
            .map_err(|e| SeekError::new(requested, e.to_string()))?;

        let frame = session.current_frame()?;
        let resized = resize_to_fit(frame, max_width, max_height);
        let base64 = encode_jpeg_base64(&resized, JPEG_QUALITY)?;

        debug!(
            "Captured frame at {:.3}s ({}x{})",
            target,
            resized.width(),
            resized.height()
        );

        frames.push(FrameData {
            base64,
            timestamp: target,
            width: resized.width(),
            height: resized.height(),
        });
    }

    info!("Captured {} frames", frames.len());
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::session::MockDecodeSession;
    use crate::errors::StreamError;
    use image::{Rgb, RgbImage};
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn solid_frame(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([8, 120, 60]))
    }

    #[tokio::test]
    async fn test_output_matches_input_order_and_length() {
        let mut session = MockDecodeSession::new();
        session.expect_duration().return_const(10.0f64);

        let mut seq = Sequence::new();
        for t in [1.0, 2.5, 7.25] {
            session
                .expect_seek()
                .with(eq(t))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
            session
                .expect_current_frame()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|| Ok(solid_frame(64, 48)));
        }

        let frames = sample_frames(session, &[1.0, 2.5, 7.25], 320, 180)
            .await
            .unwrap();

        assert_eq!(frames.len(), 3);
        let times: Vec<f64> = frames.iter().map(|f| f.timestamp).collect();
        assert_eq!(times, vec![1.0, 2.5, 7.25]);
        for frame in &frames {
            assert!(frame.base64.starts_with("data:image/jpeg;base64,"));
            assert_eq!((frame.width, frame.height), (64, 48));
        }
    }

    #[tokio::test]
    async fn test_timestamps_clamped_to_duration() {
        let mut session = MockDecodeSession::new();
        session.expect_duration().return_const(5.0f64);
        session
            .expect_seek()
            .with(eq(5.0))
            .times(1)
            .returning(|_| Ok(()));
        session
            .expect_current_frame()
            .returning(|| Ok(solid_frame(64, 48)));

        let frames = sample_frames(session, &[9.0], 320, 180).await.unwrap();
        assert_eq!(frames[0].timestamp, 5.0);
    }

    #[tokio::test]
    async fn test_negative_timestamps_clamped_to_zero() {
        let mut session = MockDecodeSession::new();
        session.expect_duration().return_const(5.0f64);
        session
            .expect_seek()
            .with(eq(0.0))
            .times(1)
            .returning(|_| Ok(()));
        session
            .expect_current_frame()
            .returning(|| Ok(solid_frame(64, 48)));

        let frames = sample_frames(session, &[-1.0], 320, 180).await.unwrap();
        assert_eq!(frames[0].timestamp, 0.0);
    }

    #[tokio::test]
    async fn test_failed_seek_identifies_timestamp_and_drops_partial_frames() {
        let mut session = MockDecodeSession::new();
        session.expect_duration().return_const(10.0f64);

        let mut seq = Sequence::new();
        session
            .expect_seek()
            .with(eq(1.0))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        session
            .expect_current_frame()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(solid_frame(64, 48)));
        session
            .expect_seek()
            .with(eq(2.0))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(StreamError::new("decoder reported an error").into()));

        let err = sample_frames(session, &[1.0, 2.0, 3.0], 320, 180)
            .await
            .unwrap_err();

        match err {
            RallyMediaError::Seek(seek) => assert_eq!(seek.timestamp, 2.0),
            other => panic!("expected seek error, got: {}", other),
        }
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_before_seeking() {
        let mut session = MockDecodeSession::new();
        session.expect_duration().return_const(10.0f64);
        // No seek expectation: touching the session would fail the test.

        let token = CancellationToken::new();
        token.cancel();

        let err = sample_frames_cancellable(session, &[0.0, 1.0], 320, 180, &token)
            .await
            .unwrap_err();
        assert!(matches!(err, RallyMediaError::Cancelled));
    }

    #[tokio::test]
    async fn test_empty_timestamp_list() {
        let mut session = MockDecodeSession::new();
        session.expect_duration().return_const(10.0f64);

        let frames = sample_frames(session, &[], 320, 180).await.unwrap();
        assert!(frames.is_empty());
    }

    #[tokio::test]
    async fn test_frames_resized_to_bounds() {
        let mut session = MockDecodeSession::new();
        session.expect_duration().return_const(10.0f64);
        session.expect_seek().returning(|_| Ok(()));
        session
            .expect_current_frame()
            .returning(|| Ok(solid_frame(640, 480)));

        let frames = sample_frames(session, &[0.0], 320, 180).await.unwrap();
        assert_eq!((frames[0].width, frames[0].height), (240, 180));
    }
}
