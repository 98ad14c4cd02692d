use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::config::EncoderConfig;
use crate::error::{CodecError, Result};

/// printf-style frame name pattern handed to the external tool
///
/// Must agree with [`Frame::filename_for`](crate::video::Frame::filename_for)
/// so the decode, process and encode stages all see the same names.
pub const FRAME_PATTERN: &str = "frame_%05d.png";

/// Wrapper around the external FFmpeg decode/probe/encode invocations
///
/// All calls are blocking; the pipeline suspends until the external process
/// exits. The codec holds only the encoder settings - frame staging locations
/// are passed in per call by the job context.
pub struct FrameCodec {
    encoder: EncoderConfig,
}

impl FrameCodec {
    pub fn new(encoder: EncoderConfig) -> Self {
        Self { encoder }
    }

    /// Check that an external tool responds to `-version`
    pub fn check_tool_available(tool: &str) -> bool {
        Command::new(tool)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Verify both external tools are installed before starting a job
    pub fn ensure_available() -> Result<()> {
        for tool in ["ffmpeg", "ffprobe"] {
            if !Self::check_tool_available(tool) {
                return Err(CodecError::ToolUnavailable {
                    tool: tool.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Decode a video into an ordered sequence of still frames
    ///
    /// Invokes the external decoder with `-vsync 0` so every stored frame is
    /// emitted without sync-based dropping. Returns the frame paths in index
    /// order. Fails if the decoder exits nonzero or produced no frames.
    pub fn decode(&self, video: &Path, frames_dir: &Path) -> Result<Vec<PathBuf>> {
        info!("Decoding {:?} into {:?}", video, frames_dir);

        let output = Command::new("ffmpeg")
            .args([
                "-y",
                "-i",
                &video.display().to_string(),
                "-vsync",
                "0",
                &frames_dir.join(FRAME_PATTERN).display().to_string(),
            ])
            .output()
            .map_err(|e| CodecError::DecodeFailed {
                reason: format!("failed to launch ffmpeg: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CodecError::DecodeFailed {
                reason: format!("ffmpeg exited with {}: {}", output.status, stderr),
            }
            .into());
        }

        let frames = list_frames(frames_dir)?;
        if frames.is_empty() {
            return Err(CodecError::NoFramesExtracted.into());
        }

        info!("Decoded {} frames", frames.len());
        Ok(frames)
    }

    /// Probe the source frame rate of the first video stream
    ///
    /// The external tool reports the rate as a `numerator/denominator` CSV
    /// field; the exact rational is preserved in the returned float so that
    /// e.g. 30000/1001 does not collapse to 29.97.
    pub fn probe_frame_rate(&self, video: &Path) -> Result<f64> {
        let output = Command::new("ffprobe")
            .args([
                "-v",
                "0",
                "-of",
                "csv=p=0",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=r_frame_rate",
                &video.display().to_string(),
            ])
            .output()
            .map_err(|e| CodecError::ProbeFailed {
                reason: format!("failed to launch ffprobe: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CodecError::ProbeFailed {
                reason: format!("ffprobe exited with {}: {}", output.status, stderr),
            }
            .into());
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        let fps = parse_frame_rate(&raw)?;
        debug!("Probed frame rate {} -> {} fps", raw.trim(), fps);
        Ok(fps)
    }

    /// Encode processed frames back into a video at the given frame rate
    pub fn encode(&self, processed_dir: &Path, fps: f64, output_path: &Path) -> Result<()> {
        info!(
            "Encoding {:?} at {} fps into {:?}",
            processed_dir, fps, output_path
        );

        let output = Command::new("ffmpeg")
            .args([
                "-y",
                "-framerate",
                &fps.to_string(),
                "-i",
                &processed_dir.join(FRAME_PATTERN).display().to_string(),
                "-c:v",
                &self.encoder.codec,
                "-preset",
                &self.encoder.preset,
                "-crf",
                &self.encoder.crf.to_string(),
                "-pix_fmt",
                &self.encoder.pix_fmt,
                &output_path.display().to_string(),
            ])
            .output()
            .map_err(|e| CodecError::EncodeFailed {
                reason: format!("failed to launch ffmpeg: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CodecError::EncodeFailed {
                reason: format!("ffmpeg exited with {}: {}", output.status, stderr),
            }
            .into());
        }

        Ok(())
    }
}

/// Parse a `numerator/denominator` frame rate string
///
/// Accepts exactly two `/`-separated integers with a nonzero denominator.
pub fn parse_frame_rate(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();

    let unparsable = || CodecError::ProbeUnparsable {
        output: trimmed.to_string(),
    };

    let (num, den) = trimmed.split_once('/').ok_or_else(unparsable)?;
    let num: i64 = num.trim().parse().map_err(|_| unparsable())?;
    let den: i64 = den.trim().parse().map_err(|_| unparsable())?;

    if den == 0 {
        return Err(unparsable().into());
    }

    Ok(num as f64 / den as f64)
}

/// List decoded frame images in index order
///
/// Zero-padded names make lexical sort equal numeric sort.
pub(crate) fn list_frames(frames_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut frames: Vec<PathBuf> = std::fs::read_dir(frames_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("png"))
                .unwrap_or(false)
        })
        .collect();

    frames.sort();
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use tempfile::tempdir;

    #[test]
    fn parses_ntsc_rate_exactly() {
        let fps = parse_frame_rate("30000/1001\n").unwrap();
        assert_eq!(fps, 30000.0 / 1001.0);
    }

    #[test]
    fn parses_integer_rate() {
        assert_eq!(parse_frame_rate("10/1").unwrap(), 10.0);
        assert_eq!(parse_frame_rate("25/1").unwrap(), 25.0);
    }

    #[test]
    fn rejects_garbage_output() {
        for raw in ["", "thirty", "30000", "a/b", "30/0", "1/2/3"] {
            let err = parse_frame_rate(raw).unwrap_err();
            assert!(
                matches!(
                    err,
                    PipelineError::Codec(CodecError::ProbeUnparsable { .. })
                ),
                "expected ProbeUnparsable for {:?}",
                raw
            );
        }
    }

    #[test]
    fn lists_frames_in_index_order() {
        let dir = tempdir().unwrap();
        for index in [3u32, 1, 12, 2] {
            std::fs::write(dir.path().join(format!("frame_{:05}.png", index)), b"").unwrap();
        }
        // Non-frame files are ignored
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let frames = list_frames(dir.path()).unwrap();
        let names: Vec<String> = frames
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "frame_00001.png",
                "frame_00002.png",
                "frame_00003.png",
                "frame_00012.png"
            ]
        );
    }

    #[test]
    fn empty_directory_lists_no_frames() {
        let dir = tempdir().unwrap();
        assert!(list_frames(dir.path()).unwrap().is_empty());
    }
}
