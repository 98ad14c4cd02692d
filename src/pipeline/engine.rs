use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info};

use crate::{
    config::Config,
    effects::{OutlineFilter, OverlayCache},
    error::Result,
    pipeline::JobContext,
    video::{Frame, FrameCodec},
};

/// File name of the final encoded artifact inside the output directory
pub const OUTPUT_FILENAME: &str = "final_output.mp4";

/// Drives one video through the full pipeline
///
/// The stage sequence is linear with no branching except error exits:
/// stage scratch directories, decode to frames, transform each frame,
/// re-encode at the source frame rate. Any stage error propagates typed to
/// the caller; partial staging output is left in place and cleared by the
/// next run.
pub struct PipelineOrchestrator {
    config: Config,
    codec: FrameCodec,
}

impl PipelineOrchestrator {
    pub fn new(config: Config) -> Self {
        let codec = FrameCodec::new(config.encoder.clone());
        Self { config, codec }
    }

    /// Process one input video, returning the path of the encoded output
    pub fn process(&self, input: &Path) -> Result<PathBuf> {
        FrameCodec::ensure_available()?;

        info!("🎬 Starting doodle composition");
        info!("   Input: {:?}", input);

        // Stage 1: clear scratch and create this job's staging directories
        let job = JobContext::stage(&self.config.staging.scratch_root)?;
        info!("   Job: {}", job.job_id());

        // Stage 2: decode the video into ordered still frames
        let frames = self.codec.decode(input, job.frames_dir())?;

        // Stage 3: per-frame outline + doodle overlay
        let processed = self.process_frames(&frames, &job, &mut rand::thread_rng())?;
        info!("   Processed {} frames", processed);

        // Stage 4: probe the ORIGINAL input's frame rate and re-encode with
        // it, so output duration matches the source exactly.
        let fps = self.codec.probe_frame_rate(input)?;
        std::fs::create_dir_all(&self.config.staging.output_dir)?;
        let output = self.config.staging.output_dir.join(OUTPUT_FILENAME);
        self.codec.encode(job.processed_dir(), fps, &output)?;

        info!("🎉 Composition complete! Output saved to: {:?}", output);
        Ok(output)
    }

    /// The per-frame transform loop
    ///
    /// Walks the decoded frame paths in index order; every input frame
    /// produces exactly one processed frame under the same name, so count
    /// and ordering are preserved end to end. Separated from the external
    /// codec calls so tests can run it against synthetic frames on disk.
    pub(crate) fn process_frames<R: Rng>(
        &self,
        frame_paths: &[PathBuf],
        job: &JobContext,
        rng: &mut R,
    ) -> Result<usize> {
        let outline = OutlineFilter::new();
        let mut cache = OverlayCache::new(self.config.overlay.frames_per_update);

        for (i, path) in frame_paths.iter().enumerate() {
            let index = (i + 1) as u32;
            let frame = Frame::load(index, path)?;

            let layer = cache.layer_for(i, frame.width(), frame.height(), rng);
            let outlined = outline.apply(&frame);
            let composed = layer.composite_over(&outlined);

            composed.save_png(job.processed_path(composed.index()))?;
            debug!("Processed frame {}/{}", index, frame_paths.len());
        }

        Ok(frame_paths.len())
    }
}
