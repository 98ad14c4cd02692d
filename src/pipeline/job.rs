//! Per-job staging directories.
//!
//! Each processing run gets its own raw-frame and processed-frame staging
//! directories, namespaced under the scratch root by a unique job id. The
//! context is passed explicitly through the pipeline; nothing references
//! ambient process-wide paths.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::video::Frame;

static JOB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Directory handles for one in-flight job
#[derive(Debug)]
pub struct JobContext {
    job_id: String,
    frames_dir: PathBuf,
    processed_dir: PathBuf,
}

impl JobContext {
    /// Stage a new job under the scratch root
    ///
    /// Leftover job directories from earlier runs (including failed ones -
    /// partial output is never rolled back) are cleared first, then fresh
    /// raw-frame and processed-frame directories are created for this job.
    pub fn stage(scratch_root: &Path) -> Result<Self> {
        if scratch_root.exists() {
            for entry in fs::read_dir(scratch_root)? {
                let path = entry?.path();
                if path.is_dir() {
                    debug!("Clearing stale job directory {:?}", path);
                    if let Err(e) = fs::remove_dir_all(&path) {
                        warn!("Could not clear {:?}: {}", path, e);
                    }
                }
            }
        }

        let job_id = format!(
            "job-{}-{}-{}",
            std::process::id(),
            Utc::now().timestamp_millis(),
            JOB_COUNTER.fetch_add(1, Ordering::Relaxed)
        );

        let frames_dir = scratch_root.join(&job_id).join("frames");
        let processed_dir = scratch_root.join(&job_id).join("processed");
        fs::create_dir_all(&frames_dir)?;
        fs::create_dir_all(&processed_dir)?;

        debug!("Staged job {} under {:?}", job_id, scratch_root);
        Ok(Self {
            job_id,
            frames_dir,
            processed_dir,
        })
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Raw-frame staging directory (decode output)
    pub fn frames_dir(&self) -> &Path {
        &self.frames_dir
    }

    /// Processed-frame staging directory (encode input)
    pub fn processed_dir(&self) -> &Path {
        &self.processed_dir
    }

    /// Path of the processed frame at the given 1-based index
    pub fn processed_path(&self, index: u32) -> PathBuf {
        self.processed_dir.join(Frame::filename_for(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn staging_creates_both_directories() {
        let scratch = tempdir().unwrap();
        let job = JobContext::stage(scratch.path()).unwrap();

        assert!(job.frames_dir().is_dir());
        assert!(job.processed_dir().is_dir());
        assert!(job.frames_dir().starts_with(scratch.path()));
    }

    #[test]
    fn staging_clears_residue_from_previous_runs() {
        let scratch = tempdir().unwrap();

        let first = JobContext::stage(scratch.path()).unwrap();
        let leftover = first.frames_dir().join("frame_00001.png");
        std::fs::write(&leftover, b"stale").unwrap();

        let second = JobContext::stage(scratch.path()).unwrap();

        assert!(!leftover.exists(), "first run's staging should be cleared");
        assert!(second.frames_dir().is_dir());

        // Only the new job remains under the scratch root.
        let entries: Vec<_> = std::fs::read_dir(scratch.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].to_string_lossy(), second.job_id());
    }

    #[test]
    fn job_ids_are_unique() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();

        let first = JobContext::stage(a.path()).unwrap();
        let second = JobContext::stage(b.path()).unwrap();
        assert_ne!(first.job_id(), second.job_id());
    }

    #[test]
    fn processed_paths_use_frame_naming() {
        let scratch = tempdir().unwrap();
        let job = JobContext::stage(scratch.path()).unwrap();

        assert_eq!(
            job.processed_path(7).file_name().unwrap().to_string_lossy(),
            "frame_00007.png"
        );
    }
}
