//! Frame copier: locate each annotated frame image and copy it to a flat,
//! collision-free name in the output directory.

use indicatif::ProgressBar;
use log::{info, warn};
use rayon::prelude::*;
use std::fs::copy;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, CopyError};
use crate::types::FramePathKey;
use crate::utils::create_io_thread_pool;

const ANN_SUFFIX: &str = ".ann";
const FRAME_EXTENSION: &str = "jpg";

/// Zero-padded 8-digit form of a frame index, as used in frame image names.
pub fn vid_num(frame: u32) -> String {
    format!("{:08}", frame)
}

/// Annotation file name without its `.ann` suffix.
pub fn video_stem(filename: &str) -> &str {
    filename.strip_suffix(ANN_SUFFIX).unwrap_or(filename)
}

/// Where a frame image is read from and where its copy goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePathMapping {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl FilePathMapping {
    pub fn new(key: &FramePathKey, frames_root: &Path, output_root: &Path) -> Self {
        let stem = video_stem(&key.filename);
        let vid_num = vid_num(key.frame);
        Self {
            input_path: frames_root
                .join(&key.directory)
                .join(stem)
                .join(format!("{}.{}", vid_num, FRAME_EXTENSION)),
            output_path: output_root.join(format!("{}_{}.{}", stem, vid_num, FRAME_EXTENSION)),
        }
    }
}

/// One mapping per key, in the same order.
pub fn build_path_mappings(
    keys: &[FramePathKey],
    frames_root: &Path,
    output_root: &Path,
) -> Vec<FilePathMapping> {
    keys.iter()
        .map(|key| FilePathMapping::new(key, frames_root, output_root))
        .collect()
}

/// Outcome of a copy pass where every frame made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopySummary {
    pub copied: usize,
}

fn copy_frame(key: &FramePathKey, mapping: FilePathMapping) -> Result<(), CopyError> {
    match copy(&mapping.input_path, &mapping.output_path) {
        Ok(_) => Ok(()),
        Err(source) => Err(CopyError {
            directory: key.directory.clone(),
            filename: key.filename.clone(),
            frame: key.frame,
            input_path: mapping.input_path,
            output_path: mapping.output_path,
            source,
        }),
    }
}

/// Copy the frame image of every key into `output_dir`.
///
/// All rows are attempted even after a failure. If any row fails, the error
/// lists every failed row in key order. `output_dir` must already exist.
pub fn copy_frames(
    keys: &[FramePathKey],
    frames_root: &Path,
    output_dir: &Path,
    workers: usize,
    pb: &ProgressBar,
) -> Result<CopySummary, ConvertError> {
    let thread_pool = create_io_thread_pool(workers)?;

    let mappings = build_path_mappings(keys, frames_root, output_dir);

    let results: Vec<Result<(), CopyError>> = thread_pool.install(|| {
        keys.par_iter()
            .zip(mappings.into_par_iter())
            .map(|(key, mapping)| {
                let result = copy_frame(key, mapping);
                pb.inc(1);
                result
            })
            .collect()
    });

    let copied = results.iter().filter(|r| r.is_ok()).count();
    let failures: Vec<CopyError> = results.into_iter().filter_map(Result::err).collect();

    if failures.is_empty() {
        info!("Copied {} frames into {}", copied, output_dir.display());
        Ok(CopySummary { copied })
    } else {
        warn!(
            "{} of {} frames could not be copied",
            failures.len(),
            keys.len()
        );
        Err(ConvertError::CopyFailures(failures))
    }
}
