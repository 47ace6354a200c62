use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Flatten ALOV bounding-box annotations into one CSV and copy the annotated frames
/// into a single directory.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Dataset root containing the bounding-box and frames subdirectories
    pub input_dir: PathBuf,

    /// Destination of the combined CSV
    pub output_filepath: PathBuf,

    /// Existing directory that receives the renamed frame images
    pub output_dir: PathBuf,

    /// Name of the annotation subdirectory inside input_dir
    #[arg(long = "bb_dir", default_value = "bb")]
    pub bb_dir: String,

    /// Name of the frames subdirectory inside input_dir
    #[arg(long = "frames_dir", default_value = "frames")]
    pub frames_dir: String,

    /// Number of threads used to copy frames (0 = one per CPU)
    #[arg(long = "workers", default_value_t = 0, value_parser = validate_workers)]
    pub workers: usize,

    /// Only write the CSV, do not copy any frames
    #[arg(long = "skip_copy")]
    pub skip_copy: bool,
}

impl Args {
    pub fn bb_root(&self) -> PathBuf {
        self.input_dir.join(&self.bb_dir)
    }

    pub fn frames_root(&self) -> PathBuf {
        self.input_dir.join(&self.frames_dir)
    }
}

// Validate that the worker count is a sane non-negative integer
pub fn validate_workers(s: &str) -> Result<usize, String> {
    match usize::from_str(s) {
        Ok(val) if val <= 1024 => Ok(val),
        _ => Err("WORKERS must be an integer between 0 and 1024".to_string()),
    }
}
