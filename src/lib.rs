//! ALOV annotation flattener
//!
//! This library collects the per-video `.ann` bounding-box files of an ALOV-style
//! tracking dataset into one CSV and copies every annotated frame image into a
//! single directory under a collision-free name.

pub mod collector;
pub mod config;
pub mod copier;
pub mod dataset;
pub mod error;
pub mod parser;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use collector::{collect_annotations, discover_annotation_files, read_csv, write_csv};
pub use config::Args;
pub use copier::{build_path_mappings, copy_frames, vid_num, FilePathMapping};
pub use dataset::process_dataset;
pub use error::{ConvertError, CopyError};
pub use types::{AnnotationRecord, CombinedTable, FramePathKey, ProcessingStats, TableBuilder};
