use serde::{Deserialize, Serialize, Serializer};

/// Canonical CSV column names, in positional order.
pub const COLUMNS: [&str; 11] = [
    "frame",
    "x1",
    "y1",
    "x2",
    "y2",
    "x3",
    "y3",
    "x4",
    "y4",
    "filename",
    "directory_path",
];

/// Number of whitespace-separated fields on one `.ann` line.
pub const ANN_FIELDS: usize = 9;

/// Largest frame index that still fits an 8-digit `vid_num`.
pub const MAX_FRAME: u32 = 99_999_999;

// Writes 10.0 as "10" and 137.44 as "137.44"
fn serialize_coord<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// The nine numeric fields of one `.ann` line, before it is tagged with its source file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawAnnotation {
    pub frame: u32,
    pub corners: [(f64, f64); 4],
}

// One bounding-box annotation of a single frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub frame: u32,
    #[serde(serialize_with = "serialize_coord")]
    pub x1: f64,
    #[serde(serialize_with = "serialize_coord")]
    pub y1: f64,
    #[serde(serialize_with = "serialize_coord")]
    pub x2: f64,
    #[serde(serialize_with = "serialize_coord")]
    pub y2: f64,
    #[serde(serialize_with = "serialize_coord")]
    pub x3: f64,
    #[serde(serialize_with = "serialize_coord")]
    pub y3: f64,
    #[serde(serialize_with = "serialize_coord")]
    pub x4: f64,
    #[serde(serialize_with = "serialize_coord")]
    pub y4: f64,
    pub filename: String,
    #[serde(rename = "directory_path")]
    pub directory: String,
}

impl AnnotationRecord {
    /// Tag a parsed line with the file it came from.
    pub fn from_raw(raw: RawAnnotation, filename: &str, directory: &str) -> Self {
        let [(x1, y1), (x2, y2), (x3, y3), (x4, y4)] = raw.corners;
        Self {
            frame: raw.frame,
            x1,
            y1,
            x2,
            y2,
            x3,
            y3,
            x4,
            y4,
            filename: filename.to_string(),
            directory: directory.to_string(),
        }
    }

    pub fn path_key(&self) -> FramePathKey {
        FramePathKey {
            directory: self.directory.clone(),
            filename: self.filename.clone(),
            frame: self.frame,
        }
    }
}

/// The `(directory, filename, frame)` projection that locates a frame image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FramePathKey {
    pub directory: String,
    pub filename: String,
    pub frame: u32,
}

/// All annotation records of a dataset, labelled with the canonical columns.
#[derive(Debug, Clone)]
pub struct CombinedTable {
    columns: [&'static str; 11],
    records: Vec<AnnotationRecord>,
    source_files: usize,
}

// Tables compare by content only
impl PartialEq for CombinedTable {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns && self.records == other.records
    }
}

impl CombinedTable {
    /// Number of annotation files the rows were collected from.
    pub fn source_files(&self) -> usize {
        self.source_files
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Project every row onto the fields the frame copier needs.
    pub fn frame_paths(&self) -> Vec<FramePathKey> {
        self.records.iter().map(AnnotationRecord::path_key).collect()
    }
}

/// Accumulates records file by file; column names are attached only by [`TableBuilder::finish`].
#[derive(Debug, Default)]
pub struct TableBuilder {
    records: Vec<AnnotationRecord>,
    files: usize,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the records of one annotation file.
    pub fn push_file(&mut self, records: Vec<AnnotationRecord>) {
        self.files += 1;
        self.records.extend(records);
    }

    pub fn file_count(&self) -> usize {
        self.files
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn finish(self) -> CombinedTable {
        CombinedTable {
            columns: COLUMNS,
            records: self.records,
            source_files: self.files,
        }
    }
}

impl From<Vec<AnnotationRecord>> for CombinedTable {
    fn from(records: Vec<AnnotationRecord>) -> Self {
        let mut builder = TableBuilder::new();
        builder.push_file(records);
        builder.finish()
    }
}

// Struct to hold processing statistics
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    pub annotation_files: usize,
    pub records: usize,
    pub images_copied: usize,
    pub copy_failures: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Annotation files parsed: {}", self.annotation_files);
        log::info!("Annotation records collected: {}", self.records);
        log::info!("Frames copied: {}", self.images_copied);
        if self.copy_failures > 0 {
            log::warn!("Frames that failed to copy: {}", self.copy_failures);
        }
    }
}
