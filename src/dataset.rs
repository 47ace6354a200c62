use log::info;

use crate::collector::{collect_annotations, write_csv};
use crate::config::Args;
use crate::copier::copy_frames;
use crate::error::ConvertError;
use crate::types::ProcessingStats;
use crate::utils::create_progress_bar;

/// Main conversion pipeline: collect annotations, write the CSV, then copy frames.
pub fn process_dataset(args: &Args) -> Result<ProcessingStats, ConvertError> {
    let mut stats = ProcessingStats::new();

    let bb_root = args.bb_root();
    info!("Collecting annotations from {}...", bb_root.display());
    let table = collect_annotations(&bb_root)?;
    stats.annotation_files = table.source_files();
    stats.records = table.len();

    write_csv(&table, &args.output_filepath)?;

    if args.skip_copy {
        info!("Skipping frame copy.");
        stats.print_summary();
        return Ok(stats);
    }

    let frame_paths = table.frame_paths();
    info!(
        "Copying {} frames from {} to {}...",
        frame_paths.len(),
        args.frames_root().display(),
        args.output_dir.display()
    );
    let pb = create_progress_bar(frame_paths.len() as u64, "Frames");
    let result = copy_frames(
        &frame_paths,
        &args.frames_root(),
        &args.output_dir,
        args.workers,
        &pb,
    );
    pb.finish_with_message("Frame copy complete");

    match result {
        Ok(summary) => {
            stats.images_copied = summary.copied;
            stats.print_summary();
            info!("Conversion process completed successfully.");
            Ok(stats)
        }
        Err(ConvertError::CopyFailures(failures)) => {
            stats.copy_failures = failures.len();
            stats.images_copied = frame_paths.len() - failures.len();
            stats.print_summary();
            Err(ConvertError::CopyFailures(failures))
        }
        Err(e) => Err(e),
    }
}
