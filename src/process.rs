//! Scanning, ordering and resizing.
//!
//! Takes the input folder of one [`Job`] and produces two JPEG copies of every
//! dated photograph, named by capture-date position.
//!
//! ## Steps
//!
//! ```text
//! 1. create output folders      img/2024/, thumb/2024/ (idempotent)
//! 2. scan input folder          original/2024/*.{png,jpg,jpeg,tiff,bmp,gif}
//! 3. read capture dates         undated images are left out
//! 4. stable sort by date        ties keep filename order
//! 5. plan names                 {prefix}-0001.jpg, {prefix}-0002.jpg, ...
//! 6. resize + encode            ≤1500px copy, ≤500px thumbnail
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! img/2024/
//! ├── RoboCamp-2024-0001.jpg     # longer edge ≤ 1500px
//! └── RoboCamp-2024-0002.jpg
//! thumb/2024/
//! ├── RoboCamp-2024-0001.jpg     # longer edge ≤ 500px
//! └── RoboCamp-2024-0002.jpg
//! ```
//!
//! ## Failure Policy
//!
//! A missing capture date only drops that image. Anything that goes wrong
//! while creating folders, decoding, resizing or writing is fatal: the error
//! propagates and the run stops. Files written before the failure stay.
//!
//! ## Parallel Processing
//!
//! Names are assigned in step 5, before any pixels are touched, so step 6 can
//! run on [rayon](https://docs.rs/rayon) workers without affecting naming or
//! order.

use crate::config::{GalleryConfig, Job};
use crate::imaging::{
    BackendError, ImageBackend, Quality, RustBackend, create_bounded_copies, get_dimensions,
};
use crate::metadata::{self, ImageRecord};
use crate::naming;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// File extensions picked up from the input folder (compared case-insensitively).
pub const INPUT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "bmp", "gif"];

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Input folder not found: {0}")]
    InputNotFound(PathBuf),
}

/// Configuration for image processing
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub full_max_edge: u32,
    pub thumb_max_edge: u32,
    pub quality: u32,
}

impl ProcessConfig {
    /// Build a ProcessConfig from GalleryConfig values.
    pub fn from_gallery_config(config: &GalleryConfig) -> Self {
        Self {
            full_max_edge: config.images.full_max_edge,
            thumb_max_edge: config.images.thumb_max_edge,
            quality: config.images.quality,
        }
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self::from_gallery_config(&GalleryConfig::default())
    }
}

/// An input image with a capture date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedImage {
    pub capture_timestamp: String,
    pub source_path: PathBuf,
}

/// A dated image with its output name and paths assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedImage {
    /// 1-based position in capture-date order.
    pub position: usize,
    pub base_name: String,
    pub capture_timestamp: String,
    pub source_path: PathBuf,
    pub full_path: PathBuf,
    pub thumb_path: PathBuf,
}

/// What a scan of the input folder found, before any file is written.
#[derive(Debug, Clone, Default)]
pub struct Survey {
    /// Files with a supported extension.
    pub candidates: usize,
    /// Dated images in output order.
    pub planned: Vec<PlannedImage>,
    /// Candidates without a capture date, in filename order.
    pub excluded: Vec<PathBuf>,
}

/// One written output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Progress events sent while processing.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    OutputDirCreated(PathBuf),
    Started {
        input_dir: PathBuf,
        candidates: usize,
        dated: usize,
    },
    ImageProcessed {
        position: usize,
        base_name: String,
        source_path: PathBuf,
        capture_timestamp: String,
        full: VariantInfo,
        thumb: VariantInfo,
    },
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default)]
pub struct ProcessResult {
    /// Output base names in capture-date order.
    pub names: Vec<String>,
    /// Input images left out for lack of a capture date.
    pub excluded: Vec<PathBuf>,
    /// Numbered outputs from an earlier, larger run that this run did not overwrite.
    pub stale: Vec<PathBuf>,
}

/// Create both output folders if missing. Returns the folders that were created.
pub fn prepare_output_dirs(job: &Job) -> Result<Vec<PathBuf>, ProcessError> {
    let mut created = Vec::new();
    for dir in [&job.full_dir, &job.thumb_dir] {
        if !dir.is_dir() {
            fs::create_dir_all(dir)?;
            created.push(dir.clone());
        }
    }
    Ok(created)
}

/// List supported image files directly inside `dir`, sorted by path.
pub fn scan_input(dir: &Path) -> Result<Vec<PathBuf>, ProcessError> {
    if !dir.is_dir() {
        return Err(ProcessError::InputNotFound(dir.to_path_buf()));
    }

    select_input_images(fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path())))
}

/// Keep the input images from a directory listing, sorted by path.
///
/// An unreadable entry fails the scan rather than silently shrinking the
/// gallery.
fn select_input_images(
    listing: impl IntoIterator<Item = std::io::Result<PathBuf>>,
) -> Result<Vec<PathBuf>, ProcessError> {
    let mut entries = Vec::new();
    for path in listing {
        let path = path?;
        if is_input_image(&path) {
            entries.push(path);
        }
    }

    entries.sort();
    Ok(entries)
}

fn is_input_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    INPUT_EXTENSIONS.contains(&ext.as_str())
}

/// Split records into dated images and the paths of undated ones.
pub fn partition_by_date(records: Vec<ImageRecord>) -> (Vec<DatedImage>, Vec<PathBuf>) {
    let mut dated = Vec::new();
    let mut excluded = Vec::new();
    for record in records {
        match record.capture_timestamp {
            Some(capture_timestamp) => dated.push(DatedImage {
                capture_timestamp,
                source_path: record.source_path,
            }),
            None => excluded.push(record.source_path),
        }
    }
    (dated, excluded)
}

/// Sort ascending by capture timestamp. The sort is stable: equal
/// timestamps keep their incoming order.
pub fn order_by_capture_date(mut images: Vec<DatedImage>) -> Vec<DatedImage> {
    images.sort_by(|a, b| a.capture_timestamp.cmp(&b.capture_timestamp));
    images
}

/// Assign positions, names and output paths to images already in order.
pub fn plan(ordered: Vec<DatedImage>, job: &Job) -> Vec<PlannedImage> {
    ordered
        .into_iter()
        .enumerate()
        .map(|(idx, image)| {
            let position = idx + 1;
            let base_name = naming::output_name(&job.prefix, position);
            PlannedImage {
                position,
                full_path: job.full_dir.join(&base_name),
                thumb_path: job.thumb_dir.join(&base_name),
                base_name,
                capture_timestamp: image.capture_timestamp,
                source_path: image.source_path,
            }
        })
        .collect()
}

/// Scan the input folder and plan the outputs without writing anything.
pub fn survey(backend: &impl ImageBackend, job: &Job) -> Result<Survey, ProcessError> {
    let candidates = scan_input(&job.input_dir)?;
    let records = metadata::read_records(backend, &candidates);
    let (dated, excluded) = partition_by_date(records);
    let planned = plan(order_by_capture_date(dated), job);

    Ok(Survey {
        candidates: candidates.len(),
        planned,
        excluded,
    })
}

/// Numbered files in the output folders beyond position `count`.
///
/// A run over fewer images than the previous one overwrites positions
/// `1..=count` only. Missing folders yield nothing.
pub fn stale_outputs(job: &Job, count: usize) -> Vec<PathBuf> {
    let mut stale: Vec<PathBuf> = [&job.full_dir, &job.thumb_dir]
        .into_iter()
        .filter_map(|dir| fs::read_dir(dir).ok())
        .flat_map(|entries| entries.filter_map(|e| e.ok()))
        .map(|e| e.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .and_then(|name| naming::parse_output_name(&job.prefix, name))
                .is_some_and(|position| position > count)
        })
        .collect();
    stale.sort();
    stale
}

/// Process the job's input folder with the production backend.
pub fn process(
    job: &Job,
    config: &ProcessConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    process_with_backend(&RustBackend::new(), job, config, events)
}

/// Process images using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    job: &Job,
    config: &ProcessConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    let emit = |event: ProcessEvent| {
        if let Some(tx) = &events {
            // A dropped receiver only loses progress output.
            tx.send(event).ok();
        }
    };

    for dir in prepare_output_dirs(job)? {
        emit(ProcessEvent::OutputDirCreated(dir));
    }

    let survey = survey(backend, job)?;
    emit(ProcessEvent::Started {
        input_dir: job.input_dir.clone(),
        candidates: survey.candidates,
        dated: survey.planned.len(),
    });

    survey
        .planned
        .par_iter()
        .try_for_each(|image| -> Result<(), ProcessError> {
            emit(process_image(backend, image, config)?);
            Ok(())
        })?;

    let names: Vec<String> = survey
        .planned
        .into_iter()
        .map(|image| image.base_name)
        .collect();

    let stale = stale_outputs(job, names.len());
    for path in &stale {
        log::warn!("{} is left over from an earlier run", path.display());
    }

    Ok(ProcessResult {
        names,
        excluded: survey.excluded,
        stale,
    })
}

/// Write the full-size copy and the thumbnail of one planned image.
fn process_image(
    backend: &impl ImageBackend,
    image: &PlannedImage,
    config: &ProcessConfig,
) -> Result<ProcessEvent, ProcessError> {
    let dimensions = get_dimensions(backend, &image.source_path)?;
    let quality = Quality::new(config.quality);

    let [full, thumb] = create_bounded_copies(
        backend,
        &image.source_path,
        dimensions,
        [
            (image.full_path.as_path(), config.full_max_edge),
            (image.thumb_path.as_path(), config.thumb_max_edge),
        ],
        quality,
    )?;

    Ok(ProcessEvent::ImageProcessed {
        position: image.position,
        base_name: image.base_name.clone(),
        source_path: image.source_path.clone(),
        capture_timestamp: image.capture_timestamp.clone(),
        full: VariantInfo {
            path: full.path,
            width: full.width,
            height: full.height,
        },
        thumb: VariantInfo {
            path: thumb.path,
            width: thumb.width,
            height: thumb.height,
        },
    })
}
