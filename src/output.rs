//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every image is shown by its output identity first (position and generated
//! name), with the source file and written copies as indented context lines.
//! The output reads as an inventory of the gallery while still tracing each
//! entry back to the photograph it came from.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Created output folder: img/2024
//! Created output folder: thumb/2024
//! original/2024: 7 of 8 images dated
//! 0001 RoboCamp-2024-0001.jpg
//!     Source: original/2024/IMG_4410.JPG
//!     Taken: 2024:07:01 09:12:44
//!     1500x1000: img/2024/RoboCamp-2024-0001.jpg
//!     500x333: thumb/2024/RoboCamp-2024-0001.jpg
//! ...
//! Left out (no capture date)
//!     original/2024/screenshot.png
//! Generated HTML file: generateGallery.html (7 items, 5 visible)
//! ```
//!
//! ## Check
//!
//! ```text
//! Year 2024
//!     Input: original/2024
//!     Display copies: img/2024
//!     Thumbnails: thumb/2024
//!     Gallery: generateGallery.html
//!
//! 0001 RoboCamp-2024-0001.jpg ← IMG_4410.JPG (2024:07:01 09:12:44)
//! ...
//!
//! 7 images, 1 left out
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions do
//! no I/O.

use crate::config::Job;
use crate::process::{ProcessEvent, Survey};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based position as 4-digit zero-padded, matching output names.
fn format_index(pos: usize) -> String {
    format!("{:0>4}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A titled block of indented paths. Empty input yields no lines.
fn path_block(title: &str, paths: &[PathBuf]) -> Vec<String> {
    if paths.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![title.to_string()];
    lines.extend(
        paths
            .iter()
            .map(|p| format!("{}{}", indent(1), p.display())),
    );
    lines
}

// ============================================================================
// Build output
// ============================================================================

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::OutputDirCreated(dir) => {
            vec![format!("Created output folder: {}", dir.display())]
        }
        ProcessEvent::Started {
            input_dir,
            candidates,
            dated,
        } => vec![format!(
            "{}: {} of {} images dated",
            input_dir.display(),
            dated,
            candidates
        )],
        ProcessEvent::ImageProcessed {
            position,
            base_name,
            source_path,
            capture_timestamp,
            full,
            thumb,
        } => {
            let mut lines = vec![format!("{} {}", format_index(*position), base_name)];
            lines.push(format!("{}Source: {}", indent(1), source_path.display()));
            lines.push(format!("{}Taken: {}", indent(1), capture_timestamp));
            for variant in [full, thumb] {
                lines.push(format!(
                    "{}{}x{}: {}",
                    indent(1),
                    variant.width,
                    variant.height,
                    variant.path.display()
                ));
            }
            lines
        }
    }
}

/// Format the list of images left out for lack of a capture date.
pub fn format_excluded(excluded: &[PathBuf]) -> Vec<String> {
    path_block("Left out (no capture date)", excluded)
}

/// Format numbered outputs from an earlier run that were not overwritten.
pub fn format_stale(stale: &[PathBuf]) -> Vec<String> {
    path_block("Left over from an earlier run", stale)
}

/// Format the line reporting the written gallery fragment.
pub fn format_gallery_summary(html_output: &Path, items: usize, visible_count: usize) -> String {
    format!(
        "Generated HTML file: {} ({} items, {} visible)",
        html_output.display(),
        items,
        items.min(visible_count)
    )
}

/// Print the post-build summary: exclusions, leftovers, and the HTML file.
pub fn print_build_summary(
    excluded: &[PathBuf],
    stale: &[PathBuf],
    html_output: &Path,
    items: usize,
    visible_count: usize,
) {
    for line in format_excluded(excluded)
        .into_iter()
        .chain(format_stale(stale))
    {
        println!("{}", line);
    }
    println!(
        "{}",
        format_gallery_summary(html_output, items, visible_count)
    );
}

/// Run `work` while a printer thread formats the progress events it sends.
///
/// The printer is joined before the outcome is returned, so every queued
/// event reaches `emit` even when `work` fails.
pub fn with_progress_printer<T>(
    work: impl FnOnce(Sender<ProcessEvent>) -> T,
    mut emit: impl FnMut(String) + Send + 'static,
) -> thread::Result<T> {
    let (tx, rx) = mpsc::channel();
    let printer = thread::spawn(move || {
        for event in rx {
            for line in format_process_event(&event) {
                emit(line);
            }
        }
    });
    let outcome = work(tx);
    printer.join()?;
    Ok(outcome)
}

// ============================================================================
// Check output
// ============================================================================

/// Format the dry-run plan: resolved folders, the naming order, and anything
/// that will be left out or left over.
pub fn format_check_output(job: &Job, survey: &Survey, stale: &[PathBuf]) -> Vec<String> {
    let mut lines = vec![
        format!("Year {}", job.year),
        format!("{}Input: {}", indent(1), job.input_dir.display()),
        format!("{}Display copies: {}", indent(1), job.full_dir.display()),
        format!("{}Thumbnails: {}", indent(1), job.thumb_dir.display()),
        format!("{}Gallery: {}", indent(1), job.html_output.display()),
        String::new(),
    ];

    for image in &survey.planned {
        lines.push(format!(
            "{} {} \u{2190} {} ({})",
            format_index(image.position),
            image.base_name,
            file_name(&image.source_path),
            image.capture_timestamp
        ));
    }

    let excluded = format_excluded(&survey.excluded);
    let leftover = format_stale(stale);
    for block in [excluded, leftover] {
        if !block.is_empty() {
            lines.push(String::new());
            lines.extend(block);
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} images, {} left out",
        survey.planned.len(),
        survey.excluded.len()
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(job: &Job, survey: &Survey, stale: &[PathBuf]) {
    for line in format_check_output(job, survey, stale) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
