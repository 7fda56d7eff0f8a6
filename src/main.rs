use clap::{Parser, Subcommand};
use env_logger::Builder;
use std::path::PathBuf;
use year_gal::config::{self, GalleryConfig, Job, JobOverrides};
use year_gal::gallery::{self, GalleryOptions};
use year_gal::imaging::RustBackend;
use year_gal::{output, process};

#[derive(Parser)]
#[command(name = "year-gal")]
#[command(about = "Photo gallery builder for one year of event photographs")]
#[command(long_about = "\
Photo gallery builder for one year of event photographs

Reads every image in the year's input folder, orders them by the EXIF
capture date, and writes a display copy and a thumbnail of each under a
sequential name. Finishes by writing an HTML fragment that lists them.

Folder layout (defaults, year 2024):

  original/2024/                   # Input photographs (not recursive)
  │   ├── IMG_4410.JPG
  │   └── screenshot.png           # No capture date → left out
  img/2024/
  │   └── RoboCamp-2024-0001.jpg   # Longer edge ≤ 1500px
  thumb/2024/
  │   └── RoboCamp-2024-0001.jpg   # Longer edge ≤ 500px
  generateGallery.html             # Fragment: 5 visible, rest behind \"show more\"

Images are numbered in capture-date order; the original filename plays no
part. Set RUST_LOG=debug for resize details.

Run 'year-gal gen-config' to generate a documented gallery.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = "gallery.toml", global = true)]
    config: PathBuf,

    /// Year to process; selects {root}/{year}/ folders and the HTML ids
    #[arg(long, global = true)]
    year: Option<String>,

    /// Input folder (default: {original_root}/{year})
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Display copy folder (default: {img_root}/{year})
    #[arg(long, global = true)]
    full_output: Option<PathBuf>,

    /// Thumbnail folder (default: {thumb_root}/{year})
    #[arg(long, global = true)]
    thumb_output: Option<PathBuf>,

    /// Output filename prefix (default: {label}-{year})
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// HTML fragment path
    #[arg(long, global = true)]
    html_output: Option<PathBuf>,

    /// Log resize details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn overrides(&self) -> JobOverrides {
        JobOverrides {
            year: self.year.clone(),
            input: self.input.clone(),
            full_output: self.full_output.clone(),
            thumb_output: self.thumb_output.clone(),
            prefix: self.prefix.clone(),
            html_output: self.html_output.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Resize, rename, and write the HTML fragment
    Build,
    /// Show the naming plan without writing anything
    Check,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match &cli.command {
        Command::Build => {
            let (config, job) = load_job(&cli)?;
            println!("==> Processing images for the year {}", job.year);
            init_thread_pool(&config.processing);

            let process_config = process::ProcessConfig::from_gallery_config(&config);
            let result = output::with_progress_printer(
                |tx| process::process(&job, &process_config, Some(tx)),
                |line| println!("{}", line),
            )
            .map_err(|_| "progress printer thread panicked")??;

            let options = GalleryOptions::from_layout_config(&config.gallery);
            gallery::write_gallery(&result.names, &job, &options)?;
            output::print_build_summary(
                &result.excluded,
                &result.stale,
                &job.html_output,
                result.names.len(),
                options.visible_count,
            );
            println!("==> Processing completed");
        }
        Command::Check => {
            let (_, job) = load_job(&cli)?;
            let survey = process::survey(&RustBackend::new(), &job)?;
            let stale = process::stale_outputs(&job, survey.planned.len());
            output::print_check_output(&job, &survey, &stale);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `gallery.toml` and apply the command-line overrides.
fn load_job(cli: &Cli) -> Result<(GalleryConfig, Job), config::ConfigError> {
    let config = config::load_config(&cli.config)?;
    let job = Job::resolve(&config, &cli.overrides())?;
    Ok((config, job))
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
