use clap::Parser;
use gallery_normalize::normalize::{self, NormalizeSettings};
use gallery_normalize::{config, output};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gallery-normalize")]
#[command(version)]
#[command(about = "Resize and recompress event photos into web-ready gallery JPEGs")]
#[command(long_about = "\
Resize and recompress event photos into web-ready gallery JPEGs

Every jpg, jpeg, png, and heic file directly inside the source directory is
read, flattened onto white if it has transparency, scaled down to fit
1920x1080 (never up), and saved as a quality-85 JPEG:

  photos/                      <site-root>/assets/images/gallery/
  ├── IMG_0001.jpg      →      ├── event-001.jpg
  ├── IMG_0002.HEIC     →      ├── event-002.jpg
  └── logo.png          →      └── event-003.jpg

Files are numbered in sorted filename order. A file that fails keeps its
number, so the output may have gaps. The run finishes by printing a
`const photoFiles = [...]` snippet for the site's gallery script.

Defaults can be overridden with a gallery.toml in the site root.
Run 'gallery-normalize --gen-config' to print a documented one.")]
struct Cli {
    /// Directory of source photos
    source: Option<PathBuf>,

    /// Site root: gallery.toml is read from here and the output directory is relative to it
    #[arg(long, default_value = ".")]
    site_root: PathBuf,

    /// Print a stock gallery.toml with all options documented
    #[arg(long)]
    gen_config: bool,

    /// Anything after the source directory is ignored
    #[arg(hide = true)]
    _ignored: Vec<PathBuf>,
}

fn main() -> ExitCode {
    // Argument errors exit 1 like every other failure; --help and --version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return ExitCode::SUCCESS;
    }

    let Some(source) = cli.source else {
        output::print_usage();
        return ExitCode::FAILURE;
    };

    match run(&source, &cli.site_root) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load config, normalize, print the summary.
///
/// Per-file failures are part of a successful run; only fatal errors return `Err`.
fn run(source: &Path, site_root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let site_config = config::load_config(site_root)?;
    let settings = NormalizeSettings::from_config(&site_config);
    let output_dir = site_root.join(&site_config.output.dir);

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_normalize_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = normalize::normalize(source, &output_dir, &settings, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;

    let outcome = result?;
    output::print_summary(&outcome, &output_dir);
    Ok(())
}
