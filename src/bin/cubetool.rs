use clap::{Parser, Subcommand};
use cube_grid::pipeline::{DirectoryFrames, FrameReport, run_frames};
use cube_grid::tools::{
    NOMINAL_FRAME_WIDTH, STICKER_CONTOUR_COLOR, STICKER_CONTOUR_THICKNESS, draw_grid, load_rgb,
    write_report,
};
use cube_grid::utils::contours::extract_polygons;
use cube_grid::utils::preprocess::to_edge_mask;
use cube_grid::{Detector, DetectorConfig, StickerGrid};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cubetool", version, about = "Cube face grid detection tools")]
struct Cli {
    /// JSON detector config (defaults apply to missing fields)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Downscale wider single images to this width before detection (0 disables)
    #[arg(long, global = true, default_value_t = NOMINAL_FRAME_WIDTH)]
    max_width: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect a cube face in a single image
    Detect {
        #[arg(long)]
        image: PathBuf,
        /// Write a copy of the image with the stickers outlined
        #[arg(long)]
        annotate: Option<PathBuf>,
    },
    /// Print per-stage counters and the sticker candidates for an image
    DebugDetect {
        #[arg(long)]
        image: PathBuf,
    },
    /// Run detection over a directory of frames
    Scan {
        #[arg(long)]
        frames: PathBuf,
        /// Directory for annotated frames
        #[arg(long)]
        out: Option<PathBuf>,
        /// File for the per-frame JSON report
        #[arg(long)]
        json: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Write the edge mask the detector works on
    Edges {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => DetectorConfig::load(path)?,
        None => DetectorConfig::default(),
    }
    .with_env_overrides()?;
    let detector = Detector::with_config(config);
    let max_width = (cli.max_width > 0).then_some(cli.max_width);

    match cli.command {
        Command::Detect { image, annotate } => {
            detect_cmd(&detector, &image, max_width, annotate.as_deref())
        }
        Command::DebugDetect { image } => debug_detect_cmd(&detector, &image, max_width),
        Command::Scan {
            frames,
            out,
            json,
            limit,
        } => scan_cmd(&detector, &frames, out.as_deref(), json.as_deref(), limit),
        Command::Edges { image, out } => edges_cmd(&detector, &image, max_width, &out),
    }
}

fn print_grid(grid: &StickerGrid) {
    let face = grid.bounds();
    println!("  face: ({},{} {}x{})", face.x, face.y, face.w, face.h);
    for (row, stickers) in grid.rows().enumerate() {
        let cells: Vec<String> = stickers
            .iter()
            .map(|b| format!("({},{} {}x{})", b.x, b.y, b.w, b.h))
            .collect();
        println!("  row {}: {}", row, cells.join(" "));
    }
}

fn detect_cmd(
    detector: &Detector,
    image: &Path,
    max_width: Option<u32>,
    annotate: Option<&Path>,
) -> CliResult<()> {
    let mut frame = load_rgb(image, max_width)?;
    let (width, height) = frame.dimensions();
    println!("Image: {} ({}x{})", image.display(), width, height);

    let start = Instant::now();
    let grid = detector.detect_frame(&frame);
    let elapsed = start.elapsed();

    match &grid {
        Some(grid) => {
            println!("Found cube face in {:.2?}", elapsed);
            print_grid(grid);
        }
        None => println!("No cube face found ({:.2?})", elapsed),
    }

    if let Some(path) = annotate {
        if let Some(grid) = &grid {
            draw_grid(&mut frame, grid, STICKER_CONTOUR_COLOR, STICKER_CONTOUR_THICKNESS);
        }
        frame.save(path)?;
        println!("Annotated image written to {}", path.display());
    }
    Ok(())
}

fn debug_detect_cmd(detector: &Detector, image: &Path, max_width: Option<u32>) -> CliResult<()> {
    let frame = load_rgb(image, max_width)?;
    let (width, height) = frame.dimensions();
    println!("Image: {} ({}x{})", image.display(), width, height);

    let mask = to_edge_mask(&frame, &detector.config().preprocess);
    let edge_pixels = mask.pixels().filter(|p| p[0] > 0).count();
    println!(
        "Edge mask: {} of {} pixels set ({:.2}%)",
        edge_pixels,
        width as usize * height as usize,
        100.0 * edge_pixels as f64 / (width as f64 * height as f64).max(1.0)
    );

    let polygons = extract_polygons(&mask);
    let candidates = cube_grid::filter_squares(&polygons, &detector.config().square);
    println!("Found {} sticker candidates", candidates.len());
    for (i, b) in candidates.iter().take(20).enumerate() {
        let c = b.center();
        println!(
            "  Candidate {}: box=({}, {}, {}x{}) center=({:.1}, {:.1})",
            i, b.x, b.y, b.w, b.h, c.x, c.y
        );
    }

    let (grid, telemetry) = detector.detect_mask_with_telemetry(&mask);
    println!(
        "contours={} quads={} candidates={} best_neighbors={} grid_found={}",
        telemetry.contours,
        telemetry.quadrilaterals,
        telemetry.candidates,
        telemetry.best_neighbor_count,
        telemetry.grid_found
    );
    if let Some(grid) = &grid {
        print_grid(grid);
    }
    Ok(())
}

fn scan_cmd(
    detector: &Detector,
    frames: &Path,
    out: Option<&Path>,
    json: Option<&Path>,
    limit: Option<usize>,
) -> CliResult<()> {
    if let Some(dir) = out {
        std::fs::create_dir_all(dir)?;
    }

    let mut source = DirectoryFrames::open(frames, limit)?;
    println!("Scanning {} frames in {}", source.remaining(), frames.display());
    let mut reports: Vec<FrameReport> = Vec::new();
    let mut write_error: Option<image::ImageError> = None;
    let start = Instant::now();

    let summary = run_frames(&mut source, detector, |frame, report| {
        if let Some(dir) = out.filter(|_| write_error.is_none()) {
            let mut annotated = frame.clone();
            if let Some(grid) = &report.grid {
                draw_grid(&mut annotated, grid, STICKER_CONTOUR_COLOR, STICKER_CONTOUR_THICKNESS);
            }
            let path = dir.join(format!("frame_{:05}.png", report.index));
            if let Err(err) = annotated.save(&path) {
                write_error = Some(err);
            }
        }
        reports.push(report.clone());
    });

    if let Some(err) = write_error {
        return Err(err.into());
    }

    let elapsed = start.elapsed();
    let rate = if summary.frames == 0 {
        0.0
    } else {
        100.0 * summary.frames_with_grid as f64 / summary.frames as f64
    };
    println!(
        "Frames: {}  with grid: {} ({:.1}%)  time: {:.2?}",
        summary.frames, summary.frames_with_grid, rate, elapsed
    );

    if let Some(path) = json {
        write_report(path, &reports)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn edges_cmd(
    detector: &Detector,
    image: &Path,
    max_width: Option<u32>,
    out: &Path,
) -> CliResult<()> {
    let frame = load_rgb(image, max_width)?;
    let mask = to_edge_mask(&frame, &detector.config().preprocess);
    mask.save(out)?;
    println!("Edge mask written to {}", out.display());
    Ok(())
}
