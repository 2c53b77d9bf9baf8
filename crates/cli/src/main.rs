mod session_logger;

use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use facecapture_core::capture::domain::display::FrameDisplay;
use facecapture_core::capture::domain::frame_source::FrameSource;
use facecapture_core::capture::domain::image_writer::ImageWriter;
use facecapture_core::capture::infrastructure::image_file_writer::ImageFileWriter;
use facecapture_core::capture::infrastructure::opencv_camera::OpencvCamera;
use facecapture_core::capture::infrastructure::opencv_display::OpencvDisplay;
use facecapture_core::detection::domain::box_deduplicator::{
    BoxDeduplicator, FixedPointBoxMerger, GreedyBoxMerger,
};
use facecapture_core::detection::domain::face_detector::FaceDetector;
use facecapture_core::detection::infrastructure::model_resolver;
use facecapture_core::detection::infrastructure::onnx_blazeface_detector::OnnxBlazefaceDetector;
use facecapture_core::pipeline::capture_faces_use_case::CaptureFacesUseCase;
use facecapture_core::shared::constants::{
    BLAZEFACE_MODEL_NAME, BLAZEFACE_MODEL_URL, RAW_DATA_DIR,
};

/// Webcam face capture: preview detected faces and save crops on demand.
#[derive(Parser)]
#[command(name = "facecapture")]
struct Cli {
    /// Camera device index.
    #[arg(long, default_value = "0")]
    device: u32,

    /// User the captured faces are filed under (prompted if omitted).
    #[arg(long)]
    user: Option<String>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f64,

    /// Overlap threshold above which detected boxes are merged (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    iou_threshold: f64,

    /// Box merge strategy: greedy or fixed-point.
    #[arg(long, default_value = "greedy")]
    merge_strategy: String,

    /// Root directory for captured face images.
    #[arg(long, default_value = RAW_DATA_DIR)]
    output: PathBuf,

    /// Preview window title.
    #[arg(long, default_value = "facecapture")]
    window: String,
}

fn main() {
    let log_handle = match session_logger::init(&PathBuf::from("."), log::LevelFilter::Info) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: could not set up logging: {e}");
            process::exit(1);
        }
    };

    let result = run();
    log_handle.flush();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        eprintln!("See {} for details", log_handle.path().display());
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let user = match cli.user {
        Some(user) => user,
        None => prompt_user_name()?,
    };

    let detector = build_detector(&cli)?;
    let deduplicator = build_deduplicator(&cli);
    let source: Box<dyn FrameSource> = Box::new(OpencvCamera::new(cli.device));
    let display: Box<dyn FrameDisplay> = Box::new(OpencvDisplay::new(&cli.window));
    let image_writer: Box<dyn ImageWriter> = Box::new(ImageFileWriter::new());

    let mut use_case = CaptureFacesUseCase::new(
        source,
        detector,
        deduplicator,
        display,
        image_writer,
        &cli.output,
    );
    let summary = use_case.execute(&user)?;

    eprintln!(
        "Captured {} face(s) over {} frame(s); images are under {}",
        summary.faces_saved,
        summary.frames_processed,
        cli.output.join(&user).display()
    );
    Ok(())
}

fn prompt_user_name() -> Result<String, Box<dyn std::error::Error>> {
    eprint!("Enter User Name: ");
    std::io::stderr().flush()?;
    let mut name = String::new();
    std::io::stdin().read_line(&mut name)?;
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err("User name must not be empty".into());
    }
    Ok(name)
}

fn build_detector(cli: &Cli) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {BLAZEFACE_MODEL_NAME}");
    let model_path = model_resolver::resolve(
        BLAZEFACE_MODEL_NAME,
        BLAZEFACE_MODEL_URL,
        None,
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    Ok(Box::new(OnnxBlazefaceDetector::new(
        &model_path,
        cli.confidence,
    )?))
}

fn build_deduplicator(cli: &Cli) -> Box<dyn BoxDeduplicator> {
    if cli.merge_strategy == "fixed-point" {
        Box::new(FixedPointBoxMerger::new(cli.iou_threshold))
    } else {
        Box::new(GreedyBoxMerger::new(cli.iou_threshold))
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if !(0.0..=1.0).contains(&cli.iou_threshold) {
        return Err(format!(
            "IoU threshold must be between 0.0 and 1.0, got {}",
            cli.iou_threshold
        )
        .into());
    }
    if cli.merge_strategy != "greedy" && cli.merge_strategy != "fixed-point" {
        return Err(format!(
            "Merge strategy must be 'greedy' or 'fixed-point', got '{}'",
            cli.merge_strategy
        )
        .into());
    }
    if let Some(user) = &cli.user {
        if user.trim().is_empty() {
            return Err("User name must not be empty".into());
        }
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}
