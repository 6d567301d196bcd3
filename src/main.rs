// What you SEE:
// • The live camera, mirrored, in a window.
// • Hold up something bright yellow: a dot follows its top edge and leaves a trail of ink
//   in the color of the object itself.
// • Hide the object to lift the pen. C clears the board. Q or ESC quits.

use std::path::PathBuf;

use clap::Parser;
use glass_board::app::{self, FrameSource};
use glass_board::camera::CameraCapture;
use glass_board::draw::Drawer;
use glass_board::{BoardConfig, DrawingPipeline, Result, logging};
use tracing::info;

#[derive(Parser)]
#[command(name = "glass-board", about = "Draw in the air with a colored marker", version)]
struct Cli {
    /// JSON config file; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Camera device index
    #[arg(short, long)]
    device: Option<u32>,

    /// Requested frame width
    #[arg(long)]
    width: Option<u32>,

    /// Requested frame height
    #[arg(long)]
    height: Option<u32>,

    /// Show the camera image as-is instead of mirrored
    #[arg(long)]
    no_mirror: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<BoardConfig> {
        let mut config = match &self.config {
            Some(path) => BoardConfig::load(path)?,
            None => BoardConfig::default(),
        };
        if let Some(index) = self.device {
            config.camera.index = index;
        }
        if let Some(width) = self.width {
            config.camera.width = width;
        }
        if let Some(height) = self.height {
            config.camera.height = height;
        }
        if self.no_mirror {
            config.camera.mirror = false;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    logging::init_logging(&config.logging);
    // Bad settings fail here, before any device is touched.
    config.validate()?;
    info!(tracking = ?config.tracking, stroke = ?config.stroke, "starting glass board");
    info!("Controls: C = clear, Q / ESC = quit");

    /* --- Camera + window setup --- */
    let mut cam = CameraCapture::new(config.camera.index, config.camera.width, config.camera.height)?;
    let (w, h) = cam.resolution();
    let mut drawer = Drawer::new("Virtual Glass Table", w as usize, h as usize)?;

    let mut pipeline = DrawingPipeline::new(&config);
    let stats = app::run(&mut cam, &mut drawer, &mut pipeline, config.camera.mirror);

    cam.release();
    stats.map(|_| ())
}
