// What you SEE:
// • A blank canvas. Hold Left Mouse and drag to draw cells in the current color.
// • ESC while dragging cancels the stroke and wipes the whole canvas.
// • C clears. S saves (--save / --png). [ and ] change the cell size. 1-8 pick a color.
// • Close the window to quit.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use pixel_pencil::window::{Drawer, HostCommand};
use pixel_pencil::{
    persist, Color, EventKind, FrameBuffer, Pencil, PencilConfig, PencilEvent, Subscriptions,
};

const PALETTE: [Color; 8] = [
    Color::rgb(0x00, 0x00, 0x00),
    Color::rgb(0xe6, 0x39, 0x46),
    Color::rgb(0xf4, 0xa2, 0x61),
    Color::rgb(0xe9, 0xc4, 0x6a),
    Color::rgb(0x2a, 0x9d, 0x8f),
    Color::rgb(0x26, 0x46, 0x9d),
    Color::rgb(0x9b, 0x5d, 0xe5),
    Color::rgb(0xff, 0xff, 0xff),
];

#[derive(Parser, Debug)]
#[command(author, version, about = "Draw on a grid of square cells")]
struct Cli {
    /// Canvas width in screen pixels
    #[arg(long, default_value_t = 640)]
    width: usize,
    /// Canvas height in screen pixels
    #[arg(long, default_value_t = 480)]
    height: usize,
    /// Screen pixels per cell (overrides the config file)
    #[arg(long)]
    pixel_size: Option<u32>,
    /// Pencil color, any CSS color (overrides the config file)
    #[arg(long)]
    color: Option<String>,
    /// Canvas background, any CSS color
    #[arg(long, default_value = "white")]
    background: String,
    /// JSON file with `pixelSize` / `color`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Pixel file to open on start
    #[arg(long)]
    load: Option<PathBuf>,
    /// Pixel file written on S and on exit
    #[arg(long)]
    save: Option<PathBuf>,
    /// PNG written on S and on exit
    #[arg(long)]
    png: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.pencil_config()?;
    let background = Color::parse(&cli.background)?;

    /* --- Window + surface ---
       Visual: window opens showing the empty canvas. */
    let mut drawer = Drawer::new("Pixel Pencil", cli.width, cli.height)?;
    let screen = FrameBuffer::new(cli.width, cli.height, background);
    let mut pencil = Pencil::new(screen, Subscriptions::new(), config);

    pencil.on(EventKind::Result, |event| {
        let PencilEvent::Result { result } = event;
        info!(samples = result.len(), "stroke finished");
    });

    if let Some(path) = &cli.load {
        let grid = persist::load_json(path).with_context(|| format!("failed to load {:?}", path))?;
        pencil.load_pixels(&grid);
    }
    pencil.enable();

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() {
        // 1) Pointer + Escape go to the pencil, but only while it listens for them.
        for event in drawer.poll_events() {
            if pencil.input().wants(&event) {
                pencil.handle(event);
            }
        }

        // 2) Host keys.
        for command in drawer.commands() {
            match command {
                HostCommand::Clear => pencil.clear(),
                HostCommand::Save => cli.save_outputs(&pencil, background)?,
                HostCommand::ShrinkPixels => pencil.set_pixel_size(pencil.pixel_size().saturating_sub(1)),
                HostCommand::GrowPixels => pencil.set_pixel_size(pencil.pixel_size() + 1),
                HostCommand::Palette(slot) => {
                    if let Some(&color) = PALETTE.get(slot) {
                        pencil.set_color(color);
                        info!(%color, "color picked");
                    }
                },
            }
        }

        // 3) Present (this is when the on-screen image updates).
        drawer.present(pencil.surface())?;

        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / now.duration_since(last_fps_time).as_secs_f32();
            debug!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    cli.save_outputs(&pencil, background)?;
    Ok(())
}

impl Cli {
    fn pencil_config(&self) -> Result<PencilConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => PencilConfig::default(),
        };
        if let Some(pixel_size) = self.pixel_size {
            config.pixel_size = pixel_size;
        }
        if let Some(color) = &self.color {
            config.color = Color::parse(color)?;
        }
        if config.pixel_size == 0 {
            warn!("pixel size 0 is not drawable, using 1");
            config.pixel_size = 1;
        }
        Ok(config)
    }

    fn save_outputs(&self, pencil: &Pencil<FrameBuffer, Subscriptions>, background: Color) -> Result<()> {
        let grid = pencil.pixels();
        if let Some(path) = &self.save {
            persist::save_json(path, &grid).with_context(|| format!("failed to save {:?}", path))?;
        }
        if let Some(path) = &self.png {
            persist::export_png(path, &grid, pencil.extent(), pencil.pixel_size(), background)
                .with_context(|| format!("failed to export {:?}", path))?;
        }
        Ok(())
    }
}

fn read_config(path: &Path) -> Result<PencilConfig> {
    let file = File::open(path).with_context(|| format!("failed to open config {:?}", path))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("failed to parse config {:?}", path))
}
