use std::fs::File;
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    cursor, execute,
    style::ResetColor,
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};

use river_hopper::config::{Settings, FRAME_DELAY_MS};
use river_hopper::driver::FrameDriver;
use river_hopper::hal::ButtonLatch;
use river_hopper::term::{spawn_key_reader, TermDisplay, TermSize};

#[derive(Parser, Debug)]
#[command(about = "Hop a frog across traffic and river on an 84x48 panel")]
struct Args {
    /// ms per frame (lower = faster)
    #[arg(long, default_value_t = FRAME_DELAY_MS)]
    frame_ms: u64,

    /// seed for lane jitter and goal rolls; clock-derived when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// roll the goal post position on every level start
    #[arg(long, default_value_t = false)]
    random_goal_post: bool,

    /// skip the credit and title pages
    #[arg(long, default_value_t = false)]
    no_splash: bool,

    /// write logs here (RUST_LOG sets the level); no logging without it
    #[arg(long)]
    log_file: Option<std::path::PathBuf>,
}

impl Args {
    fn into_settings(self) -> Settings {
        let seed = self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
                ^ 0xC0FFEE_u64
        });
        Settings {
            frame_delay: Duration::from_millis(self.frame_ms.max(1)),
            seed,
            random_goal_post: self.random_goal_post,
            splash: !self.no_splash,
            log_file: self.log_file,
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialised")?;
    Ok(())
}

fn main() -> Result<()> {
    let settings = Args::parse().into_settings();
    if let Some(path) = &settings.log_file {
        init_logging(path)?;
    }
    log::info!("starting with seed {:#x}", settings.seed);

    let mut out = io::stdout();

    terminal::enable_raw_mode().context("could not enable raw mode")?;
    execute!(
        out,
        EnterAlternateScreen,
        cursor::Hide,
        DisableLineWrap,
        terminal::Clear(terminal::ClearType::All)
    )?;

    let res = run(out, &settings);

    // restore
    let mut out = io::stdout();
    let _ = execute!(
        out,
        EnableLineWrap,
        cursor::Show,
        LeaveAlternateScreen,
        ResetColor
    );
    let _ = terminal::disable_raw_mode();

    res
}

fn run(out: Stdout, settings: &Settings) -> Result<()> {
    let (cols, rows) = terminal::size().context("could not read terminal size")?;
    let size = Arc::new(TermSize::new(cols, rows));
    let latch = Arc::new(ButtonLatch::new());
    let quit = Arc::new(AtomicBool::new(false));

    let reader = spawn_key_reader(Arc::clone(&latch), Arc::clone(&size), Arc::clone(&quit));

    let display = TermDisplay::new(out, size);
    let mut driver = FrameDriver::new(settings, display, latch);
    let looped = driver.run(&quit);

    quit.store(true, Ordering::Release);
    let read = reader
        .join()
        .map_err(|_| anyhow!("key reader thread panicked"))?;

    looped.context("frame loop failed")?;
    read.context("reading keys failed")?;
    Ok(())
}
