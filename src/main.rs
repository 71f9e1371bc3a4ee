use std::fs::File;
use std::io::{stdout, BufWriter, Stdout, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::{thread_rng, Rng};

use shooting_range::assets::{AssetLoader, Assets, GlyphAssets, SoundEffect};
use shooting_range::constants::{FRAME_RATE, WINDOW_TITLE};
use shooting_range::display::{TerminalRenderer, Viewport};
use shooting_range::input::KeyTracker;
use shooting_range::session::{Control, Session};

const FRAME: Duration = Duration::from_micros(1_000_000 / FRAME_RATE);
const LOG_FILE: &str = "shooting_range.log";

/// Logging goes to a file: the terminal itself is the game screen.
/// Nothing is written unless `RUST_LOG` is set.
fn init_logging() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create(LOG_FILE).with_context(|| format!("creating {}", LOG_FILE))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    // Asset failures are fatal, and are reported before the terminal is
    // taken over.
    let loader = GlyphAssets;
    let assets = loader.load_sprites().context("loading sprites")?;
    let shot_sound = loader.load_shot_sound().context("loading shot sound")?;

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(WINDOW_TITLE))?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let session = Session::new(thread_rng(), shot_sound);
    let result = run(&mut out, &rx, session, &assets);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<R: Rng, S: SoundEffect>(
    out: &mut BufWriter<Stdout>,
    rx: &mpsc::Receiver<Event>,
    mut session: Session<R, S>,
    assets: &Assets,
) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(out.by_ref(), Viewport::new(cols, rows));
    let mut keys = KeyTracker::new();

    let epoch = Instant::now();
    let mut last = epoch;

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last).as_secs_f32();
        last = frame_start;
        let now = frame_start.duration_since(epoch).as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        keys.begin_frame();
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                renderer.resize(Viewport::new(cols, rows));
                continue;
            }
            keys.handle(&ev, &renderer.viewport());
        }
        let input = keys.sample();

        if session.tick(&input, now, dt) == Control::Quit {
            return Ok(());
        }
        session.render(&mut renderer, assets, now)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}
