use anyhow::Context;
use crossterm::{
    cursor::{Hide, Show as ShowCursor},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::env;
use std::io::{self, BufWriter, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use fireflower::audio::{Audio, TerminalBell};
use fireflower::constants::{FIXED_DT, LAUNCH_INTERVAL, UNITS_PER_PIXEL};
use fireflower::{Show, Spawner, Surface};

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    bell: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Options),
    Help,
}

fn print_usage() {
    eprintln!("fireflower - Terminal fireworks");
    eprintln!();
    eprintln!("Usage: fireflower [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bell      Ring the terminal bell on launches and explosions");
    eprintln!("  -h, --help  Show this message");
    eprintln!();
    eprintln!("Move the mouse over a rocket, or click or tap it, to set it off early.");
    eprintln!("Press 'q', ESC, or Ctrl+C to exit");
    eprintln!();
    eprintln!("Logging goes to stderr, filtered by RUST_LOG (e.g. RUST_LOG=debug fireflower 2>log)");
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, String> {
    let mut options = Options::default();

    for arg in args {
        match arg.as_str() {
            "--bell" => options.bell = true,
            "help" | "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown option: {other}")),
        }
    }

    Ok(Command::Run(options))
}

fn run<A: Audio>(audio: A) -> io::Result<()> {
    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    let entered = execute!(
        stdout,
        EnterAlternateScreen,
        Hide,
        Clear(ClearType::All),
        EnableMouseCapture
    );
    if let Err(err) = entered {
        if let Err(restore_err) = restore_terminal(&mut stdout) {
            log::warn!("could not restore terminal: {restore_err}");
        }
        return Err(err);
    }

    let result = frame_loop(&mut stdout, audio);
    settle(result, restore_terminal(&mut stdout))
}

/// Leaves the alternate screen and raw mode. Both steps always run.
fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    let screen = execute!(out, ShowCursor, LeaveAlternateScreen, DisableMouseCapture);
    let raw = terminal::disable_raw_mode();
    screen.and(raw)
}

/// An error from the session itself wins over one raised while restoring.
fn settle(result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    result.and(restored)
}

fn frame_loop<A: Audio>(stdout: &mut BufWriter<Stdout>, audio: A) -> io::Result<()> {
    let (mut cols, mut rows) = terminal::size()?;
    let surface = Surface::for_terminal(cols, rows, UNITS_PER_PIXEL);
    log::info!(
        "display started on {cols}x{rows} cells ({:.0}x{:.0} world units)",
        surface.world_width(),
        surface.world_height()
    );

    let mut show = Show::new(surface, audio, fastrand::Rng::new());
    let mut spawner = Spawner::new(LAUNCH_INTERVAL);

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            match &event {
                Event::Key(key_event) => {
                    if key_event.code == KeyCode::Char('q')
                        || key_event.code == KeyCode::Esc
                        || (key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        break;
                    }
                }
                Event::Resize(new_cols, new_rows) => {
                    // The surface keeps its startup size; only the visible part changes.
                    cols = *new_cols;
                    rows = *new_rows;
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => show.handle_event(&event),
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame);
        last_frame = now;

        if spawner.advance(frame_time) {
            show.launch();
        }

        accumulator += frame_time.as_secs_f32();
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        let mut stepped = false;
        while accumulator >= FIXED_DT {
            show.tick();
            accumulator -= FIXED_DT;
            stepped = true;
        }

        if stepped {
            show.present(stdout, cols, rows)?;
        }
    }

    log::info!("display stopped");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = match parse_args(env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_usage();
            return Ok(());
        }
        Err(message) => {
            eprintln!("{message}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    let audio = options.bell.then(TerminalBell::default);
    run(audio).context("terminal session failed")
}
