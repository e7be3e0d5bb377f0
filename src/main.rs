//! Terminal blockfall runner (default binary).
//!
//! Reads keys with crossterm, advances the engine with the real elapsed time
//! between frames, and draws through the framebuffer renderer.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};
use tracing::{debug, info, Level};
use tracing_subscriber::prelude::*;

use blockfall::core::{EngineConfig, GameEngine, GameSnapshot};
use blockfall::input::{translate, Command};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{EngineEvent, TICK_MS};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Falling-block puzzle in the terminal")]
struct Cli {
    #[arg(long, help = "Path to a JSON engine configuration")]
    config: Option<PathBuf>,

    #[arg(long, help = "Seed for the piece generator (random when omitted)")]
    seed: Option<u64>,

    #[arg(long, help = "Write logs to this file (the terminal is busy drawing)")]
    log_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "info", help = "Minimum level written to the log file")]
    log_level: LogLevel,

    #[arg(long, help = "Do not draw the landing preview")]
    no_ghost: bool,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            cli.log_level.into(),
        ))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut engine = GameEngine::with_config(config, seed).context("invalid engine configuration")?;
    info!(seed, "starting round");

    let view = GameView::default().with_ghost(!cli.no_ghost);
    let mut term = TerminalRenderer::stdout();
    term.enter()?;

    let result = run(&mut term, &mut engine, &view);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, engine: &mut GameEngine, view: &GameView) -> Result<()> {
    let mut snap = GameSnapshot::default();
    let mut frame = FrameBuffer::new(0, 0);
    let frame_time = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        engine.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size()?;
        view.render_into(&snap, Viewport::new(w, h), &mut frame);
        term.present(&mut frame)?;

        let timeout = frame_time.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match translate(key) {
                    Some(Command::Quit) => {
                        info!(lines = engine.lines(), "quit");
                        return Ok(());
                    }
                    Some(Command::Game(action)) => {
                        let applied = engine.apply_action(action);
                        debug!(action = action.as_str(), applied, "input");
                    }
                    None => {}
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame_time {
            last_tick = Instant::now();
            engine.advance(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));
        }

        for event in engine.drain_events() {
            match event {
                EngineEvent::LinesCleared(n) => info!(lines = n, "lines cleared"),
                EngineEvent::GameOver => info!("round over"),
                other => debug!(event = ?other, "engine event"),
            }
        }
    }
}
