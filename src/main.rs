//! Terminal runner (default binary).
//!
//! Parses the command line, builds a session, then drives it at a fixed tick
//! until the player quits or the stack reaches the top.

use std::io;
use std::thread;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use console_tetris::cli::{Args, Timing};
use console_tetris::core::{EndReason, GameSession, GameSnapshot, SessionState, SimpleRng};
use console_tetris::input::TerminalInput;
use console_tetris::logging;
use console_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref(), args.log_level)?;

    let seed = args.resolve_seed();
    // Bad sizes or speeds fail here, before the terminal changes mode.
    let mut session = GameSession::new(args.session_config(), SimpleRng::new(seed))?;
    info!(seed, config = ?session.config(), "session started");

    install_panic_hook();
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, args.timing());

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!(error = %err, "terminal restore failed");
    }
    result?;

    println!(
        "score {}  level {}  pieces {}  (seed {})",
        session.score(),
        session.level(),
        session.piece_count(),
        seed
    );
    Ok(())
}

struct Screen {
    view: GameView,
    fb: FrameBuffer,
    snap: GameSnapshot,
}

impl Screen {
    fn new() -> Self {
        Self {
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            snap: GameSnapshot::default(),
        }
    }

    fn draw(&mut self, term: &mut TerminalRenderer, session: &GameSession) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut self.snap);
        self.view
            .render_into(&self.snap, Viewport::new(w, h), &mut self.fb);
        term.draw_swap(&mut self.fb)
    }
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession, timing: Timing) -> Result<()> {
    let mut screen = Screen::new();
    let mut input = TerminalInput::new();

    while !session.is_over() {
        screen.draw(term, session)?;

        let intents = input.poll_tick(timing.tick)?;
        if input.take_resized() {
            term.invalidate();
        }

        let outcome = session.advance(intents);
        if outcome.rows_marked > 0 {
            // Show the marked rows before they collapse.
            screen.draw(term, session)?;
            thread::sleep(timing.clear_pause);
        }
        session.resolve_clears();
    }

    if session.state() == SessionState::GameOver(EndReason::Blocked) {
        screen.draw(term, session)?;
        // Hold the final board until any mapped key.
        while input.poll_tick(timing.tick)?.is_empty() {
            if input.take_resized() {
                term.invalidate();
                screen.draw(term, session)?;
            }
        }
    }
    Ok(())
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::ExecutableCommand::execute(
            &mut io::stderr(),
            crossterm::style::ResetColor,
        );
        let _ = crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::cursor::Show);
        let _ = crossterm::ExecutableCommand::execute(
            &mut io::stderr(),
            crossterm::terminal::LeaveAlternateScreen,
        );
        default_hook(panic_info);
    }));
}
