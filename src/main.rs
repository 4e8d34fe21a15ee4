mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use space_blaster::config::GameConfig;
use space_blaster::entities::{GameEvent, InputState};
use space_blaster::highscore::{load_or_zero, save_quietly, FileStore};
use space_blaster::view::FrameView;
use space_blaster::{init_state, tick};

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: stderr would scribble over the alternate screen.
fn init_logging(config: &GameConfig) {
    let Ok(file) = File::create(&config.log_path) else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

// ── Input decoding ────────────────────────────────────────────────────────────

/// Drain pending key events into `key_frame` and build this tick's input.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Held actions (movement, fire) read the map; one-shot
/// actions (start, pause, restart, quit) are taken straight from `Press`
/// events so they fire exactly once.
fn poll_input(
    rx: &mpsc::Receiver<Event>,
    key_frame: &mut HashMap<KeyCode, u64>,
    frame: u64,
) -> InputState {
    let mut input = InputState::default();

    while let Ok(ev) = rx.try_recv() {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            continue;
        };
        match kind {
            // Press: record key + handle one-shot actions
            KeyEventKind::Press => {
                key_frame.insert(code, frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => input.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        input.quit = true;
                    }
                    KeyCode::Char('p') | KeyCode::Char('P') => input.pause = true,
                    KeyCode::Char('r') | KeyCode::Char('R') => input.restart = true,
                    KeyCode::Enter | KeyCode::Char(' ') => input.start = true,
                    _ => {}
                }
            }
            // Repeat: refresh timestamp so key stays "held"
            KeyEventKind::Repeat => {
                key_frame.insert(code, frame);
            }
            // Release: remove key immediately (keyboard-enhancement path)
            KeyEventKind::Release => {
                key_frame.remove(&code);
            }
        }
    }

    use KeyCode::Char;
    input.left = any_held(key_frame, &[KeyCode::Left, Char('a'), Char('A')], frame);
    input.right = any_held(key_frame, &[KeyCode::Right, Char('d'), Char('D')], frame);
    input.up = any_held(key_frame, &[KeyCode::Up, Char('w'), Char('W')], frame);
    input.down = any_held(key_frame, &[KeyCode::Down, Char('s'), Char('S')], frame);
    input.fire = any_held(key_frame, &[Char(' '), KeyCode::Enter], frame);
    input
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: &GameConfig) -> std::io::Result<()> {
    let store = FileStore::new(&config.high_score_path);
    let mut saved_best = load_or_zero(&store);
    let mut state = init_state(config.width, config.height, saved_best);
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let frame_len = config.frame();
    let started = Instant::now();
    let mut elapsed_ms: u64 = 0;
    let mut frame: u64 = 0;

    log::info!("{} started, best score {}", config.title, saved_best);

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let input = poll_input(rx, &mut key_frame, frame);

        // Measured delta; summing whole ms from a fixed origin never drifts.
        let now_ms = started.elapsed().as_millis() as u64;
        let dt_ms = now_ms - elapsed_ms;
        elapsed_ms = now_ms;

        state = tick(&state, &input, dt_ms, &mut rng);

        for event in &state.events {
            match *event {
                GameEvent::HighScoreCommitted(best) if best > saved_best => {
                    save_quietly(&store, best);
                    saved_best = best;
                }
                _ => {}
            }
        }

        if state.exit_requested {
            break;
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, &FrameView::capture(&state), cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }

    // Best effort on the way out: a session quit mid-run still counts.
    let best = state.high_score.max(state.score);
    if best > saved_best {
        save_quietly(&store, best);
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let config = GameConfig::default();
    init_logging(&config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(&config.title))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
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

    let result = run(&mut out, &rx, &config);
    if let Err(e) = &result {
        log::error!("terminal error: {}", e);
    }

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
