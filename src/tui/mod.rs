//! Terminal UI for coin_tictactoe.
//!
//! The TUI subscribes to the controller's events and forwards key presses
//! as controller inputs. The computer's reply is resolved once its pacing
//! delay has elapsed; a reset in the meantime simply drops the ticket.

mod app;
mod input;
mod labels;
mod theme;
mod ui;

pub use app::{Action, App, HOW_TO_PLAY};
pub use labels::PlayerLabels;
pub use theme::{Theme, load_dark_mode, save_dark_mode};

use std::io::{self, Stdout};
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument, warn};

use crate::config::GameConfig;
use crate::controller::{GameController, GameEvent, MoveReport, PendingReply};
use crate::games::tictactoe::GameMode;
use crate::ledger::RewardLedger;
use crate::store::{KeyValueStore, SqliteStore};

/// Runs the terminal game until the user quits.
#[instrument(skip(config), fields(db_path = %config.db_path(), mode = %config.mode()))]
pub async fn run_tui(config: GameConfig) -> Result<()> {
    info!("Starting terminal game");

    let store = SqliteStore::open(config.db_path().clone())?;
    let dark_mode = load_dark_mode(&store);
    let ledger = RewardLedger::load(store);
    let mut controller = GameController::new(
        *config.mode(),
        ledger,
        StdRng::from_entropy(),
        config.computer_delay(),
    );
    let mut events = controller.subscribe();
    let mut app = App::new(*config.mode(), controller.balance(), dark_mode);

    let mut terminal = enter_terminal()?;

    let res = run_game_loop(&mut terminal, &mut controller, &mut app, &mut events).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Switches to raw mode and the alternate screen.
///
/// Raw mode is undone again if a later setup step fails.
fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    undo_on_error(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )
}

/// Runs `setup`, calling `undo` if it fails.
fn undo_on_error<T>(setup: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|e| {
        error!(error = ?e, "Terminal setup failed, restoring");
        undo();
    })
}

/// Event loop: drain events, draw, resolve a due computer reply, read a key.
#[instrument(skip_all)]
async fn run_game_loop<B, S, R>(
    terminal: &mut Terminal<B>,
    controller: &mut GameController<S, R>,
    app: &mut App,
    events: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()>
where
    B: ratatui::backend::Backend,
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
    S: KeyValueStore,
    R: rand::Rng,
{
    let mut pending: Option<(PendingReply, Instant)> = None;

    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if let Some((reply, due)) = pending
            && Instant::now() >= due
        {
            pending = match controller.resolve_computer_move(reply) {
                Ok(report) => schedule(&report),
                Err(e) => {
                    debug!(error = %e, "Computer reply dropped");
                    None
                }
            };
            continue;
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }

            match app.action_for_key(key.code) {
                Action::Move(index) => match controller.request_move(index) {
                    Ok(report) => pending = schedule(&report),
                    Err(e) => app.set_notice(e.to_string()),
                },
                Action::Reset => {
                    pending = None;
                    controller.reset_game();
                }
                Action::ToggleMode => {
                    pending = None;
                    let mode = match controller.session().mode() {
                        GameMode::TwoPlayer => GameMode::VsComputer,
                        GameMode::VsComputer => GameMode::TwoPlayer,
                    };
                    controller.set_mode(mode);
                }
                Action::ResetCoins => {
                    if let Err(e) = controller.reset_coins() {
                        warn!(error = %e, "Failed to persist coin reset");
                        app.set_notice("Could not save coins");
                    }
                }
                Action::ToggleTheme => {
                    let dark = app.toggle_theme();
                    if let Err(e) = save_dark_mode(controller.store_mut(), dark) {
                        warn!(error = %e, "Failed to persist theme");
                    }
                }
                Action::ToggleHelp => app.toggle_help(),
                Action::RenamePlayers => app.start_renaming(),
                Action::Quit => {
                    info!("User quit");
                    return Ok(());
                }
                Action::None => {}
            }
        }

        sleep(Duration::from_millis(10)).await;
    }
}

/// Returns when the computer's reply falls due, if the move asked for one.
fn schedule(report: &MoveReport) -> Option<(PendingReply, Instant)> {
    report
        .pending_reply
        .map(|reply| (reply, Instant::now() + reply.delay()))
}
