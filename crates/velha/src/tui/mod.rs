//! Terminal surface for playing velha.

mod input;
mod surface;
mod ui;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, instrument};
use velha::{GameSession, KeyValueStore, Presenter};

use input::Action;
use surface::TerminalSurface;

/// Runs the game until the player quits.
#[instrument(skip(store))]
pub fn run<S: KeyValueStore>(store: S) -> Result<()> {
    let mut session = GameSession::load(store);
    let mut surface = TerminalSurface::enter()?;

    let res = event_loop(&mut session, &mut surface);
    surface.leave()?;
    info!("Terminal restored");
    res
}

fn event_loop<S: KeyValueStore>(
    session: &mut GameSession<S>,
    surface: &mut TerminalSurface,
) -> Result<()> {
    loop {
        let view = session.view();
        surface.present(&view)?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match surface.handle_key(key, &view) {
            Action::Quit => {
                info!("Quit requested");
                return Ok(());
            }
            Action::Gesture(gesture) => {
                debug!(?gesture, "Forwarding gesture");
                session.handle(gesture);
            }
            Action::None => {}
        }
    }
}
