//! Presentation layer.
//!
//! A [`Frame`] is a snapshot of everything on screen, captured from the
//! session. [`Presenter`]s turn frames into output.

mod terminal;

pub use terminal::{JsonPresenter, Presenter, TerminalPresenter};

use crate::game::{Player, Session};
use crate::units::format_to_pounds;
use serde::Serialize;
use std::fmt;

pub const TITLE: &str = "Get a grip";
pub const CONNECT_LABEL: &str = "connect sensor to add player";
pub const START_LABEL: &str = "start game";
pub const END_LABEL: &str = "end game";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRow {
    pub name: String,
    /// Live force, only while a round is running.
    pub current_force: String,
    pub max_force: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub title: String,
    pub players: Vec<PlayerRow>,
    /// Winner announcement, once a round produced one.
    pub winner: Option<String>,
    pub connect_label: String,
    /// Start/end control; hidden until someone has joined.
    pub toggle_label: Option<String>,
    pub running: bool,
}

impl PlayerRow {
    fn capture(player: &Player, running: bool) -> Self {
        let current_force = if running {
            format!("{} lbs", format_to_pounds(player.current_value()))
        } else {
            "0".to_string()
        };
        Self {
            name: player.name().to_string(),
            current_force,
            max_force: format!("{} lbs", format_to_pounds(player.max_value())),
        }
    }
}

impl Frame {
    pub fn capture(session: &Session) -> Self {
        let running = session.is_running();
        let toggle = if running { END_LABEL } else { START_LABEL };
        let toggle_label = (!session.players().is_empty()).then(|| toggle.to_string());

        Self {
            title: TITLE.to_string(),
            players: session
                .players()
                .iter()
                .map(|p| PlayerRow::capture(p, running))
                .collect(),
            winner: session
                .winners()
                .first()
                .map(|top| format!("{} wins!", top.name)),
            connect_label: CONNECT_LABEL.to_string(),
            toggle_label,
            running,
        }
    }
}

/// Upper-cased text layout of the frame.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title.to_uppercase())?;
        writeln!(f)?;
        for row in &self.players {
            writeln!(f, "{}", row.name.to_uppercase())?;
            writeln!(f, "  CURRENT FORCE: {}", row.current_force.to_uppercase())?;
            writeln!(f, "  MAX FORCE: {}", row.max_force.to_uppercase())?;
        }
        if let Some(winner) = &self.winner {
            writeln!(f)?;
            writeln!(f, "{}", winner.to_uppercase())?;
        }
        writeln!(f)?;
        write!(f, "[C] {}", self.connect_label.to_uppercase())?;
        if let Some(toggle) = &self.toggle_label {
            write!(f, "   [S] {}", toggle.to_uppercase())?;
        }
        writeln!(f)
    }
}
