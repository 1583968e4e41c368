//! Engine state management.
//!
//! Holds the current match and engine options, and answers protocol
//! commands by driving the match controller and the bot agent.

use std::io::{self, Write};

use tracing::warn;

use crate::board::{Player, PlayerId, Position, Snapshot, Triangle, ALL_COLORS};
use crate::error::GameError;
use crate::eval::HeuristicConfig;
use crate::game::{Match, MatchEvent, MatchMode};
use crate::protocol::{encode_snapshot, format_path, Seat};
use crate::search::BotAgent;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    game: Option<Match>,
    /// Heuristic settings for bots created by later `newgame` commands.
    pub options: HeuristicConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates a new engine with no match.
    pub fn new() -> Self {
        Engine {
            game: None,
            options: HeuristicConfig::default(),
        }
    }

    pub fn game(&self) -> Option<&Match> {
        self.game.as_ref()
    }

    fn game_mut(&mut self, command: &str) -> Option<&mut Match> {
        if self.game.is_none() {
            warn!("{}: no game in progress", command);
        }
        self.game.as_mut()
    }

    /// Sets an engine option. Unknown names and unparsable values are
    /// ignored with a warning.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) {
        let slot = match name {
            "RetreatPenalty" => &mut self.options.retreat_penalty,
            "EntryBonus" => &mut self.options.entry_bonus,
            other => {
                warn!(option = other, "unknown option");
                return;
            }
        };
        match value.map(str::parse::<f64>) {
            Some(Ok(v)) if v.is_finite() => *slot = v,
            _ => warn!(option = name, ?value, "invalid option value"),
        }
    }

    /// Starts a match with one player per seat. Seat order gives player ids;
    /// unnamed humans are called "guest" and unnamed bots "BOT <n>".
    pub fn new_game(&mut self, mode: MatchMode, seats: &[Seat]) -> Result<(), GameError> {
        let mut bots = 0;
        let players = seats
            .iter()
            .enumerate()
            .map(|(i, seat)| {
                let id = PlayerId(i as u8);
                let color = ALL_COLORS[i % ALL_COLORS.len()];
                if seat.bot {
                    bots += 1;
                    let name = seat.name.clone().unwrap_or_else(|| format!("BOT {}", bots));
                    Player::bot(id, name, color, seat.triangle, self.options)
                } else {
                    let name = seat.name.clone().unwrap_or_else(|| "guest".to_string());
                    Player::human(id, name, color, seat.triangle)
                }
            })
            .collect();

        let mut game = Match::new(mode);
        game.new_game(players)?;
        self.game = Some(game);
        Ok(())
    }

    /// Replaces the board of the current match.
    pub fn set_position(&mut self, snapshot: &Snapshot) -> Result<(), GameError> {
        match self.game_mut("position") {
            Some(game) => game.load_state(snapshot),
            None => Ok(()),
        }
    }

    /// Hands the turn to the player on `triangle`.
    pub fn set_turn(&mut self, triangle: Triangle) {
        let Some(game) = self.game_mut("turn") else {
            return;
        };
        let id = game.player_by_triangle(triangle).map(|p| p.id);
        if !id.is_some_and(|id| game.set_turn(id)) {
            warn!(%triangle, "turn: no active player on triangle");
        }
    }

    /// Handles the handshake: writes id, options, protocol_version, and hellook.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let defaults = HeuristicConfig::default();
        writeln!(out, "id name sternhalma")?;
        writeln!(out, "id author sternhalma")?;
        writeln!(
            out,
            "option name RetreatPenalty type spin default {} min 0 max 1000",
            defaults.retreat_penalty
        )?;
        writeln!(
            out,
            "option name EntryBonus type spin default {} min 0 max 1000",
            defaults.entry_bonus
        )?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Writes the board as snapshot notation.
    pub fn handle_snapshot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let text = match &self.game {
            Some(game) => encode_snapshot(&game.serialize_state()),
            None => "-".to_string(),
        };
        writeln!(out, "snapshot {}", text)?;
        out.flush()
    }

    /// Lists the legal routes of the piece on `src` for its owner.
    pub fn handle_moves<W: Write>(&self, src: Position, out: &mut W) -> io::Result<()> {
        let mut line = String::from("legalmoves");
        if let Some(game) = &self.game {
            let owner = game
                .grid()
                .cell_at(src)
                .and_then(|c| game.state().occupant(c))
                .and_then(|t| game.player_by_triangle(t));
            if let Some(p) = owner {
                for route in game.legal_moves(p.id, src) {
                    line.push(' ');
                    line.push_str(&format_path(game.grid(), &route));
                }
            }
        }
        writeln!(out, "{}", line)?;
        out.flush()
    }

    /// Moves a piece for the turn player.
    pub fn handle_move<W: Write>(&mut self, src: Position, dest: Position, out: &mut W) -> io::Result<()> {
        let route = self.game_mut("move").and_then(|game| {
            let player = game.turn_player()?;
            let route = game.move_piece(player, src, dest)?;
            Some(format_path(game.grid(), &route))
        });
        match route {
            Some(path) => writeln!(out, "moving {}", path)?,
            None => writeln!(out, "rejected")?,
        }
        out.flush()
    }

    /// Signals that the last move's animation finished.
    pub fn handle_done<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let Some(game) = self.game_mut("done") {
            game.complete_move();
        }
        self.write_events(out)
    }

    /// Plays the turn player's move with the bot heuristic.
    ///
    /// Bots use their own settings; a human on turn gets the engine options.
    /// Writes `bestmove <path>` (the match is then locked until `done`), or
    /// `pass` when no legal move exists.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let options = self.options;
        let Some(game) = self.game_mut("go") else {
            return Ok(());
        };
        let Some(player) = game.turn_player() else {
            warn!("go: match is not in progress");
            return Ok(());
        };
        if game.is_locked() {
            warn!("go: previous move still pending");
            return Ok(());
        }
        let config = game.player(player).and_then(Player::bot_config).unwrap_or(options);
        match BotAgent::new(config).play(game) {
            Some(route) => writeln!(out, "bestmove {}", format_path(game.grid(), &route))?,
            None => writeln!(out, "pass")?,
        }
        self.write_events(out)
    }

    /// Passes the turn.
    pub fn handle_nextturn<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let Some(game) = self.game_mut("nextturn") {
            game.next_turn();
        }
        self.write_events(out)
    }

    pub fn handle_checkwin<W: Write>(&self, triangle: Triangle, out: &mut W) -> io::Result<()> {
        let won = self
            .game
            .as_ref()
            .and_then(|g| g.player_by_triangle(triangle).map(|p| g.check_win(p.id)))
            .unwrap_or(false);
        writeln!(out, "win {}", won)?;
        out.flush()
    }

    /// Drains and writes queued match events, one per line.
    fn write_events<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let Some(game) = self.game.as_mut() {
            let events = game.drain_events();
            for event in &events {
                writeln!(out, "{}", format_event(game, event))?;
            }
        }
        out.flush()
    }
}

fn letter(game: &Match, id: PlayerId) -> char {
    game.player(id).map_or('?', |p| p.triangle.letter())
}

fn letters(game: &Match, ids: &[PlayerId]) -> String {
    ids.iter()
        .map(|&id| letter(game, id).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats an event as a protocol line.
pub fn format_event(game: &Match, event: &MatchEvent) -> String {
    match event {
        MatchEvent::TurnChanged(p) => format!("turn {}", letter(game, *p)),
        MatchEvent::MoveExecuted(p) => format!("executed {}", letter(game, *p)),
        MatchEvent::PlayerFinished { player, rank } => {
            format!("finished {} {}", letter(game, *player), rank)
        }
        MatchEvent::LocalWon(p) => format!("won {}", letter(game, *p)),
        MatchEvent::LocalLost { player, rank, ranking } => {
            format!("lost {} {} {}", letter(game, *player), rank, letters(game, ranking))
        }
        MatchEvent::MatchOver { ranking } => format!("over {}", letters(game, ranking)),
    }
}
