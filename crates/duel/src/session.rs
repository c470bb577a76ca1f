//! The interactive game loop.
//!
//! A [`Session`] reads commands from any `BufRead` and writes to any `Write`,
//! so the whole loop can be driven from a script in tests.

use crate::config::Settings;
use bot_minimax::SearchError;
use chess_core::{Color, Move, PromotionPiece, Square};
use chess_engine::{Board, Game, GameError, GameObserver, GameState, MoveStatus, TurnResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("computer failed to move: {0}")]
    Search(#[from] SearchError),
    #[error("computer move rejected: {0}")]
    Game(#[from] GameError),
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Finished { winner: Color },
    Quit,
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A relocation, optionally naming the promotion piece up front
    /// (`e7e8q`).
    Move {
        from: Square,
        to: Square,
        promotion: Option<PromotionPiece>,
    },
    Hint(Square),
    Moves,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["quit"] | ["exit"] => Ok(Command::Quit),
            ["help"] | ["?"] => Ok(Command::Help),
            ["moves"] => Ok(Command::Moves),
            ["hint", square] => Ok(Command::Hint(parse_square(square)?)),
            [from, to] => parse_move(&format!("{}{}", from, to)),
            [joined] => parse_move(joined),
            [] => Err("type a move like e2e4, or help".to_string()),
            _ => Err(format!("unrecognised command: {}", line.trim())),
        }
    }
}

fn parse_square(text: &str) -> Result<Square, String> {
    text.parse().map_err(|e| format!("{}", e))
}

fn parse_move(text: &str) -> Result<Command, String> {
    let mv: Move = text.parse().map_err(|e| format!("{}", e))?;
    Ok(Command::Move {
        from: mv.from(),
        to: mv.to(),
        promotion: mv.flag().promotion_piece(),
    })
}

fn promotion_letters() -> String {
    let letters: Vec<String> = PromotionPiece::ALL
        .iter()
        .map(|piece| piece.to_char().to_string())
        .collect();
    letters.join(", ")
}

const HELP: &str = "\
commands:
  e2e4 | e2 e4   move a piece (e7e8q names the promotion)
  hint <square>  list where a piece can go
  moves          list every legal move
  help           this text
  quit           leave the game";

/// Events collected by the observer and printed after each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notice {
    PositionChanged,
    Turn(Color, TurnResult),
}

#[derive(Clone, Default)]
struct NoticeBoard(Rc<RefCell<Vec<Notice>>>);

impl GameObserver for NoticeBoard {
    fn position_changed(&mut self, _board: &Board) {
        self.0.borrow_mut().push(Notice::PositionChanged);
    }

    fn turn_completed(&mut self, mover: Color, result: TurnResult) {
        self.0.borrow_mut().push(Notice::Turn(mover, result));
    }
}

pub struct Session<R, W> {
    game: Game,
    settings: Settings,
    rng: StdRng,
    notices: NoticeBoard,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(board: Board, settings: Settings, input: R, output: W) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let notices = NoticeBoard::default();
        let mut game = Game::from_board(board);
        game.set_observer(Box::new(notices.clone()));
        Session {
            game,
            settings,
            rng,
            notices,
            input,
            output,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays until the game ends, the user quits or input runs out.
    pub fn run(&mut self) -> Result<Outcome, SessionError> {
        writeln!(
            self.output,
            "You play {}. Type help for commands.",
            self.settings.human
        )?;
        writeln!(self.output, "{}", self.game.board())?;

        loop {
            if let Some(winner) = self.winner() {
                writeln!(self.output, "Game over: {} wins.", winner)?;
                return Ok(Outcome::Finished { winner });
            }

            if self.game.side_to_move() != self.settings.human {
                self.computer_turn()?;
                continue;
            }

            let Some(line) = self.prompt(&format!("{}> ", self.settings.human))? else {
                return Ok(Outcome::Quit);
            };
            match Command::parse(&line) {
                Ok(Command::Quit) => return Ok(Outcome::Quit),
                Ok(Command::Help) => writeln!(self.output, "{}", HELP)?,
                Ok(Command::Moves) => self.list_moves()?,
                Ok(Command::Hint(square)) => self.hint(square)?,
                Ok(Command::Move {
                    from,
                    to,
                    promotion,
                }) => {
                    if !self.human_move(from, to, promotion)? {
                        return Ok(Outcome::Quit);
                    }
                }
                Err(message) => writeln!(self.output, "{}", message)?,
            }
        }
    }

    fn winner(&self) -> Option<Color> {
        match self.game.state() {
            GameState::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    fn computer_turn(&mut self) -> Result<(), SessionError> {
        let report = bot_minimax::search(self.game.board(), self.settings.depth, &mut self.rng)?;
        debug!(nodes = report.nodes, "computer searched");
        writeln!(self.output, "Computer plays {}", report.best_move)?;
        self.game.play(report.best_move)?;
        self.flush_notices()?;
        Ok(())
    }

    /// Returns false if input ended during a promotion prompt.
    fn human_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PromotionPiece>,
    ) -> Result<bool, SessionError> {
        match self.game.request_move(from, to) {
            Ok(MoveStatus::Completed(_)) => {}
            Ok(MoveStatus::PromotionPending) => loop {
                if let Some(choice) = promotion {
                    self.game.promotion_choice(choice.kind())?;
                    break;
                }
                let Some(answer) = self.prompt("Promote to (q/r/n/b): ")? else {
                    return Ok(false);
                };
                let choice = answer
                    .trim()
                    .chars()
                    .next()
                    .and_then(PromotionPiece::from_char);
                let Some(choice) = choice else {
                    writeln!(self.output, "choose one of {}", promotion_letters())?;
                    continue;
                };
                match self.game.promotion_choice(choice.kind()) {
                    Ok(_) => break,
                    Err(err) => writeln!(self.output, "{}", err)?,
                }
            },
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                if self.settings.show_hints && matches!(err, GameError::IllegalMove { .. }) {
                    self.hint(from)?;
                }
                return Ok(true);
            }
        }
        self.flush_notices()?;
        Ok(true)
    }

    fn hint(&mut self, square: Square) -> io::Result<()> {
        let destinations = self.game.legal_destinations(square);
        if destinations.is_empty() {
            return writeln!(self.output, "{}: no moves", square);
        }
        let list: Vec<String> = destinations.iter().map(|sq| sq.to_string()).collect();
        writeln!(self.output, "{}: {}", square, list.join(" "))
    }

    fn list_moves(&mut self) -> io::Result<()> {
        let board = self.game.board();
        let moves: Vec<String> = board
            .moves_for(board.side_to_move(), PromotionPiece::Queen)
            .iter()
            .map(|mv| format!("{}{}", mv.from(), mv.to()))
            .collect();
        writeln!(self.output, "{}", moves.join(" "))
    }

    fn flush_notices(&mut self) -> io::Result<()> {
        let notices: Vec<Notice> = self.notices.0.borrow_mut().drain(..).collect();
        for notice in notices {
            match notice {
                Notice::PositionChanged => writeln!(self.output, "{}", self.game.board())?,
                Notice::Turn(_, TurnResult::Normal) => {}
                Notice::Turn(mover, TurnResult::Check) => {
                    writeln!(self.output, "{} gives check.", mover)?
                }
                Notice::Turn(mover, TurnResult::Checkmate) => {
                    writeln!(self.output, "Checkmate by {}.", mover)?
                }
            }
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
