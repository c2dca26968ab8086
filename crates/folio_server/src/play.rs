//! Terminal tic-tac-toe loop.

use folio_tictactoe::{Phase, Position, Session};
use std::io::{self, BufRead, Write};
use tracing::{debug, instrument};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Cell(usize),
    NewGame,
    ResetScores,
    Quit,
}

/// Cells are numbered 1 to 9 as on the rendered board; labels like
/// `center` are accepted too.
fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "q" | "quit" => Some(Input::Quit),
        "n" | "new" => Some(Input::NewGame),
        "r" | "reset" => Some(Input::ResetScores),
        _ => match line.parse::<usize>() {
            Ok(number @ 1..=9) => Some(Input::Cell(number - 1)),
            Ok(_) => None,
            Err(_) => Position::from_label_or_number(&line).map(|p| Input::Cell(p.to_index())),
        },
    }
}

fn render<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let game = session.game();
    let scores = session.scores();
    writeln!(out)?;
    writeln!(out, "{}", game.board().display())?;
    match game.phase() {
        Phase::Won(mark) => writeln!(out, "Player {} wins!", mark)?,
        Phase::Tied => writeln!(out, "It's a tie!")?,
        Phase::Empty | Phase::InProgress => writeln!(out, "Player {} to move", game.next())?,
    }
    writeln!(out, "X {} | O {} | ties {}", scores.x, scores.o, scores.ties)?;
    write!(out, "[1-9] cell  [n] new game  [r] reset scores  [q] quit > ")?;
    out.flush()
}

/// Reads commands from `input` until `q` or end of input.
#[instrument(skip_all, fields(mode = %session.mode()))]
pub fn play_loop<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    render(session, out)?;
    for line in input.lines() {
        let line = line?;
        debug!(%line, "Player input");
        match parse_input(&line) {
            Some(Input::Quit) => {
                writeln!(out, "Bye!")?;
                return Ok(());
            }
            Some(Input::NewGame) => session.new_game(),
            Some(Input::ResetScores) => session.reset_scores(),
            Some(Input::Cell(index)) => match session.play(index).map(|_| ()) {
                Ok(()) if session.awaiting_computer() => match session.computer_move() {
                    Ok(reply) => writeln!(out, "Computer plays {}", reply + 1)?,
                    Err(err) => writeln!(out, "{}", err)?,
                },
                Ok(()) => {}
                Err(err) => writeln!(out, "{}", err)?,
            },
            None => writeln!(out, "Enter a cell 1-9, n, r or q")?,
        }
        render(session, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_tictactoe::GameMode;

    fn run(mode: GameMode, script: &str) -> (Session, String) {
        let mut session = Session::new(mode);
        let mut out = Vec::new();
        play_loop(&mut session, script.as_bytes(), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_input(" 1 "), Some(Input::Cell(0)));
        assert_eq!(parse_input("9"), Some(Input::Cell(8)));
        assert_eq!(parse_input("center"), Some(Input::Cell(4)));
        assert_eq!(parse_input("N"), Some(Input::NewGame));
        assert_eq!(parse_input("r"), Some(Input::ResetScores));
        assert_eq!(parse_input("q"), Some(Input::Quit));
        assert_eq!(parse_input("0"), None);
        assert_eq!(parse_input("10"), None);
        assert_eq!(parse_input("hello"), None);
    }

    #[test]
    fn computer_replies_to_each_move() {
        let (session, output) = run(GameMode::HumanVsComputer, "5\nq\n");
        assert!(output.contains("Computer plays"));
        assert_eq!(session.game().board().marks_placed(), 2);
        assert!(output.ends_with("Bye!\n"));
    }

    #[test]
    fn two_humans_finish_a_game() {
        let (session, output) = run(GameMode::HumanVsHuman, "1\n4\n2\n5\n3\n");
        assert!(output.contains("Player X wins!"));
        assert!(output.contains("X 1 | O 0 | ties 0"));
        assert_eq!(session.scores().x, 1);
    }

    #[test]
    fn rejected_input_is_reported() {
        let (session, output) = run(GameMode::HumanVsHuman, "1\n1\nzero\n");
        assert!(output.contains("Enter a cell 1-9, n, r or q"));
        assert_eq!(session.game().board().marks_placed(), 1);
    }

    #[test]
    fn new_game_and_reset() {
        let (session, _) = run(GameMode::HumanVsHuman, "1\n4\n2\n5\n3\nn\n");
        assert_eq!(session.game().board().marks_placed(), 0);
        assert_eq!(session.scores().x, 1);
        let (session, _) = run(GameMode::HumanVsHuman, "1\n4\n2\n5\n3\nr\n");
        assert_eq!(session.scores().games(), 0);
    }
}
