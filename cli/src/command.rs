use anyhow::{bail, Context};
use common::Move;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Start { rings: u8 },
    Move(Move),
    Undo,
    Solve,
    Show,
    Help,
    Quit,
}

/// Parse one line of menu input. Bad input is an `Err` with a message for
/// the player; the loop re-prompts, the engine never sees it.
pub fn parse(line: &str) -> anyhow::Result<Command> {
    let mut words = line.split_whitespace();
    let keyword = words.next().context("empty command")?;

    let command = match keyword {
        "start" => {
            let rings = parse_number(words.next().context("usage: start <rings>")?)?;
            Command::Start { rings }
        }
        "move" | "m" => {
            let src = parse_number(words.next().context("usage: move <src> <dst>")?)?;
            let dst = parse_number(words.next().context("usage: move <src> <dst>")?)?;
            Command::Move(Move { src, dst })
        }
        "undo" | "u" => Command::Undo,
        "solve" => Command::Solve,
        "show" | "state" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("unknown command {other:?}, type help for the command list"),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected trailing input {extra:?}");
    }

    Ok(command)
}

fn parse_number<T: std::str::FromStr>(word: &str) -> anyhow::Result<T> {
    word.parse()
        .ok()
        .with_context(|| format!("{word:?} is not a non-negative number"))
}
