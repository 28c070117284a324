//! Line protocol of the host console build
//!
//! One command per line. Parsing is pure so the same table is exercised by
//! the unit tests and by `simon_console`.

use crate::board::Button;
use crate::config::ADC_MAX;
use crate::input;

/// Upper bound on ticks one `run` line may spend.
pub const RUN_LIMIT_TICKS: u32 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleCommand<'a> {
    /// Tick until the game waits for the player
    Run,
    Tick(u32),
    Press(Button),
    /// One raw key, as if typed on the UART
    Key(u8),
    /// Characters followed by Enter
    Type(&'a str),
    Name(&'a str),
    Pot(u16),
    Speed(u8),
    Seed(u32),
    Start,
    Reset,
    Log,
    Help,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand,
    MissingArgument,
    BadNumber,
    BadHex,
    TrailingInput,
}

impl ParseError {
    pub fn describe(self) -> &'static str {
        match self {
            ParseError::UnknownCommand => "unknown command",
            ParseError::MissingArgument => "missing argument",
            ParseError::BadNumber => "bad number",
            ParseError::BadHex => "bad hex value",
            ParseError::TrailingInput => "unexpected trailing input",
        }
    }
}

pub fn parse_line(line: &str) -> Result<ConsoleCommand<'_>, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" | "run" => ConsoleCommand::Run,
        "tick" => {
            if rest.is_empty() {
                ConsoleCommand::Tick(1)
            } else {
                ConsoleCommand::Tick(parse_decimal(rest)?)
            }
        }
        "s1" | "s2" | "s3" | "s4" => {
            let id = word.as_bytes()[1] - b'0';
            let button = Button::from_id(id).ok_or(ParseError::UnknownCommand)?;
            return no_argument(rest, ConsoleCommand::Press(button));
        }
        "cmd" => {
            let mut bytes = rest.bytes();
            match (bytes.next(), bytes.next()) {
                (Some(key), None) => ConsoleCommand::Key(key),
                (None, _) => return Err(ParseError::MissingArgument),
                _ => return Err(ParseError::TrailingInput),
            }
        }
        "type" => ConsoleCommand::Type(rest),
        "name" => ConsoleCommand::Name(rest),
        "pot" => {
            let sample = parse_decimal(required(rest)?)?;
            ConsoleCommand::Pot(sample.min(ADC_MAX as u32) as u16)
        }
        "speed" => {
            let index = parse_decimal(required(rest)?)?;
            ConsoleCommand::Speed(index.min(u8::MAX as u32) as u8)
        }
        "seed" => ConsoleCommand::Seed(parse_hex(required(rest)?)?),
        "start" => return no_argument(rest, ConsoleCommand::Start),
        "reset" => return no_argument(rest, ConsoleCommand::Reset),
        "log" => return no_argument(rest, ConsoleCommand::Log),
        "help" => return no_argument(rest, ConsoleCommand::Help),
        "quit" | "exit" => return no_argument(rest, ConsoleCommand::Quit),
        _ => return Err(ParseError::UnknownCommand),
    };
    Ok(command)
}

fn required(rest: &str) -> Result<&str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument)
    } else {
        Ok(rest)
    }
}

fn no_argument<'a>(rest: &str, command: ConsoleCommand<'a>) -> Result<ConsoleCommand<'a>, ParseError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(ParseError::TrailingInput)
    }
}

fn parse_decimal(text: &str) -> Result<u32, ParseError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::BadNumber);
    }
    // Saturate instead of failing on absurdly long numbers
    Ok(text
        .bytes()
        .fold(0u32, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as u32)))
}

/// Up to eight hex digits with an optional `0x` or `#` prefix.
pub fn parse_hex(text: &str) -> Result<u32, ParseError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('#'))
        .unwrap_or(text);

    if digits.is_empty() || digits.len() > 8 {
        return Err(ParseError::BadHex);
    }
    digits.bytes().try_fold(0u32, |acc, b| {
        input::hex_value(b)
            .map(|nibble| (acc << 4) | nibble as u32)
            .ok_or(ParseError::BadHex)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_runs() {
        assert_eq!(parse_line(""), Ok(ConsoleCommand::Run));
        assert_eq!(parse_line("   \r\n"), Ok(ConsoleCommand::Run));
        assert_eq!(parse_line("run"), Ok(ConsoleCommand::Run));
    }

    #[test]
    fn tick_defaults_to_one() {
        assert_eq!(parse_line("tick"), Ok(ConsoleCommand::Tick(1)));
        assert_eq!(parse_line("tick 250"), Ok(ConsoleCommand::Tick(250)));
        assert_eq!(parse_line("tick ten"), Err(ParseError::BadNumber));
    }

    #[test]
    fn buttons() {
        assert_eq!(parse_line("s3"), Ok(ConsoleCommand::Press(Button::S3)));
        assert_eq!(parse_line("s5"), Err(ParseError::UnknownCommand));
        assert_eq!(parse_line("s1 now"), Err(ParseError::TrailingInput));
    }

    #[test]
    fn single_key_commands() {
        assert_eq!(parse_line("cmd w"), Ok(ConsoleCommand::Key(b'w')));
        assert_eq!(parse_line("cmd ?"), Ok(ConsoleCommand::Key(b'?')));
        assert_eq!(parse_line("cmd"), Err(ParseError::MissingArgument));
        assert_eq!(parse_line("cmd wq"), Err(ParseError::TrailingInput));
    }

    #[test]
    fn text_arguments_keep_inner_spaces() {
        assert_eq!(parse_line("name Ada L"), Ok(ConsoleCommand::Name("Ada L")));
        assert_eq!(parse_line("type #1f"), Ok(ConsoleCommand::Type("#1f")));
    }

    #[test]
    fn pot_is_clamped() {
        assert_eq!(parse_line("pot 512"), Ok(ConsoleCommand::Pot(512)));
        assert_eq!(parse_line("pot 99999"), Ok(ConsoleCommand::Pot(1023)));
        assert_eq!(parse_line("pot"), Err(ParseError::MissingArgument));
        assert_eq!(parse_line("pot -1"), Err(ParseError::BadNumber));
    }

    #[test]
    fn seeds_are_hex() {
        assert_eq!(parse_line("seed 1"), Ok(ConsoleCommand::Seed(1)));
        assert_eq!(parse_line("seed 0xDEADbeef"), Ok(ConsoleCommand::Seed(0xDEAD_BEEF)));
        assert_eq!(parse_line("seed #2a"), Ok(ConsoleCommand::Seed(0x2A)));
        assert_eq!(parse_line("seed 123456789"), Err(ParseError::BadHex));
        assert_eq!(parse_line("seed xyz"), Err(ParseError::BadHex));
    }

    #[test]
    fn unknown_words_are_rejected() {
        assert_eq!(parse_line("jump"), Err(ParseError::UnknownCommand));
        assert_eq!(parse_line("reset now"), Err(ParseError::TrailingInput));
        assert_eq!(parse_line("quit"), Ok(ConsoleCommand::Quit));
    }
}
