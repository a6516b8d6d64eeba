use common::games::snake::{Direction, SessionCommand};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputCommand {
    Session(SessionCommand),
    Quit,
}

/// Maps one stdin line to a command. Unknown input yields `None`.
pub fn parse_command(line: &str) -> Option<InputCommand> {
    let command = match line.trim().to_ascii_lowercase().as_str() {
        "w" | "up" => SessionCommand::Turn(Direction::Up),
        "s" | "down" => SessionCommand::Turn(Direction::Down),
        "a" | "left" => SessionCommand::Turn(Direction::Left),
        "d" | "right" => SessionCommand::Turn(Direction::Right),
        "p" | "pause" => SessionCommand::Pause,
        "r" | "resume" => SessionCommand::Resume,
        "start" => SessionCommand::Start,
        "reset" => SessionCommand::Reset,
        "q" | "quit" => return Some(InputCommand::Quit),
        _ => return None,
    };
    Some(InputCommand::Session(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(parse_command("w"), Some(InputCommand::Session(SessionCommand::Turn(Direction::Up))));
        assert_eq!(parse_command(" LEFT \n"), Some(InputCommand::Session(SessionCommand::Turn(Direction::Left))));
        assert_eq!(parse_command("d"), Some(InputCommand::Session(SessionCommand::Turn(Direction::Right))));
        assert_eq!(parse_command("down"), Some(InputCommand::Session(SessionCommand::Turn(Direction::Down))));
    }

    #[test]
    fn test_control_commands() {
        assert_eq!(parse_command("p"), Some(InputCommand::Session(SessionCommand::Pause)));
        assert_eq!(parse_command("resume"), Some(InputCommand::Session(SessionCommand::Resume)));
        assert_eq!(parse_command("reset"), Some(InputCommand::Session(SessionCommand::Reset)));
        assert_eq!(parse_command("q"), Some(InputCommand::Quit));
    }

    #[test]
    fn test_unknown_input() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("jump"), None);
    }
}
