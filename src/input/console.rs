//! Console commands.
//!
//! One command per line, case-insensitive. End of input quits.

use crate::error::{GripError, Result};
use crate::game::GameEvent;
use log::{debug, error, warn};
use strum::EnumString;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Command {
    #[strum(serialize = "connect", serialize = "c")]
    Connect,
    #[strum(serialize = "start", serialize = "end", serialize = "toggle", serialize = "s")]
    Toggle,
    #[strum(serialize = "quit", serialize = "exit", serialize = "q")]
    Quit,
}

impl From<Command> for GameEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Connect => GameEvent::Connect,
            Command::Toggle => GameEvent::Toggle,
            Command::Quit => GameEvent::Quit,
        }
    }
}

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    line.parse()
        .map_err(|_| GripError::InvalidCommand(line.to_string()))
}

/// Read commands from `input` and forward them as game events.
///
/// Unknown commands are logged and skipped. Reading stops after `quit`;
/// end of input (or a read error) sends [`GameEvent::Quit`].
pub fn spawn_console_reader<R>(input: R, events: mpsc::Sender<GameEvent>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(input).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match parse_command(&line) {
                        Ok(command) => {
                            debug!("Console command: {:?}", command);
                            if events.send(command.into()).await.is_err()
                                || command == Command::Quit
                            {
                                break;
                            }
                        }
                        Err(e) => warn!("{}", e),
                    }
                }
                Ok(None) => {
                    let _ = events.send(GameEvent::Quit).await;
                    break;
                }
                Err(e) => {
                    error!("Failed to read console input: {}", e);
                    let _ = events.send(GameEvent::Quit).await;
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[test]
    fn test_parse_aliases_case_insensitive() {
        assert_eq!(assert_ok!(parse_command("connect")), Command::Connect);
        assert_eq!(assert_ok!(parse_command(" C ")), Command::Connect);
        assert_eq!(assert_ok!(parse_command("End")), Command::Toggle);
        assert_eq!(assert_ok!(parse_command("s")), Command::Toggle);
        assert_eq!(assert_ok!(parse_command("QUIT")), Command::Quit);
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command("jump").unwrap_err();
        assert!(matches!(err, GripError::InvalidCommand(ref c) if c == "jump"));
    }

    #[tokio::test]
    async fn test_reader_forwards_and_quits_at_eof() {
        let (tx, mut rx) = mpsc::channel(8);
        let input: &'static [u8] = b"connect\n\nbogus\nstart\n";
        spawn_console_reader(input, tx).await.unwrap();

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        assert!(
            matches!(
                events.as_slice(),
                [GameEvent::Connect, GameEvent::Toggle, GameEvent::Quit]
            ),
            "unexpected events: {:?}",
            events
        );
    }

    #[tokio::test]
    async fn test_reader_stops_after_quit() {
        let (tx, mut rx) = mpsc::channel(8);
        let input: &'static [u8] = b"q\nconnect\n";
        spawn_console_reader(input, tx).await.unwrap();

        assert!(matches!(rx.recv().await, Some(GameEvent::Quit)));
        assert!(rx.recv().await.is_none());
    }
}
