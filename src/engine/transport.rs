//! Newline-delimited JSON transport to an engine process

use std::fmt;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use super::protocol::{EngineReply, Request};
use super::Engine;
use crate::board::{Pos, Stone};
use crate::error::EngineError;

/// Program and arguments used to launch the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Engine speaking one JSON object per line over any reader/writer pair
pub struct JsonLineEngine<R, W> {
    reader: R,
    writer: W,
    line: String,
}

impl<R: BufRead, W: Write> JsonLineEngine<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: String::new(),
        }
    }

    /// Wait for the `{"ready": true}` banner
    pub fn await_ready(&mut self) -> Result<(), EngineError> {
        let banner: serde_json::Value = self.read_message()?;
        if banner.get("ready").and_then(serde_json::Value::as_bool) == Some(true) {
            Ok(())
        } else {
            Err(EngineError::Handshake(banner.to_string()))
        }
    }

    fn call(&mut self, request: &Request) -> Result<EngineReply, EngineError> {
        let mut payload = serde_json::to_string(request)?;
        trace!(%payload, "engine request");
        payload.push('\n');
        self.writer.write_all(payload.as_bytes())?;
        self.writer.flush()?;
        self.read_message()
    }

    /// Next line that decodes as `T`. Anything else the engine prints
    /// (banners, debug chatter) is logged and skipped so replies stay paired
    /// with their requests.
    fn read_message<T: DeserializeOwned>(&mut self) -> Result<T, EngineError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Err(EngineError::Closed);
            }
            let message = self.line.trim();
            if message.is_empty() {
                continue;
            }
            match serde_json::from_str(message) {
                Ok(decoded) => {
                    trace!(%message, "engine reply");
                    return Ok(decoded);
                }
                Err(err) => warn!(%message, error = %err, "skipping non-reply engine output"),
            }
        }
    }
}

impl<R: BufRead, W: Write> Engine for JsonLineEngine<R, W> {
    fn start_game(&mut self, board_size: usize, user_color: Stone) -> Result<EngineReply, EngineError> {
        self.call(&Request::StartGame {
            board_size,
            user_color: user_color.code(),
        })
    }

    fn resolve_human_move(&mut self, pos: Pos, user_color: Stone) -> Result<EngineReply, EngineError> {
        self.call(&Request::ResolveHumanMove {
            row: pos.row,
            col: pos.col,
            user_color: user_color.code(),
        })
    }

    fn resolve_bot_move(&mut self, user_color: Stone) -> Result<EngineReply, EngineError> {
        self.call(&Request::ResolveBotMove {
            user_color: user_color.code(),
        })
    }
}

/// Engine running as a child process; killed on drop
pub struct ProcessEngine {
    child: Child,
    io: JsonLineEngine<BufReader<ChildStdout>, ChildStdin>,
}

impl ProcessEngine {
    /// Launch the engine and block until it announces readiness
    pub fn spawn(command: &EngineCommand) -> Result<Self, EngineError> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = child.kill();
                return Err(EngineError::Protocol("engine stdio is not piped".to_string()));
            }
        };

        let mut engine = Self {
            child,
            io: JsonLineEngine::new(BufReader::new(stdout), stdin),
        };
        engine.io.await_ready()?;
        debug!(pid = engine.child.id(), %command, "engine ready");
        Ok(engine)
    }
}

impl Engine for ProcessEngine {
    fn start_game(&mut self, board_size: usize, user_color: Stone) -> Result<EngineReply, EngineError> {
        self.io.start_game(board_size, user_color)
    }

    fn resolve_human_move(&mut self, pos: Pos, user_color: Stone) -> Result<EngineReply, EngineError> {
        self.io.resolve_human_move(pos, user_color)
    }

    fn resolve_bot_move(&mut self, user_color: Stone) -> Result<EngineReply, EngineError> {
        self.io.resolve_bot_move(user_color)
    }
}

impl Drop for ProcessEngine {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_request_written_as_single_line() {
        let replies = Cursor::new(b"{\"valid\": false}\n".to_vec());
        let mut sent = Vec::new();
        {
            let mut engine = JsonLineEngine::new(replies, &mut sent);
            let reply = engine.resolve_human_move(Pos::new(1, 1), Stone::Black).unwrap();
            assert_eq!(reply.valid, Some(false));
        }

        let text = String::from_utf8(sent).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["op"], "resolveHumanMove");
        assert_eq!(value["userColor"], 1);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let replies = Cursor::new(b"\n\n{\"ready\": true}\n{\"board\": [0,0,0,0]}\n".to_vec());
        let mut engine = JsonLineEngine::new(replies, Vec::new());
        engine.await_ready().unwrap();
        let reply = engine.start_game(2, Stone::Black).unwrap();
        assert_eq!(reply.board, Some(vec![0, 0, 0, 0]));
    }

    #[test]
    fn test_closed_output() {
        let mut engine = JsonLineEngine::new(Cursor::new(Vec::new()), Vec::new());
        assert!(matches!(engine.resolve_bot_move(Stone::White), Err(EngineError::Closed)));
    }

    #[test]
    fn test_bad_banner() {
        let mut engine = JsonLineEngine::new(Cursor::new(b"{\"ready\": false}\n".to_vec()), Vec::new());
        assert!(matches!(engine.await_ready(), Err(EngineError::Handshake(_))));
    }

    #[test]
    fn test_stray_output_does_not_shift_replies() {
        let replies = Cursor::new(
            b"debug: thinking\n{\"valid\": true, \"board\": [1,0,0,0], \"botTurn\": true}\n\"progress\"\n{\"valid\": false}\n"
                .to_vec(),
        );
        let mut engine = JsonLineEngine::new(replies, Vec::new());

        let first = engine.resolve_human_move(Pos::new(0, 0), Stone::Black).unwrap();
        assert_eq!(first.valid, Some(true));
        assert_eq!(first.board, Some(vec![1, 0, 0, 0]));

        let second = engine.resolve_human_move(Pos::new(1, 1), Stone::Black).unwrap();
        assert_eq!(second.valid, Some(false));
        assert_eq!(second.board, None);
    }

    #[test]
    fn test_banner_before_ready() {
        let replies = Cursor::new(b"Go Bot Initialized\n{\"ready\": true}\n".to_vec());
        let mut engine = JsonLineEngine::new(replies, Vec::new());
        engine.await_ready().unwrap();
    }

    #[test]
    fn test_only_garbage_then_closed() {
        let mut engine = JsonLineEngine::new(Cursor::new(b"Go Bot Initialized\n".to_vec()), Vec::new());
        assert!(matches!(engine.start_game(9, Stone::Black), Err(EngineError::Closed)));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_engine_round_trip() {
        let script = r#"echo '{"ready": true}'; while read line; do echo '{"board": [0,0,0,0]}'; done"#;
        let command = EngineCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        };

        let mut engine = ProcessEngine::spawn(&command).unwrap();
        let reply = engine.start_game(2, Stone::White).unwrap();
        assert_eq!(reply.board, Some(vec![0, 0, 0, 0]));
        let reply = engine.resolve_bot_move(Stone::White).unwrap();
        assert_eq!(reply.board, Some(vec![0, 0, 0, 0]));
    }

    #[test]
    fn test_missing_program() {
        let command = EngineCommand {
            program: "definitely-not-an-engine-binary".to_string(),
            args: Vec::new(),
        };
        assert!(matches!(ProcessEngine::spawn(&command), Err(EngineError::Spawn { .. })));
    }
}
