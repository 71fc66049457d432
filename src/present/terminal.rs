use super::Frame;
use crate::error::Result;
use std::io::Write;

/// ANSI: clear screen and move the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Sink for rendered frames.
pub trait Presenter: Send {
    fn present(&mut self, frame: &Frame) -> Result<()>;
}

/// Redraws the whole frame as text on every render.
pub struct TerminalPresenter<W: Write + Send> {
    out: W,
    clear: bool,
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, clear: true }
    }

    /// Append frames instead of clearing the screen between them.
    pub fn without_clearing(mut self) -> Self {
        self.clear = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        if self.clear {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        write!(self.out, "{}", frame)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes one JSON object per frame, for piping into another UI.
pub struct JsonPresenter<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Presenter for JsonPresenter<W> {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Session, StateNotifier};

    fn empty_frame() -> Frame {
        Frame::capture(&Session::new(StateNotifier::new()))
    }

    #[test]
    fn test_terminal_clears_then_draws() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.present(&empty_frame()).unwrap();
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(out.starts_with(CLEAR_SCREEN));
        assert!(out.contains("[C] CONNECT SENSOR TO ADD PLAYER"));
        assert!(!out.contains("[S]"));
    }

    #[test]
    fn test_terminal_without_clearing() {
        let mut presenter = TerminalPresenter::new(Vec::new()).without_clearing();
        presenter.present(&empty_frame()).unwrap();
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(out.starts_with("GET A GRIP"));
    }

    #[test]
    fn test_json_lines() {
        let mut presenter = JsonPresenter::new(Vec::new());
        presenter.present(&empty_frame()).unwrap();
        presenter.present(&empty_frame()).unwrap();
        let out = String::from_utf8(presenter.into_inner()).unwrap();

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["title"], "Get a grip");
        assert_eq!(value["running"], false);
        assert!(value["toggle_label"].is_null());
    }
}
