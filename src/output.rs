//! Output sinks for runner traces.
//!
//! The runner never prints directly; every line goes through an
//! [`OutputSink`]. [`StdoutSink`] is the console, [`OutputBuffer`] captures
//! lines for tests and programmatic use.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// What a line is, so a sink can style it. Never changes the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// ` [IN]` echo of the call
    Input,
    /// `[OUT]` actual result
    Output,
    /// `[EXP]` expected value
    Expected,
    /// divider lines
    Rule,
    /// summary line with every case passing
    Pass,
    /// summary line with at least one failure
    Fail,
}

pub trait OutputSink {
    fn emit(&mut self, text: &str, tone: Tone);
}

/// Shared handle to a sink, so callers can keep a reference to a buffer the
/// runner writes into.
#[derive(Clone)]
pub struct SharedOutput(pub Rc<RefCell<dyn OutputSink>>);

impl SharedOutput {
    pub fn new<T: OutputSink + 'static>(sink: T) -> Self {
        SharedOutput(Rc::new(RefCell::new(sink)))
    }

    pub fn emit(&self, text: &str, tone: Tone) {
        self.0.borrow_mut().emit(text, tone);
    }
}

impl Default for SharedOutput {
    fn default() -> Self {
        Self::new(StdoutSink::new(ColorChoice::Auto))
    }
}

impl<T: OutputSink + 'static> From<Rc<RefCell<T>>> for SharedOutput {
    fn from(sink: Rc<RefCell<T>>) -> Self {
        SharedOutput(sink)
    }
}

// ============================================================================
// OUTPUT SINKS: OutputBuffer and StdoutSink implementations
// ============================================================================

/// OutputBuffer: collects output lines for testing or programmatic capture.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub lines: Vec<String>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, one line per emit, newline-terminated.
    pub fn contents(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l)).collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str, _tone: Tone) {
        self.lines.push(text.to_string());
    }
}

/// StdoutSink: writes lines to stdout, colouring markers when the terminal
/// allows it.
pub struct StdoutSink {
    stream: StandardStream,
}

impl StdoutSink {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stdout(choice),
        }
    }

    fn spec_for(tone: Tone) -> Option<ColorSpec> {
        let mut spec = ColorSpec::new();
        match tone {
            Tone::Input => spec.set_fg(Some(Color::Cyan)),
            Tone::Output => spec.set_fg(Some(Color::Yellow)),
            Tone::Expected => spec.set_fg(Some(Color::Magenta)),
            Tone::Pass => spec.set_fg(Some(Color::Green)).set_bold(true),
            Tone::Fail => spec.set_fg(Some(Color::Red)).set_bold(true),
            Tone::Rule => return None,
        };
        Some(spec)
    }
}

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str, tone: Tone) {
        // Only the marker is coloured on trace lines; values stay plain.
        let (head, tail) = match tone {
            Tone::Input | Tone::Output | Tone::Expected => text.split_at(text.find(']').map_or(0, |i| i + 1)),
            _ => (text, ""),
        };
        if let Some(spec) = Self::spec_for(tone) {
            let _ = self.stream.set_color(&spec);
        }
        let _ = write!(self.stream, "{}", head);
        let _ = self.stream.reset();
        let _ = writeln!(self.stream, "{}", tail);
    }
}
