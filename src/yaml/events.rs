//! Block-style YAML event writer
//!
//! [`EventWriter`] turns a stream of [`Event`]s (stream, document, mapping,
//! sequence and scalar boundaries) into block-style YAML text. It is the
//! output half of the codec's event-stream primitive; `serde_yaml` covers the
//! input half.
//!
//! The layout is fixed:
//!
//! - mapping entries are indented two spaces under their key,
//! - sequence items are indented two spaces under their key and prefixed
//!   with `- `,
//! - empty collections are written in flow form (`[]`, `{}`),
//! - documents after the first are introduced by `---`.
//!
//! Each document is rendered into an in-memory buffer and only written to the
//! sink when its [`Event::DocumentEnd`] arrives. An error part way through a
//! document therefore never reaches the sink. After any error the writer
//! refuses further events.

use std::borrow::Cow;
use std::io::Write;

use log::trace;

use crate::error::{Error, Result};

/// Longest key written in the implicit `key: value` form. YAML readers reject
/// implicit keys past 1024 characters, so longer keys get an explicit
/// `? key` entry.
const MAX_IMPLICIT_KEY_LEN: usize = 1000;

/// How a scalar is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    /// Written verbatim. The caller guarantees the text is a valid plain
    /// scalar, such as a fixed key or an integer.
    Plain,
    /// Plain when the text reads back as the same string, double-quoted
    /// otherwise.
    Any,
    /// Folded block scalar (`>`), falling back to double-quoted for text the
    /// folded form cannot carry exactly.
    Folded,
}

/// A single step of the output event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    MappingStart,
    MappingEnd,
    SequenceStart,
    SequenceEnd,
    Scalar { value: &'a str, style: ScalarStyle },
}

impl<'a> Event<'a> {
    /// A scalar written verbatim
    pub fn plain(value: &'a str) -> Self {
        Event::Scalar {
            value,
            style: ScalarStyle::Plain,
        }
    }

    /// A scalar quoted only when needed
    pub fn scalar(value: &'a str) -> Self {
        Event::Scalar {
            value,
            style: ScalarStyle::Any,
        }
    }

    /// A folded block scalar
    pub fn folded(value: &'a str) -> Self {
        Event::Scalar {
            value,
            style: ScalarStyle::Folded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Stream,
    Document { root_done: bool },
    Ended,
    Failed,
}

#[derive(Debug)]
enum Frame {
    Mapping {
        indent: usize,
        expect_value: bool,
        entries: usize,
    },
    Sequence {
        indent: usize,
        items: usize,
    },
}

/// Where the next piece of output lands relative to what was written last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    LineStart,
    AfterKey,
    AfterDash,
}

/// Writes YAML events to a sink, one buffered document at a time
#[derive(Debug)]
pub struct EventWriter<W: Write> {
    sink: W,
    buffer: String,
    state: State,
    stack: Vec<Frame>,
    position: Position,
    documents: usize,
}

impl<W: Write> EventWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            buffer: String::new(),
            state: State::Start,
            stack: Vec::new(),
            position: Position::LineStart,
            documents: 0,
        }
    }

    /// Number of documents written to the sink so far
    pub fn documents_written(&self) -> usize {
        self.documents
    }

    /// Whether the stream has been opened and not yet closed
    pub fn in_stream(&self) -> bool {
        matches!(self.state, State::Stream | State::Document { .. })
    }

    /// Give back the sink
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Process one event.
    ///
    /// # Errors
    ///
    /// Returns `Error::Emit` when the event is not valid at this point of the
    /// stream, and `Error::Io` when the sink fails. Either way the writer is
    /// left unusable.
    pub fn emit(&mut self, event: Event<'_>) -> Result<()> {
        if self.state == State::Failed {
            return Err(Error::emit("Emitter is unusable after an earlier error"));
        }
        let result = self.dispatch(event);
        if result.is_err() {
            self.state = State::Failed;
            self.buffer.clear();
            self.stack.clear();
        }
        result
    }

    fn dispatch(&mut self, event: Event<'_>) -> Result<()> {
        trace!("Emitter event: {:?}", event);
        match event {
            Event::StreamStart => {
                if self.state != State::Start {
                    return Err(Error::emit("Error starting stream"));
                }
                self.state = State::Stream;
                Ok(())
            }
            Event::StreamEnd => {
                if self.state != State::Stream {
                    return Err(Error::emit("Error ending stream"));
                }
                self.sink.flush()?;
                self.state = State::Ended;
                Ok(())
            }
            Event::DocumentStart => {
                if self.state != State::Stream {
                    return Err(Error::emit("Error starting document"));
                }
                self.buffer.clear();
                if self.documents > 0 {
                    self.buffer.push_str("---\n");
                }
                self.position = Position::LineStart;
                self.state = State::Document { root_done: false };
                Ok(())
            }
            Event::DocumentEnd => {
                if self.state != (State::Document { root_done: true }) || !self.stack.is_empty() {
                    return Err(Error::emit("Error ending document"));
                }
                self.sink.write_all(self.buffer.as_bytes())?;
                self.buffer.clear();
                self.documents += 1;
                self.state = State::Stream;
                Ok(())
            }
            Event::MappingStart => {
                let indent = self.begin_node("Error starting mapping")?;
                self.stack.push(Frame::Mapping {
                    indent,
                    expect_value: false,
                    entries: 0,
                });
                Ok(())
            }
            Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Mapping {
                    expect_value: false,
                    entries,
                    ..
                }) => {
                    if entries == 0 {
                        self.write_empty_collection("{}");
                    }
                    self.end_node();
                    Ok(())
                }
                _ => Err(Error::emit("Error ending mapping")),
            },
            Event::SequenceStart => {
                let indent = self.begin_node("Error starting sequence")?;
                self.stack.push(Frame::Sequence { indent, items: 0 });
                Ok(())
            }
            Event::SequenceEnd => match self.stack.pop() {
                Some(Frame::Sequence { items, .. }) => {
                    if items == 0 {
                        self.write_empty_collection("[]");
                    }
                    self.end_node();
                    Ok(())
                }
                _ => Err(Error::emit("Error ending sequence")),
            },
            Event::Scalar { value, style } => {
                let is_key = matches!(
                    self.stack.last(),
                    Some(Frame::Mapping {
                        expect_value: false,
                        ..
                    })
                );
                if is_key {
                    self.write_key(value, style)
                } else {
                    self.write_value(value, style)
                }
            }
        }
    }

    /// Place a value node and return the indentation its children use.
    fn begin_node(&mut self, context: &str) -> Result<usize> {
        match self.stack.last_mut() {
            None => match self.state {
                State::Document { root_done: false } => Ok(0),
                _ => Err(Error::emit(context)),
            },
            Some(Frame::Mapping {
                indent,
                expect_value,
                ..
            }) => {
                if !*expect_value {
                    return Err(Error::emit(format!("{}: complex keys are not supported", context)));
                }
                Ok(*indent + 2)
            }
            Some(Frame::Sequence { indent, items }) => {
                let indent = *indent;
                *items += 1;
                match self.position {
                    Position::LineStart => push_indent(&mut self.buffer, indent),
                    Position::AfterKey => {
                        self.buffer.push('\n');
                        push_indent(&mut self.buffer, indent);
                    }
                    Position::AfterDash => {}
                }
                self.buffer.push_str("- ");
                self.position = Position::AfterDash;
                Ok(indent + 2)
            }
        }
    }

    /// Mark the current node as complete in its parent.
    fn end_node(&mut self) {
        match self.stack.last_mut() {
            None => {
                self.state = State::Document { root_done: true };
            }
            Some(Frame::Mapping { expect_value, .. }) => *expect_value = false,
            Some(Frame::Sequence { .. }) => {}
        }
    }

    fn write_empty_collection(&mut self, flow: &str) {
        if self.position == Position::AfterKey {
            self.buffer.push(' ');
        }
        self.buffer.push_str(flow);
        self.buffer.push('\n');
        self.position = Position::LineStart;
    }

    fn write_key(&mut self, value: &str, style: ScalarStyle) -> Result<()> {
        let Some(Frame::Mapping {
            indent,
            expect_value,
            entries,
        }) = self.stack.last_mut()
        else {
            return Err(Error::emit("Error writing key"));
        };
        let indent = *indent;
        *expect_value = true;
        *entries += 1;

        match self.position {
            Position::LineStart => push_indent(&mut self.buffer, indent),
            Position::AfterKey => {
                self.buffer.push('\n');
                push_indent(&mut self.buffer, indent);
            }
            Position::AfterDash => {}
        }

        let key = match style {
            ScalarStyle::Plain => verbatim(value)?,
            ScalarStyle::Any | ScalarStyle::Folded => render_any(value),
        };
        if key.len() > MAX_IMPLICIT_KEY_LEN {
            self.buffer.push_str("? ");
            self.buffer.push_str(&key);
            self.buffer.push('\n');
            push_indent(&mut self.buffer, indent);
        } else {
            self.buffer.push_str(&key);
        }
        self.buffer.push(':');
        self.position = Position::AfterKey;
        Ok(())
    }

    fn write_value(&mut self, value: &str, style: ScalarStyle) -> Result<()> {
        let indent = self.begin_node("Error writing scalar")?;
        if self.position == Position::AfterKey {
            self.buffer.push(' ');
        }
        match style {
            ScalarStyle::Plain => {
                let text = verbatim(value)?;
                self.buffer.push_str(&text);
            }
            ScalarStyle::Any => self.buffer.push_str(&render_any(value)),
            ScalarStyle::Folded => {
                if indent > 0 && is_foldable(value) {
                    write_folded(&mut self.buffer, value, indent);
                } else {
                    self.buffer.push_str(&double_quoted(value));
                }
            }
        }
        if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.position = Position::LineStart;
        self.end_node();
        Ok(())
    }
}

fn push_indent(buffer: &mut String, indent: usize) {
    buffer.extend(std::iter::repeat(' ').take(indent));
}

fn verbatim(value: &str) -> Result<Cow<'_, str>> {
    if value.is_empty() || value.contains(['\n', '\r']) {
        return Err(Error::emit(format!(
            "Error writing scalar: {:?} is not a plain scalar",
            value
        )));
    }
    Ok(Cow::Borrowed(value))
}

/// Render `value` plain when a YAML reader would read it back unchanged.
fn render_any(value: &str) -> Cow<'_, str> {
    if is_plain_safe(value) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(double_quoted(value))
    }
}

fn is_plain_safe(value: &str) -> bool {
    if value.is_empty()
        || value.starts_with([' ', '\t'])
        || value.ends_with([' ', '\t'])
        || !value
            .chars()
            .all(|c| !matches!(c, '\t' | '\n' | '\r') && is_printable(c) && !is_special_break(c))
    {
        return false;
    }
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(value),
        Ok(serde_yaml::Value::String(ref parsed)) if parsed == value
    )
}

/// Characters YAML 1.2 allows unescaped in a stream
fn is_printable(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{7E}'
        | '\u{85}'
        | '\u{A0}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
        && c != '\u{FEFF}'
}

/// Line breaks older YAML readers honour besides `\n` and `\r`
fn is_special_break(c: char) -> bool {
    matches!(c, '\u{85}' | '\u{2028}' | '\u{2029}')
}

fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{B}' => out.push_str("\\v"),
            '\u{C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\u{1B}' => out.push_str("\\e"),
            '\u{85}' => out.push_str("\\N"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if is_printable(c) => out.push(c),
            c if (c as u32) <= 0xFF => out.push_str(&format!("\\x{:02X}", c as u32)),
            c if (c as u32) <= 0xFFFF => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push_str(&format!("\\U{:08X}", c as u32)),
        }
    }
    out.push('"');
    out
}

/// Whether the folded form reproduces `value` exactly, up to one trailing
/// line break added by clip chomping.
fn is_foldable(value: &str) -> bool {
    if value.is_empty() || value.starts_with('\n') || value.ends_with('\n') {
        return false;
    }
    if !value
        .chars()
        .all(|c| c == '\n' || (c != '\r' && is_printable(c) && !is_special_break(c)))
    {
        return false;
    }
    value.split('\n').all(|line| {
        line.is_empty()
            || !(line.starts_with([' ', '\t']) || line.ends_with([' ', '\t']))
    })
}

/// Write `value` as a folded block scalar whose content sits at `indent`.
///
/// A single line break between two text lines folds to a space when read,
/// so every break that follows a text line gets an extra empty line.
fn write_folded(buffer: &mut String, value: &str, indent: usize) {
    buffer.push_str(">\n");
    let lines: Vec<&str> = value.split('\n').collect();
    let last = lines.len() - 1;
    for (index, line) in lines.iter().enumerate() {
        if !line.is_empty() {
            push_indent(buffer, indent);
            buffer.push_str(line);
        }
        buffer.push('\n');
        if !line.is_empty() && index < last {
            buffer.push('\n');
        }
    }
}
