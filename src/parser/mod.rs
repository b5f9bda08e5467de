//! robots.txt grammar parser.
//!
//! The parser is a push parser: it reads a character stream line by line and
//! reports every recognized construct to a [`RobotsParseHandler`], in document
//! order. It builds nothing itself; [`crate::domain::RobotsBuilder`] is the
//! reference handler that turns the events into a [`crate::Robots`] document.

mod state;

pub use state::{classify, strip_comment, Line, LineMachine, ParserState};

use std::io::{self, BufRead, BufReader, Read};

use crate::{Error, Result};

/// Receiver of parse events.
///
/// Calls arrive strictly in document order and `start_entry`/`end_entry` are
/// always balanced. Every method defaults to a no-op, so a handler only
/// overrides the events it cares about. Returning an error aborts the parse
/// and the error is handed back to the caller of [`RobotsParser::parse`].
pub trait RobotsParseHandler {
    /// A new user-agent group begins.
    fn start_entry(&mut self) -> Result<()> {
        Ok(())
    }

    /// A `user-agent` line of the current group.
    fn user_agent(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    /// An `allow` line of the current group.
    fn allow(&mut self, _path: &str) -> Result<()> {
        Ok(())
    }

    /// A `disallow` line of the current group.
    fn disallow(&mut self, _path: &str) -> Result<()> {
        Ok(())
    }

    /// Any other `token: value` line of the current group. The token keeps
    /// its original case.
    fn other_directive(&mut self, _token: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    /// The current group is complete.
    fn end_entry(&mut self) -> Result<()> {
        Ok(())
    }
}

/// robots.txt parser over any byte stream.
///
/// # Example
///
/// ```
/// use robots_exclusion::domain::RobotsBuilder;
/// use robots_exclusion::parser::RobotsParser;
///
/// let text = "user-agent: *\ndisallow: /private\n";
/// let mut builder = RobotsBuilder::new();
/// RobotsParser::new(text.as_bytes()).parse(&mut builder).unwrap();
///
/// let robots = builder.build();
/// assert_eq!(robots.groups().len(), 1);
/// ```
pub struct RobotsParser<R> {
    reader: R,
}

impl<R: Read> RobotsParser<R> {
    /// Create a parser over a stream.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Consume the whole stream, reporting events to `handler`.
    ///
    /// Fails with [`Error::Parse`] when the stream is not valid UTF-8,
    /// [`Error::Io`] on read failure, or with whatever error the handler
    /// returned.
    pub fn parse<H>(self, handler: &mut H) -> Result<()>
    where
        H: RobotsParseHandler + ?Sized,
    {
        let buf_reader = BufReader::new(self.reader);
        let mut machine = LineMachine::new();

        for (idx, line) in buf_reader.lines().enumerate() {
            let line = line.map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => Error::Parse {
                    line: idx + 1,
                    message: e.to_string(),
                },
                _ => Error::Io(e),
            })?;

            // Byte order mark
            let line = if idx == 0 {
                line.trim_start_matches('\u{feff}')
            } else {
                line.as_str()
            };

            machine.feed_line(line, handler)?;
        }

        machine.finish(handler)
    }
}
