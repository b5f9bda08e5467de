//! Line classification and the group state machine.

use std::borrow::Cow;

use super::RobotsParseHandler;
use crate::Result;

/// Where the parser stands relative to user-agent groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    /// No group is open.
    #[default]
    OutsideGroup,
    /// A group is open and its last directive line was `user-agent`.
    InAgents,
    /// A group is open and has seen at least one rule line.
    InRules,
}

/// A comment-stripped line, classified by its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty after comment stripping.
    Blank,
    /// `user-agent: <name>`
    UserAgent(&'a str),
    /// `allow: <path>`
    Allow(&'a str),
    /// `disallow: <path>`
    Disallow(&'a str),
    /// Any other `token: value`.
    Other { token: &'a str, value: &'a str },
    /// Text with no `token:` prefix.
    Unrecognized(&'a str),
}

/// Drop everything from the first unescaped `#`.
///
/// `\#` stands for a literal `#` and is unescaped in the result.
pub fn strip_comment(line: &str) -> Cow<'_, str> {
    let mut prev_backslash = false;
    let mut end = line.len();

    for (idx, ch) in line.char_indices() {
        if ch == '#' && !prev_backslash {
            end = idx;
            break;
        }
        prev_backslash = ch == '\\';
    }

    let kept = &line[..end];
    if kept.contains("\\#") {
        Cow::Owned(kept.replace("\\#", "#"))
    } else {
        Cow::Borrowed(kept)
    }
}

/// Classify comment-free line content.
pub fn classify(content: &str) -> Line<'_> {
    let content = content.trim();
    if content.is_empty() {
        return Line::Blank;
    }

    let Some((token, value)) = content.split_once(':') else {
        return Line::Unrecognized(content);
    };
    let token = token.trim();
    let value = value.trim();

    if token.is_empty() {
        Line::Unrecognized(content)
    } else if token.eq_ignore_ascii_case("user-agent") {
        Line::UserAgent(value)
    } else if token.eq_ignore_ascii_case("allow") {
        Line::Allow(value)
    } else if token.eq_ignore_ascii_case("disallow") {
        Line::Disallow(value)
    } else {
        Line::Other { token, value }
    }
}

/// The group state machine, fed one physical line at a time.
#[derive(Debug, Default)]
pub struct LineMachine {
    state: ParserState,
    line_no: usize,
}

impl LineMachine {
    /// Create a machine outside any group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Process one physical line (without its terminator).
    pub fn feed_line<H>(&mut self, raw: &str, handler: &mut H) -> Result<()>
    where
        H: RobotsParseHandler + ?Sized,
    {
        self.line_no += 1;
        let content = strip_comment(raw);

        match classify(&content) {
            Line::Blank => {}
            Line::Unrecognized(text) => {
                log::debug!("Skipping line {}: no directive in {:?}", self.line_no, text);
            }
            Line::UserAgent(name) => {
                match self.state {
                    ParserState::OutsideGroup => handler.start_entry()?,
                    ParserState::InRules => {
                        handler.end_entry()?;
                        handler.start_entry()?;
                    }
                    ParserState::InAgents => {}
                }
                self.state = ParserState::InAgents;
                handler.user_agent(name)?;
            }
            Line::Allow(path) => {
                if self.enter_rules() {
                    handler.allow(path)?;
                }
            }
            Line::Disallow(path) => {
                if self.enter_rules() {
                    handler.disallow(path)?;
                }
            }
            Line::Other { token, value } => {
                if self.enter_rules() {
                    handler.other_directive(token, value)?;
                }
            }
        }

        Ok(())
    }

    /// Close the open group, if any. Call once at end of stream.
    pub fn finish<H>(&mut self, handler: &mut H) -> Result<()>
    where
        H: RobotsParseHandler + ?Sized,
    {
        if self.state != ParserState::OutsideGroup {
            self.state = ParserState::OutsideGroup;
            handler.end_entry()?;
        }
        Ok(())
    }

    /// Move into `InRules`; false when no group is open.
    fn enter_rules(&mut self) -> bool {
        if self.state == ParserState::OutsideGroup {
            log::debug!(
                "Discarding line {}: directive outside any user-agent group",
                self.line_no
            );
            return false;
        }
        self.state = ParserState::InRules;
        true
    }
}
