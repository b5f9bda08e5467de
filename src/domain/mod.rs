//! The parsed rule-set document.
//!
//! A [`Robots`] document is an ordered list of [`Group`]s, each holding the
//! user agents it applies to and its [`Directive`]s. Documents are built once
//! by [`RobotsBuilder`] and never mutated afterwards, so they can be shared
//! across threads behind an `Arc` without further locking.

mod builder;
mod directive;
mod group;

pub use builder::RobotsBuilder;
pub use directive::{Directive, OtherDirective, PathDirective};
pub use group::{Group, WILDCARD_AGENT};

pub(crate) use directive::path_and_query;

use std::io::Read;
use std::str::FromStr;

use crate::parser::RobotsParser;
use crate::{Error, Result};

/// A parsed robots.txt file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Robots {
    groups: Vec<Group>,
}

impl Robots {
    /// Create a document from groups, in file order.
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Parse a robots.txt stream with the reference builder.
    pub fn parse<R: Read>(reader: R) -> Result<Self> {
        let mut builder = RobotsBuilder::new();
        RobotsParser::new(reader).parse(&mut builder)?;
        Ok(builder.build())
    }

    /// Groups in file order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Whether the document has no groups at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// `sitemap` values across all groups, in file order.
    pub fn sitemaps(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(Group::other_directives)
            .filter(|d| d.is("sitemap"))
            .map(OtherDirective::value)
            .collect()
    }
}

impl FromStr for Robots {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}
