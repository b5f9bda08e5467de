//! Parse handler that assembles a [`Robots`] document.

use super::{Directive, Group, OtherDirective, PathDirective, Robots};
use crate::parser::RobotsParseHandler;
use crate::{Error, Result};

/// Reference [`RobotsParseHandler`]: accumulates events into groups.
#[derive(Debug, Default)]
pub struct RobotsBuilder {
    groups: Vec<Group>,
    current: Option<Group>,
}

impl RobotsBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish the document. An unclosed group is kept.
    pub fn build(mut self) -> Robots {
        if let Some(group) = self.current.take() {
            self.groups.push(group);
        }
        Robots::new(self.groups)
    }

    fn current_mut(&mut self, event: &str) -> Result<&mut Group> {
        self.current
            .as_mut()
            .ok_or_else(|| Error::Handler(format!("{} outside of an entry", event)))
    }
}

impl RobotsParseHandler for RobotsBuilder {
    fn start_entry(&mut self) -> Result<()> {
        if self.current.is_some() {
            return Err(Error::Handler(
                "start_entry while an entry is open".to_string(),
            ));
        }
        self.current = Some(Group::new());
        Ok(())
    }

    fn user_agent(&mut self, name: &str) -> Result<()> {
        self.current_mut("user_agent")?.add_user_agent(name);
        Ok(())
    }

    fn allow(&mut self, path: &str) -> Result<()> {
        let directive = PathDirective::allow(path)?;
        self.current_mut("allow")?
            .add_directive(Directive::Path(directive));
        Ok(())
    }

    fn disallow(&mut self, path: &str) -> Result<()> {
        let directive = PathDirective::disallow(path)?;
        self.current_mut("disallow")?
            .add_directive(Directive::Path(directive));
        Ok(())
    }

    fn other_directive(&mut self, token: &str, value: &str) -> Result<()> {
        self.current_mut("other_directive")?
            .add_directive(Directive::Other(OtherDirective::new(token, value)));
        Ok(())
    }

    fn end_entry(&mut self) -> Result<()> {
        let group = self
            .current
            .take()
            .ok_or_else(|| Error::Handler("end_entry without start_entry".to_string()))?;
        self.groups.push(group);
        Ok(())
    }
}
