//! User-agent groups.

use super::{Directive, OtherDirective, PathDirective};

/// The wildcard user agent.
pub const WILDCARD_AGENT: &str = "*";

/// A set of user-agent names plus the directives that apply to them.
///
/// Agent names are stored lower-case and deduplicated; directives keep
/// document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    user_agents: Vec<String>,
    directives: Vec<Directive>,
}

impl Group {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user-agent name.
    pub fn add_user_agent(&mut self, name: &str) {
        let name = name.trim().to_lowercase();
        if !self.user_agents.contains(&name) {
            self.user_agents.push(name);
        }
    }

    /// Append a directive.
    pub fn add_directive(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    /// Lower-case user-agent names, in first-seen order.
    pub fn user_agents(&self) -> &[String] {
        &self.user_agents
    }

    /// All directives, in document order.
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Whether this group names the wildcard agent.
    pub fn is_wildcard(&self) -> bool {
        self.user_agents.iter().any(|ua| ua == WILDCARD_AGENT)
    }

    /// `allow`/`disallow` directives, in document order.
    pub fn path_directives(&self) -> impl Iterator<Item = &PathDirective> {
        self.directives.iter().filter_map(Directive::as_path)
    }

    /// Every other directive, in document order.
    pub fn other_directives(&self) -> impl Iterator<Item = &OtherDirective> {
        self.directives.iter().filter_map(Directive::as_other)
    }

    /// The first parseable `crawl-delay` value, in seconds.
    pub fn crawl_delay(&self) -> Option<f64> {
        self.other_directives()
            .filter(|d| d.is("crawl-delay"))
            .find_map(|d| d.value().parse::<f64>().ok())
            .filter(|delay| delay.is_finite() && *delay >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agents_lowercased_and_deduplicated() {
        let mut group = Group::new();
        group.add_user_agent("GoogleBot");
        group.add_user_agent("googlebot ");
        group.add_user_agent("*");

        assert_eq!(group.user_agents(), &["googlebot", "*"]);
        assert!(group.is_wildcard());
    }

    #[test]
    fn test_directive_views() {
        let mut group = Group::new();
        group.add_user_agent("bot");
        group.add_directive(Directive::Path(PathDirective::disallow("/a").unwrap()));
        group.add_directive(Directive::Other(OtherDirective::new("Crawl-delay", "x")));
        group.add_directive(Directive::Other(OtherDirective::new("crawl-delay", "2.5")));
        group.add_directive(Directive::Path(PathDirective::allow("/b").unwrap()));

        let paths: Vec<&str> = group.path_directives().map(|d| d.value()).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
        assert_eq!(group.other_directives().count(), 2);
        assert_eq!(group.crawl_delay(), Some(2.5));
        assert!(!group.is_wildcard());
    }

    #[test]
    fn test_no_crawl_delay() {
        let mut group = Group::new();
        group.add_user_agent("bot");
        assert_eq!(group.crawl_delay(), None);

        group.add_directive(Directive::Other(OtherDirective::new("crawl-delay", "-1")));
        assert_eq!(group.crawl_delay(), None);
    }
}
