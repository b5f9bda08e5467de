//! Group selection and path evaluation.
//!
//! Matching follows two rules:
//! 1. Group selection: a group naming the agent beats the `*` group; among
//!    several groups naming the agent, the first in the file wins.
//! 2. Path evaluation: the first path directive of the selected group whose
//!    pattern matches decides. No match means allowed.

use url::Url;

use crate::domain::{path_and_query, Group, Robots, WILDCARD_AGENT};

/// Select the most specific group for a crawler agent string.
///
/// A group's literal matches when it equals, ignoring case, either the full
/// agent string or its product token (`examplebot` for `ExampleBot/2.1`).
pub fn best_matching_group<'a>(groups: &'a [Group], agent: &str) -> Option<&'a Group> {
    let agent = agent.trim().to_lowercase();
    let product = product_token(&agent);
    let mut wildcard = None;

    for group in groups {
        let specific = group
            .user_agents()
            .iter()
            .any(|ua| !ua.is_empty() && ua != WILDCARD_AGENT && (*ua == agent || ua == product));
        if specific {
            return Some(group);
        }
        if wildcard.is_none() && group.is_wildcard() {
            wildcard = Some(group);
        }
    }

    wildcard
}

/// Decide access for a resource URI.
pub fn is_allowed(robots: &Robots, agent: &str, uri: &Url) -> bool {
    is_path_allowed(robots, agent, &path_and_query(uri))
}

/// Decide access for a raw path (with optional `?query`).
pub fn is_path_allowed(robots: &Robots, agent: &str, path: &str) -> bool {
    if robots.is_empty() {
        log::debug!("robots.txt contains no agent groups; allowing: {}", path);
        return true;
    }

    let Some(group) = best_matching_group(robots.groups(), agent) else {
        log::debug!("No matching groups; allowing: {}", path);
        return true;
    };

    for directive in group.path_directives() {
        if directive.matches_path(path) {
            log::debug!(
                "Path directive {} matches; {}: {}",
                directive.value(),
                if directive.is_allowed() {
                    "allowing"
                } else {
                    "disallowing"
                },
                path
            );
            return directive.is_allowed();
        }
    }

    log::debug!("No matching path directive; allowing: {}", path);
    true
}

/// Leading name of an agent string, before any version or comment.
fn product_token(agent: &str) -> &str {
    agent
        .split(|c: char| c == '/' || c.is_whitespace())
        .next()
        .unwrap_or(agent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn robots(text: &str) -> Robots {
        text.parse().unwrap()
    }

    #[test]
    fn test_wildcard_disallow() {
        let robots = robots("user-agent: *\ndisallow: /a\n");
        let blocked = Url::parse("http://example.com/a/b").unwrap();
        let open = Url::parse("http://example.com/c").unwrap();

        assert!(!is_allowed(&robots, "bot", &blocked));
        assert!(is_allowed(&robots, "bot", &open));
    }

    #[test]
    fn test_first_match_wins() {
        let robots = robots("user-agent: *\ndisallow: /private\nallow: /private/public\n");
        assert!(!is_path_allowed(&robots, "anybot", "/private/public"));

        let reversed = robots_reversed();
        assert!(is_path_allowed(&reversed, "anybot", "/private/public"));
        assert!(!is_path_allowed(&reversed, "anybot", "/private/secret"));
    }

    fn robots_reversed() -> Robots {
        robots("user-agent: *\nallow: /private/public\ndisallow: /private\n")
    }

    #[test]
    fn test_specific_beats_wildcard() {
        let robots = robots("user-agent: *\ndisallow: /\n\nuser-agent: goodbot\nallow: /\n");

        let group = best_matching_group(robots.groups(), "GoodBot").unwrap();
        assert!(!group.is_wildcard());
        assert!(is_path_allowed(&robots, "GoodBot", "/x"));
        assert!(!is_path_allowed(&robots, "otherbot", "/x"));
    }

    #[test]
    fn test_product_token_match() {
        let robots = robots("user-agent: examplebot\ndisallow: /\n");
        assert!(!is_path_allowed(&robots, "ExampleBot/2.1", "/page"));
        assert!(!is_path_allowed(
            &robots,
            "examplebot (+http://example.com/bot)",
            "/page"
        ));
        assert!(is_path_allowed(&robots, "examplebotter", "/page"));
    }

    #[test]
    fn test_duplicate_agent_first_group_wins() {
        let robots = robots("user-agent: bot\ndisallow: /first\n\nuser-agent: bot\ndisallow: /second\n");
        assert!(!is_path_allowed(&robots, "bot", "/first"));
        assert!(is_path_allowed(&robots, "bot", "/second"));
    }

    #[test]
    fn test_no_groups_allowed() {
        assert!(is_path_allowed(&Robots::default(), "bot", "/anything"));
    }

    #[test]
    fn test_no_matching_group_allowed() {
        let robots = robots("user-agent: otherbot\ndisallow: /\n");
        assert!(best_matching_group(robots.groups(), "bot").is_none());
        assert!(is_path_allowed(&robots, "bot", "/anything"));
    }

    #[test]
    fn test_empty_disallow_allows() {
        let robots = robots("user-agent: *\ndisallow:\n");
        assert!(is_path_allowed(&robots, "bot", "/anything"));
    }

    #[test]
    fn test_overlapping_agents() {
        let robots = robots(
            "User-agent:* \nDisallow:/foo \n\nUser-agent:Bot \nAllow:/foo/bar \n\nUser-agent:Bot-1 \nDisallow:/foo/bar/baz \n",
        );

        assert!(!is_path_allowed(&robots, "crawler", "/foo"));
        assert!(is_path_allowed(&robots, "Bot", "/foo/bar"));
        assert!(is_path_allowed(&robots, "Bot", "/foo"));
        assert!(!is_path_allowed(&robots, "Bot-1", "/foo/bar/baz"));
        assert!(is_path_allowed(&robots, "Bot-1", "/foo/bar"));
    }
}
