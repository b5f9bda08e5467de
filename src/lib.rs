//! robots-exclusion - robots.txt parsing and a fail-open exclusion service.
//!
//! This crate parses the robots exclusion protocol and answers one question:
//! may this crawler fetch this URI?
//!
//! # Features
//!
//! - **Push parser**: line-oriented state machine reporting to a handler trait
//! - **Rule document**: immutable `Robots` -> `Group` -> `Directive` model
//! - **Matching**: most specific user-agent group, first matching path rule
//! - **Wildcards**: `*` in path patterns and a trailing `$` end anchor
//! - **Cached service**: bounded, expiring, load-coalescing cache per origin
//! - **Fail-open**: unreachable or broken robots.txt never blocks crawling
//!
//! # Quick Start
//!
//! ```
//! use robots_exclusion::{matcher, Robots};
//!
//! let robots: Robots = "user-agent: *\ndisallow: /private\n".parse().unwrap();
//!
//! assert!(!matcher::is_path_allowed(&robots, "examplebot", "/private/page"));
//! assert!(matcher::is_path_allowed(&robots, "examplebot", "/public"));
//! ```
//!
//! # Service
//!
//! For crawlers checking many URIs across many hosts, use
//! [`RobotExclusionService`]:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use robots_exclusion::{RobotExclusionConfig, RobotExclusionService};
//! use url::Url;
//!
//! let config = RobotExclusionConfig::default()
//!     .with_cache_max_size_records(1_000)
//!     .with_cached_expires_hours(12);
//!
//! let service = RobotExclusionService::from_config(config)?;
//! service.start()?;
//!
//! let uri = Url::parse("https://example.com/some/page")?;
//! let allowed = service.is_allowed("examplebot/1.0", &uri);
//! println!("{}: {}", uri, allowed);
//!
//! service.stop();
//! # Ok(())
//! # }
//! ```
//!
//! # Matching Priority
//!
//! 1. A group naming the agent (first such group in the file)
//! 2. The `*` group
//! 3. No group: allowed
//!
//! Within the selected group, the first `allow`/`disallow` line whose pattern
//! matches decides; no matching line means allowed.

mod error;

pub mod domain;
pub mod matcher;
pub mod net;
pub mod parser;
pub mod service;

// Re-export core types
pub use error::{Error, Result};

pub use domain::{Directive, Group, OtherDirective, PathDirective, Robots, RobotsBuilder};
pub use parser::{RobotsParseHandler, RobotsParser};

// Re-export collaborators
pub use net::{HttpRobotsDownloader, OriginResolver, RobotsDownloader, RobotsUrlResolver};

// Re-export the service
pub use service::{CacheStats, RobotExclusionConfig, RobotExclusionService, RobotsCache};
