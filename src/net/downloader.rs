//! robots.txt download and parse.

use std::io::Read;

use url::Url;

use crate::service::RobotExclusionConfig;
use crate::{Error, Result, Robots};

/// Fetches and parses the robots.txt at a resolved URL.
pub trait RobotsDownloader: Send + Sync {
    fn load(&self, robots_url: &Url) -> Result<Robots>;
}

impl<F> RobotsDownloader for F
where
    F: Fn(&Url) -> Result<Robots> + Send + Sync,
{
    fn load(&self, robots_url: &Url) -> Result<Robots> {
        self(robots_url)
    }
}

/// Blocking HTTP downloader.
///
/// - 2xx: the body (capped at `max_file_size_bytes`) is decoded as UTF-8,
///   invalid sequences replaced, and parsed
/// - 4xx: no robots.txt; an empty document, so everything is allowed
/// - 5xx and transport errors: [`Error::Download`]
pub struct HttpRobotsDownloader {
    agent: ureq::Agent,
    max_file_size_bytes: u64,
}

impl HttpRobotsDownloader {
    /// Create a downloader from the service configuration.
    pub fn new(config: &RobotExclusionConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&config.user_agent)
            .timeout_connect(config.read_timeout())
            .timeout_read(config.read_timeout())
            .build();

        Self {
            agent,
            max_file_size_bytes: config.max_file_size_bytes,
        }
    }

    /// Parse a fetched body. A body over the cap loses its last, partial
    /// line along with everything after it.
    fn parse_body<R: Read>(&self, body: R) -> Result<Robots> {
        let cap = self.max_file_size_bytes;
        let mut raw = Vec::new();
        body.take(cap.saturating_add(1)).read_to_end(&mut raw)?;

        if raw.len() as u64 > cap {
            raw.truncate(cap as usize);
            let complete = raw.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
            raw.truncate(complete);
            log::debug!("robots.txt over {} bytes; kept {} bytes", cap, complete);
        }

        let text = String::from_utf8_lossy(&raw);
        Robots::parse(text.as_bytes())
    }
}

impl RobotsDownloader for HttpRobotsDownloader {
    fn load(&self, robots_url: &Url) -> Result<Robots> {
        log::debug!("Downloading {}", robots_url);

        let response = match self.agent.get(robots_url.as_str()).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) if (400..500).contains(&code) => {
                log::debug!("robots.txt unavailable (HTTP {}): {}", code, robots_url);
                return Ok(Robots::default());
            }
            Err(ureq::Error::Status(code, _)) => {
                return Err(Error::Download(format!(
                    "HTTP error {}: {}",
                    code, robots_url
                )))
            }
            Err(ureq::Error::Transport(t)) => {
                return Err(Error::Download(format!(
                    "transport error: {}: {}",
                    t, robots_url
                )))
            }
        };

        let robots = self.parse_body(response.into_reader())?;
        log::debug!(
            "Loaded {} group(s) from {}",
            robots.groups().len(),
            robots_url
        );
        Ok(robots)
    }
}
