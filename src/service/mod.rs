//! Fail-open robot exclusion service.
//!
//! [`RobotExclusionService`] resolves a resource URI to its robots.txt,
//! loads the document through a [`RobotsCache`], and evaluates it with the
//! matcher. Any failure along the way allows the request: an unreachable or
//! malformed robots.txt never blocks crawling.

mod cache;
mod config;

pub use cache::{CacheStats, RobotsCache};
pub use config::{
    RobotExclusionConfig, DEFAULT_CACHED_EXPIRES_HOURS, DEFAULT_CACHE_MAX_SIZE_RECORDS,
};

use arc_swap::ArcSwapOption;
use std::sync::Arc;

use url::Url;

use crate::matcher;
use crate::net::{HttpRobotsDownloader, OriginResolver, RobotsDownloader, RobotsUrlResolver};
use crate::{Error, Result, Robots};

/// Robot exclusion service.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use robots_exclusion::service::{RobotExclusionConfig, RobotExclusionService};
/// use url::Url;
///
/// let service = RobotExclusionService::from_config(RobotExclusionConfig::default())?;
/// service.start()?;
///
/// let uri = Url::parse("https://example.com/private/page.html")?;
/// if service.is_allowed("examplebot", &uri) {
///     // fetch it
/// }
///
/// service.stop();
/// # Ok(())
/// # }
/// ```
pub struct RobotExclusionService {
    config: RobotExclusionConfig,
    resolver: Arc<dyn OriginResolver>,
    downloader: Arc<dyn RobotsDownloader>,
    /// Present while the service is running
    cache: ArcSwapOption<RobotsCache>,
}

impl RobotExclusionService {
    /// Create a stopped service with explicit collaborators.
    pub fn new(
        config: RobotExclusionConfig,
        resolver: Arc<dyn OriginResolver>,
        downloader: Arc<dyn RobotsDownloader>,
    ) -> Self {
        Self {
            config,
            resolver,
            downloader,
            cache: ArcSwapOption::empty(),
        }
    }

    /// Create a stopped service that downloads robots.txt over HTTP.
    pub fn from_config(config: RobotExclusionConfig) -> Result<Self> {
        config.validate()?;
        let downloader = HttpRobotsDownloader::new(&config);
        Ok(Self::new(
            config,
            Arc::new(RobotsUrlResolver),
            Arc::new(downloader),
        ))
    }

    /// Start the service with an empty cache. Starting twice is a no-op.
    pub fn start(&self) -> Result<()> {
        if self.is_running() {
            log::debug!("Already running");
            return Ok(());
        }
        self.config.validate()?;

        log::info!("Starting up");
        log::debug!(
            "Initializing cache (maxSize: {}, expires after: {} hours)",
            self.config.cache_max_size_records,
            self.config.cached_expires_hours
        );

        let cache = RobotsCache::new(
            self.config.cache_max_size_records,
            self.config.time_to_live(),
        );
        self.cache.store(Some(Arc::new(cache)));
        Ok(())
    }

    /// Stop the service, releasing every cached document.
    pub fn stop(&self) {
        if let Some(cache) = self.cache.swap(None) {
            log::info!("Shutting down");
            cache.invalidate_all();
            log::debug!("Cache stats: {:?}", cache.stats());
        }
    }

    /// Whether [`start`](Self::start) has been called without a later
    /// [`stop`](Self::stop).
    pub fn is_running(&self) -> bool {
        self.cache.load().is_some()
    }

    /// Statistics of the running cache.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.load_full().map(|cache| cache.stats())
    }

    /// The configuration in use.
    pub fn config(&self) -> &RobotExclusionConfig {
        &self.config
    }

    /// The robots.txt document governing a resource, loading it if needed.
    pub fn robots_for(&self, resource: &Url) -> Result<Arc<Robots>> {
        let cache = self
            .cache
            .load_full()
            .ok_or(Error::NotRunning)?;

        let key = self.resolver.resolve(resource)?;
        cache.get_or_load(&key, |robots_url| self.downloader.load(robots_url))
    }

    /// Whether `agent` may fetch `resource`.
    ///
    /// Never fails: resolution, download, or parse failures allow the
    /// request, as does calling this on a stopped service.
    pub fn is_allowed(&self, agent: &str, resource: &Url) -> bool {
        log::debug!("evaluating: {}", resource);

        let robots = match self.robots_for(resource) {
            Ok(robots) => robots,
            Err(Error::NotRunning) => {
                log::warn!("Service not running; allowing: {}", resource);
                return true;
            }
            Err(e) => {
                log::debug!("robots.txt download failure ({}); allowing: {}", e, resource);
                return true;
            }
        };

        matcher::is_allowed(&robots, agent, resource)
    }
}

impl Drop for RobotExclusionService {
    fn drop(&mut self) {
        self.stop();
    }
}
