//! Collaborators that turn a resource URI into a robots.txt document.

mod downloader;

pub use downloader::{HttpRobotsDownloader, RobotsDownloader};

use url::Url;

use crate::{Error, Result};

/// Maps a resource URI to the cache key of the robots.txt governing it.
pub trait OriginResolver: Send + Sync {
    fn resolve(&self, resource: &Url) -> Result<Url>;
}

/// Resolves `scheme://host[:port]/...` to `scheme://host[:port]/robots.txt`.
///
/// Default ports are dropped by URL normalization, so `http://a:80/x` and
/// `http://a/y` share one key.
#[derive(Debug, Clone, Copy, Default)]
pub struct RobotsUrlResolver;

impl OriginResolver for RobotsUrlResolver {
    fn resolve(&self, resource: &Url) -> Result<Url> {
        match resource.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::InvalidUri(format!(
                    "unsupported scheme {:?}: {}",
                    other, resource
                )))
            }
        }
        if resource.host_str().is_none() {
            return Err(Error::InvalidUri(format!("missing host: {}", resource)));
        }

        let mut robots_url = resource.clone();
        robots_url.set_path("/robots.txt");
        robots_url.set_query(None);
        robots_url.set_fragment(None);
        robots_url
            .set_username("")
            .and_then(|()| robots_url.set_password(None))
            .map_err(|()| Error::InvalidUri(format!("cannot strip credentials: {}", resource)))?;
        Ok(robots_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(uri: &str) -> Result<Url> {
        RobotsUrlResolver.resolve(&Url::parse(uri).unwrap())
    }

    #[test]
    fn test_resolve_origin() {
        assert_eq!(
            resolve("https://Example.com/a/b?c=d#e").unwrap().as_str(),
            "https://example.com/robots.txt"
        );
        assert_eq!(
            resolve("http://user:pw@example.com:8080/x").unwrap().as_str(),
            "http://example.com:8080/robots.txt"
        );
    }

    #[test]
    fn test_default_port_shares_key() {
        assert_eq!(
            resolve("http://example.com:80/a").unwrap(),
            resolve("http://example.com/b").unwrap()
        );
        assert_ne!(
            resolve("http://example.com/a").unwrap(),
            resolve("https://example.com/a").unwrap()
        );
    }

    #[test]
    fn test_unsupported_uris() {
        assert!(matches!(
            resolve("mailto:someone@example.com"),
            Err(Error::InvalidUri(_))
        ));
        assert!(matches!(
            resolve("file:///etc/passwd"),
            Err(Error::InvalidUri(_))
        ));
    }
}
