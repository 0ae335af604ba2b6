//! Channel scanning: fetch a listing page and report its highest version

use std::fmt;
use std::sync::Arc;

use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::config::{
    DEFAULT_PRERELEASE_URL, DEFAULT_STABLE_URL, PRERELEASE_SELECTOR, STABLE_SELECTOR,
};
use crate::scan::document::{hrefs, parse_selector};
use crate::scan::error::ScanError;
use crate::scan::source::PageSource;
use crate::version::{Version, track_max};

/// Release channel served by the HTTP facade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// First column of the two-column source download index
    Stable,
    /// Every link on the flat FTP directory listing
    Prerelease,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Stable, Channel::Prerelease];

    /// Route serving this channel
    pub fn path(&self) -> &'static str {
        match self {
            Channel::Stable => "/python-stable",
            Channel::Prerelease => "/python-prerelease",
        }
    }

    /// CSS selector picking the version-bearing links of the listing page
    pub fn selector(&self) -> &'static str {
        match self {
            Channel::Stable => STABLE_SELECTOR,
            Channel::Prerelease => PRERELEASE_SELECTOR,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Stable => write!(f, "stable"),
            Channel::Prerelease => write!(f, "prerelease"),
        }
    }
}

/// Listing page URL per channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelUrls {
    pub stable: String,
    pub prerelease: String,
}

impl Default for ChannelUrls {
    fn default() -> Self {
        Self {
            stable: DEFAULT_STABLE_URL.to_string(),
            prerelease: DEFAULT_PRERELEASE_URL.to_string(),
        }
    }
}

struct Target {
    url: String,
    selector: Selector,
}

/// Scans listing pages for the highest version per channel.
///
/// Holds no state between scans; every call fetches the page again.
pub struct Scanner {
    source: Arc<dyn PageSource>,
    stable: Target,
    prerelease: Target,
}

impl Scanner {
    pub fn new(source: Arc<dyn PageSource>, urls: ChannelUrls) -> Result<Self, ScanError> {
        Ok(Self {
            source,
            stable: Target {
                url: urls.stable,
                selector: parse_selector(Channel::Stable.selector())?,
            },
            prerelease: Target {
                url: urls.prerelease,
                selector: parse_selector(Channel::Prerelease.selector())?,
            },
        })
    }

    pub fn url(&self, channel: Channel) -> &str {
        &self.target(channel).url
    }

    /// Fetch the channel's listing page and return the highest version linked.
    ///
    /// A page without any matching version yields [`Version::zero`]; only
    /// fetch failures and malformed candidates are errors.
    pub async fn scan(&self, channel: Channel) -> Result<Version, ScanError> {
        let target = self.target(channel);
        let body = self.source.fetch(&target.url).await?;

        let version = latest_in_page(&body, &target.selector)?;

        if version.is_zero() {
            info!("No {} version found at {}", channel, target.url);
        } else {
            debug!("Latest {} version at {}: {}", channel, target.url, version);
        }

        Ok(version)
    }

    fn target(&self, channel: Channel) -> &Target {
        match channel {
            Channel::Stable => &self.stable,
            Channel::Prerelease => &self.prerelease,
        }
    }
}

/// Highest version among the links of `body` matching `selector`.
pub fn latest_in_page(body: &str, selector: &Selector) -> Result<Version, ScanError> {
    let document = Html::parse_document(body);
    Ok(track_max(hrefs(&document, selector))?)
}
