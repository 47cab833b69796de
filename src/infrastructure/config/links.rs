//! Link column configuration.

use serde::Deserialize;
use url::Url;

use crate::application::format::{DetectorStatusLink, LinkOptions, SearchLink};
use crate::error::{ConfigError, Result};

/// URL templates for the optional link columns.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Detector summary page, `{date}` and `{ifo}` are substituted.
    pub detector_status_url: String,
    /// Base URL of the event search page.
    pub search_url: String,
    /// Half-width in seconds of the searched time range.
    pub search_window: f64,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            detector_status_url: "https://ldas-jobs.ligo.caltech.edu/~detchar/summary/day/{date}/"
                .into(),
            search_url: "https://gracedb.ligo.org/search/".into(),
            search_window: 2.0,
        }
    }
}

impl LinksConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        let sample = self
            .detector_status_url
            .replace("{date}", "20150914")
            .replace("{ifo}", "H1");
        Url::parse(&sample).map_err(|e| ConfigError::InvalidValue {
            field: "detector_status_url",
            reason: e.to_string(),
        })?;
        self.search_base()?;
        if !self.search_window.is_finite() || self.search_window <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "search_window",
                reason: "must be a positive number of seconds".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn search_base(&self) -> Result<Url> {
        Url::parse(&self.search_url).map_err(|e| {
            ConfigError::InvalidValue {
                field: "search_url",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Link options for the columns the caller asked for.
    pub fn link_options(&self, detector_status: bool, search: bool) -> Result<LinkOptions> {
        Ok(LinkOptions {
            detector_status: detector_status.then(|| DetectorStatusLink {
                template: self.detector_status_url.clone(),
            }),
            search: if search {
                Some(SearchLink {
                    base: self.search_base()?,
                    window: self.search_window,
                })
            } else {
                None
            },
        })
    }
}
