//! Parsing of gmane archive URLs
//!
//! gmane served the same article under several hosts, all with the path
//! `/<group>/<article>[/<anything>]`:
//!
//! - `http://thread.gmane.org/gmane.comp.version-control.git/172703`
//! - `http://thread.gmane.org/gmane.comp.version-control.git/115562/focus=115563`
//! - `http://comments.gmane.org/gmane.mail.mutt.user/37352`
//! - `http://permalink.gmane.org/gmane.emacs.orgmode/5134`
//! - `http://article.gmane.org/gmane.comp.gnu.lilypond.devel/52628/match=cg+incomplete+docs`

use crate::error::RescueError;
use std::fmt;
use url::Url;

/// Substring the URL host must contain
pub const GMANE_DOMAIN: &str = "gmane.org";

/// Prefix every gmane-mirrored newsgroup name starts with
pub const GROUP_PREFIX: &str = "gmane.";

/// The newsgroup and article number a gmane URL points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmaneUrl {
    /// The URL as given
    pub url: String,
    /// Newsgroup name, e.g. "gmane.comp.version-control.git"
    pub group: String,
    /// Article number within `group`
    pub article: u64,
}

impl GmaneUrl {
    /// Extract group and article number from a gmane URL
    ///
    /// Anything after the article segment (`focus=`, `match=`, ...) is
    /// ignored. Nothing here touches the network.
    ///
    /// # Errors
    ///
    /// - [`RescueError::Url`] - Not a URL at all
    /// - [`RescueError::NotGmane`] - Host does not contain "gmane.org"
    /// - [`RescueError::BadGroup`] - First path segment missing or not "gmane.*"
    /// - [`RescueError::BadArticle`] - Second path segment missing or not a number
    pub fn parse(input: &str) -> Result<Self, RescueError> {
        let parsed = Url::parse(input).map_err(|source| RescueError::Url {
            url: input.to_string(),
            source,
        })?;

        let is_gmane = parsed
            .host_str()
            .is_some_and(|host| host.contains(GMANE_DOMAIN));
        if !is_gmane {
            return Err(RescueError::NotGmane(input.to_string()));
        }

        let mut segments = parsed.path_segments().into_iter().flatten();

        let group = segments
            .next()
            .filter(|group| group.starts_with(GROUP_PREFIX))
            .ok_or_else(|| RescueError::BadGroup(input.to_string()))?;

        let article = segments
            .next()
            .and_then(|article| article.parse::<u64>().ok())
            .ok_or_else(|| RescueError::BadArticle(input.to_string()))?;

        Ok(Self {
            url: input.to_string(),
            group: group.to_string(),
            article,
        })
    }

    /// Article number as sent in GROUP-relative commands
    pub fn article_id(&self) -> String {
        self.article.to_string()
    }
}

impl std::str::FromStr for GmaneUrl {
    type Err = RescueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GmaneUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.article)
    }
}
