//! Resolve a gmane URL to a lookup-service URL or to the article itself

use crate::client::NntpClient;
use crate::commands::ArticleInfo;
use crate::error::RescueError;
use crate::gmane::GmaneUrl;
use crate::response::NntpResponse;
use crate::template::UrlTemplate;
use std::fmt;
use tracing::debug;

/// What to produce for a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// A working URL on the lookup service
    #[default]
    RescueUrl,
    /// The full article text
    FetchArticle,
}

/// Result of rescuing one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rescued {
    /// Template filled with the bracket-stripped Message-ID
    Url(String),
    /// Article lines joined with `\n`
    Article(String),
}

impl Rescued {
    /// The output text, whichever kind it is
    pub fn as_str(&self) -> &str {
        match self {
            Rescued::Url(s) | Rescued::Article(s) => s,
        }
    }
}

impl fmt::Display for Rescued {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns gmane URLs into lookup URLs or article text over one NNTP session
#[derive(Debug, Clone, Default)]
pub struct Rescuer {
    template: UrlTemplate,
}

impl Rescuer {
    /// Rescuer filling `template`
    pub fn new(template: UrlTemplate) -> Self {
        Self { template }
    }

    /// Template rescued URLs are built from
    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    /// Select the URL's group and STAT its article
    ///
    /// Returns the article's info along with the raw STAT response.
    pub async fn resolve(
        &self,
        client: &mut NntpClient,
        url: &GmaneUrl,
    ) -> Result<(ArticleInfo, NntpResponse), RescueError> {
        client.select_group(&url.group).await?;
        let (info, response) = client.stat_with_response(&url.article_id()).await?;
        debug!("{} is {}", url, info.message_id);
        Ok((info, response))
    }

    /// Rescue an already parsed URL
    ///
    /// Two round-trips: GROUP, then STAT or ARTICLE depending on `mode`.
    /// Server errors are returned as [`RescueError::Nntp`] unchanged.
    pub async fn rescue(
        &self,
        client: &mut NntpClient,
        url: &GmaneUrl,
        mode: Mode,
    ) -> Result<Rescued, RescueError> {
        match mode {
            Mode::RescueUrl => {
                let (info, _) = self.resolve(client, url).await?;
                Ok(Rescued::Url(self.template.fill(&info.message_id)))
            }
            Mode::FetchArticle => {
                client.select_group(&url.group).await?;
                let article = client.fetch_article(&url.article_id()).await?;
                debug!(
                    "{} is {} ({} lines)",
                    url,
                    article.message_id,
                    article.lines.len()
                );
                Ok(Rescued::Article(article.text()))
            }
        }
    }

    /// Parse and rescue a URL string
    ///
    /// The URL is validated before anything is sent to the server.
    pub async fn rescue_str(
        &self,
        client: &mut NntpClient,
        url: &str,
        mode: Mode,
    ) -> Result<Rescued, RescueError> {
        let url = GmaneUrl::parse(url)?;
        self.rescue(client, &url, mode).await
    }
}
