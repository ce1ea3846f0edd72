//! Article lookup commands (RFC 3977 §6.2)
//!
//! - ARTICLE - Fetch full article (headers + body)
//! - STAT - Resolve an article to its message-id without retrieving content

use crate::{NntpError, NntpResponse, Result, commands, response::codes};
use tracing::trace;

use super::NntpClient;

/// Map the "no such article / no group" codes shared by ARTICLE and STAT
fn lookup_error(id: &str, response: &NntpResponse) -> Option<NntpError> {
    match response.code {
        codes::NO_SUCH_ARTICLE_ID | codes::NO_SUCH_ARTICLE_NUMBER => {
            Some(NntpError::NoSuchArticle(id.to_string()))
        }
        codes::NO_GROUP_SELECTED => Some(NntpError::NoGroupSelected),
        _ => None,
    }
}

impl NntpClient {
    /// Fetch article by number (in the current group) or message-id
    ///
    /// Returns the full article, headers and body, one entry per line.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::NoSuchArticle`] - The article does not exist (423/430)
    /// - [`NntpError::NoGroupSelected`] - A number was given before GROUP (412)
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::Timeout`] - Server did not respond in time
    pub async fn fetch_article(&mut self, id: &str) -> Result<commands::Article> {
        trace!("Fetching article: {}", id);

        self.send_command(&commands::article(id)).await?;
        let response = self.read_multiline_response().await?;

        if let Some(err) = lookup_error(id, &response) {
            return Err(err);
        }

        commands::parse_article_response(response)
    }

    /// Check article status without retrieving content (RFC 3977 §6.2.4)
    ///
    /// Returns the article number and its bracketed message-id. The raw
    /// response is also returned so callers can show the status line.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::NoSuchArticle`] - The article does not exist (423/430)
    /// - [`NntpError::NoGroupSelected`] - A number was given before GROUP (412)
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::Timeout`] - Server did not respond in time
    pub async fn stat_with_response(
        &mut self,
        id: &str,
    ) -> Result<(commands::ArticleInfo, NntpResponse)> {
        trace!("Checking article status: {}", id);

        self.send_command(&commands::stat(id)).await?;
        let response = self.read_response().await?;

        if let Some(err) = lookup_error(id, &response) {
            return Err(err);
        }

        let info = commands::parse_stat_response(&response)?;
        Ok((info, response))
    }

    /// Check article status without retrieving content
    ///
    /// See [`stat_with_response`](Self::stat_with_response).
    pub async fn stat(&mut self, id: &str) -> Result<commands::ArticleInfo> {
        self.stat_with_response(id).await.map(|(info, _)| info)
    }
}
