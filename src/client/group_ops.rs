use crate::{NntpClient, Result, codes, commands, error::NntpError};
use tracing::debug;

impl NntpClient {
    /// Select a newsgroup
    ///
    /// Binds the session's current group, which article numbers passed to
    /// [`stat`](Self::stat) and [`fetch_article`](Self::fetch_article) are
    /// relative to.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - [`NntpError::NoSuchGroup`] - The newsgroup does not exist
    /// - [`NntpError::Protocol`] - Server returned an unexpected error
    /// - [`NntpError::InvalidResponse`] - Could not parse the server response
    pub async fn select_group(&mut self, newsgroup: &str) -> Result<commands::GroupInfo> {
        debug!("Selecting newsgroup: {}", newsgroup);

        self.send_command(&commands::group(newsgroup)).await?;
        let response = self.read_response().await?;

        if response.code == codes::NO_SUCH_GROUP {
            return Err(NntpError::NoSuchGroup(newsgroup.to_string()));
        }

        let info = commands::parse_group_response(response)?;
        self.current_group = Some(newsgroup.to_string());

        debug!(
            "Group {} selected: {} articles ({}-{})",
            info.name, info.count, info.first, info.last
        );
        Ok(info)
    }
}
