//! Message-ID lookup services and their URL templates
//!
//! A template is a URL with a single `%s` where the bracket-stripped
//! Message-ID goes. public-inbox.org is the default: when it does not know a
//! Message-ID it links to the other services listed here.

use crate::error::TemplateError;
use std::fmt;

/// Placeholder replaced by the Message-ID
pub const PLACEHOLDER: &str = "%s";

/// Default fallback template
pub const PUBLIC_INBOX_TEMPLATE: &str = "https://public-inbox.org/git/%s";

/// Strip exactly one leading `<` and one trailing `>` from a Message-ID
///
/// ```
/// use gmane_rescue::strip_brackets;
///
/// assert_eq!(strip_brackets("<abc@example.com>"), "abc@example.com");
/// assert_eq!(strip_brackets("<<odd>>"), "<odd>");
/// assert_eq!(strip_brackets("bare@example.com"), "bare@example.com");
/// ```
pub fn strip_brackets(message_id: &str) -> &str {
    let id = message_id.strip_prefix('<').unwrap_or(message_id);
    id.strip_suffix('>').unwrap_or(id)
}

/// A URL template with exactly one `%s` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    /// Validate and wrap a template string
    pub fn new(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        if template.matches(PLACEHOLDER).count() != 1 {
            return Err(TemplateError(template));
        }
        Ok(Self(template))
    }

    /// Substitute a Message-ID (brackets optional) into the template
    pub fn fill(&self, message_id: &str) -> String {
        self.0.replacen(PLACEHOLDER, strip_brackets(message_id), 1)
    }

    /// Recover the Message-ID from a URL produced by [`fill`](Self::fill)
    pub fn extract<'a>(&self, url: &'a str) -> Option<&'a str> {
        let (prefix, suffix) = self.0.split_once(PLACEHOLDER)?;
        url.strip_prefix(prefix)?.strip_suffix(suffix)
    }

    /// The raw template string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UrlTemplate {
    fn default() -> Self {
        LookupService::PublicInbox.template()
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for UrlTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Services that offer lookup by Message-ID
///
/// See <https://en.wikipedia.org/wiki/Message-ID> for the wider list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LookupService {
    /// public-inbox.org (git list archive)
    #[default]
    PublicInbox,
    /// mail-archive.com
    MailArchive,
    /// marc.info
    Marc,
    /// FreeBSD mailing list archive
    Freebsd,
    /// Debian mailing list archive
    Debian,
    /// DebConf lurker archive
    Debconf,
    /// W3C mailing list archive
    W3,
    /// PostgreSQL mailing list archive
    Postgresql,
    /// olduse.net Usenet archive
    Olduse,
    /// Howard Knight's Usenet search
    HowardKnight,
}

impl LookupService {
    /// Template string for this service
    pub fn template_str(self) -> &'static str {
        match self {
            LookupService::PublicInbox => PUBLIC_INBOX_TEMPLATE,
            LookupService::MailArchive => "http://mid.mail-archive.com/%s",
            LookupService::Marc => "https://marc.info/?i=%s",
            LookupService::Freebsd => "https://www.freebsd.org/cgi/mid.cgi?db=mid&id=%s",
            LookupService::Debian => "https://lists.debian.org/msgid-search/%s",
            LookupService::Debconf => {
                "http://lists.debconf.org/cgi-lurker/keyword.cgi?doc-url=/lurker&format=en.html&query=id:%s"
            }
            LookupService::W3 => "https://www.w3.org/mid/%s",
            LookupService::Postgresql => "http://www.postgresql.org/message-id/%s",
            LookupService::Olduse => "http://article.olduse.net/%s",
            LookupService::HowardKnight => {
                "http://al.howardknight.net/msgid.cgi?STYPE=msgid&A=0&MSGI=<%s>"
            }
        }
    }

    /// Validated template for this service
    pub fn template(self) -> UrlTemplate {
        UrlTemplate(self.template_str().to_string())
    }
}
