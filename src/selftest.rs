//! Built-in sample URLs and the `--test` runner

use crate::client::NntpClient;
use crate::error::SelfTestError;
use crate::gmane::GmaneUrl;
use crate::rescue::Rescuer;
use crate::verify::{Verification, Verifier};
use std::io::Write;

/// A known gmane URL and what it should parse to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleUrl {
    /// The URL as it appears in the wild
    pub url: &'static str,
    /// Expected newsgroup
    pub group: &'static str,
    /// Expected article number
    pub article: u64,
}

/// One of each URL shape gmane used
pub const TEST_CASES: &[SampleUrl] = &[
    SampleUrl {
        url: "http://thread.gmane.org/gmane.comp.version-control.git/172703",
        group: "gmane.comp.version-control.git",
        article: 172703,
    },
    SampleUrl {
        url: "http://thread.gmane.org/gmane.comp.version-control.home-dir/474/focus%3D488",
        group: "gmane.comp.version-control.home-dir",
        article: 474,
    },
    SampleUrl {
        url: "http://thread.gmane.org/gmane.comp.version-control.git/115562/focus=115563",
        group: "gmane.comp.version-control.git",
        article: 115562,
    },
    SampleUrl {
        url: "http://comments.gmane.org/gmane.mail.mutt.user/37352",
        group: "gmane.mail.mutt.user",
        article: 37352,
    },
    SampleUrl {
        url: "http://permalink.gmane.org/gmane.emacs.orgmode/5134",
        group: "gmane.emacs.orgmode",
        article: 5134,
    },
    SampleUrl {
        url: "http://article.gmane.org/gmane.comp.gnu.lilypond.devel/52628/match=cg+incomplete+docs",
        group: "gmane.comp.gnu.lilypond.devel",
        article: 52628,
    },
    SampleUrl {
        url: "http://article.gmane.org/gmane.comp.version-control.git/54801/match%3Dguilt%2Bstgit",
        group: "gmane.comp.version-control.git",
        article: 54801,
    },
];

/// Outcome for one sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestResult {
    /// Sample URL
    pub url: &'static str,
    /// STAT status line
    pub status: String,
    /// Rescued lookup URL
    pub rescued: String,
    /// HTTP check, when a verifier was supplied
    pub verification: Option<Verification>,
}

/// Rescue every sample over one session, reporting to `out`
///
/// For each sample the report shows the URL, the STAT status line, the
/// rescued URL and, with a verifier, a note when the lookup service did not
/// simply find the message. NNTP and HTTP transport errors end the run.
pub async fn run_self_test(
    client: &mut NntpClient,
    rescuer: &Rescuer,
    verifier: Option<&Verifier>,
    cases: &[SampleUrl],
    out: &mut impl Write,
) -> Result<Vec<SelfTestResult>, SelfTestError> {
    let mut results = Vec::with_capacity(cases.len());

    for case in cases {
        writeln!(out, "testing {}", case.url)?;

        let url = GmaneUrl::parse(case.url)?;
        let (info, response) = rescuer.resolve(client, &url).await?;
        let rescued = rescuer.template().fill(&info.message_id);
        let status = response.status_line();

        writeln!(out, "   {}", status)?;
        writeln!(out, "   {}", rescued)?;

        let verification = match verifier {
            Some(verifier) => Some(verifier.check(&rescued).await?),
            None => None,
        };
        if let Some(note) = verification.as_ref().and_then(Verification::note) {
            writeln!(out, "{}", note)?;
        }

        results.push(SelfTestResult {
            url: case.url,
            status,
            rescued,
            verification,
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_parse_as_expected() {
        for case in TEST_CASES {
            let url = GmaneUrl::parse(case.url).unwrap();
            assert_eq!(url.group, case.group, "{}", case.url);
            assert_eq!(url.article, case.article, "{}", case.url);
        }
    }

    #[test]
    fn test_samples_cover_every_host() {
        for host in ["thread.", "comments.", "permalink.", "article."] {
            assert!(
                TEST_CASES.iter().any(|c| c.url.contains(host)),
                "no sample for {}",
                host
            );
        }
    }
}
