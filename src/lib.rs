#![doc = include_str!("../README.md")]

mod client;
/// NNTP command builders and response parsers
pub mod commands;
mod config;
mod error;
/// Parsing of gmane archive URLs
pub mod gmane;
mod rescue;
mod response;
/// Built-in sample URLs and the self-test runner
pub mod selftest;
/// Message-ID lookup services and URL templates
pub mod template;
/// HTTP verification of rescued URLs
pub mod verify;

pub use client::{NntpClient, NntpStream};
pub use commands::{Article, ArticleInfo, GroupInfo};
pub use config::{GMANE_NEWS_HOST, NNTP_PORT, NNTPS_PORT, ServerConfig};
pub use error::{NntpError, RescueError, Result, SelfTestError, TemplateError, VerifyError};
pub use gmane::GmaneUrl;
pub use rescue::{Mode, Rescued, Rescuer};
pub use response::{NntpResponse, codes};
pub use selftest::{SampleUrl, SelfTestResult, TEST_CASES, run_self_test};
pub use template::{LookupService, UrlTemplate, strip_brackets};
pub use verify::{Verification, Verifier};
