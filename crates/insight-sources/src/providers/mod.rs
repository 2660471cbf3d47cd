//! HTTP implementations of the source traits.

pub mod github;
pub mod hibp;
pub mod whop;

pub use github::GithubProfileScraper;
pub use hibp::HibpClient;
pub use whop::WhopDirectoryClient;
