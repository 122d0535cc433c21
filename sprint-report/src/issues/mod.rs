//! Issues and the cache that owns them.
//!
//! Every issue seen during a run lives in one [`IssueCache`]. Hierarchy
//! links (epic, feature, children) are stored as [`IssueKey`]s and resolved
//! through the cache, so the graph has a single owner.

mod cache;
mod issue;
mod key;

pub use cache::IssueCache;
pub use issue::Issue;
pub use key::IssueKey;
