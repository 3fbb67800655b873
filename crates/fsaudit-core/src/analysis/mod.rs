/// Analysis modules — post-scan algorithms over the record collection.

pub mod categories;
pub mod large_files;
pub mod permissions;

pub use categories::{size_by_category, CategoryTotals};
pub use large_files::{find_large, DEFAULT_THRESHOLD_MB};
pub use permissions::{assess, evaluate, RiskFinding, RiskTag};
