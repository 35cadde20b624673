mod fetch;
mod parse;

pub use fetch::{CatalogClient, DEFAULT_ENDPOINT, DirectoryClient, REGION, SAFE_MODE};
pub use parse::{PageEnvelope, PodcastSummary, decode_page};
