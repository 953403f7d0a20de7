pub mod client;
pub mod extract;
pub mod route;

pub use client::{DEFAULT_UPSTREAM_URL, OrderClient, OrderRequest, UpstreamError};
pub use extract::{extract_username, extract_video_id};
pub use route::{OrderRoute, ROUTES, Target, find_route};
