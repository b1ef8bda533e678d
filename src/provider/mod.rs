// ABOUTME: Deploy provider abstraction and its Netlify implementation.
// ABOUTME: Exports the traits the wait loops depend on plus the HTTP-backed clients.

mod netlify;
mod traits;
mod types;

pub use netlify::{DEFAULT_API_URL, DEFAULT_PREVIEW_DOMAIN, HttpProbe, NetlifyClient};
pub use traits::{DeployProvider, ProbeError, UrlProbe};
pub use types::{Deploy, READY_STATES};
