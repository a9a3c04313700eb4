//! Media viewer: dispatch page, streamed content endpoint, access token
//! cache, and the request filter guarding the content route.

mod content;
mod dispatch;
mod filter;
mod pages;
mod token_cache;

pub use content::media_content;
pub use dispatch::{dispatch_media, TOKEN_COOKIE_NAME};
pub use filter::media_request_filter;
pub use token_cache::TokenCache;
