//! Asset sources: a remote site origin over HTTP or a local document root

mod http;
mod local;

pub use http::HttpAssetSource;
pub use local::LocalAssetSource;
