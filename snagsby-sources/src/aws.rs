//! Shared AWS client configuration.

use aws_config::{BehaviorVersion, Region, SdkConfig};

use snagsby_core::SourceUrl;

/// Resolves the SDK configuration for one source, honoring its `region`
/// query option over the ambient default chain.
pub(crate) async fn sdk_config(url: &SourceUrl) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = url.region() {
        loader = loader.region(Region::new(region.to_owned()));
    }
    loader.load().await
}
