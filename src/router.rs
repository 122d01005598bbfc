//! Remote routes, relative to [`DOMAIN`].

use std::fmt;

/// Production gateway of the Wujie open platform.
pub const DOMAIN: &str = "https://gate.wujiebantu.com/wj-open/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Router {
    // account
    AvailableIntegralBalance,
    ExchangePoint,
    // ai
    ModelBaseInfos,
    DefaultResourceStyleModel,
    DefaultResourceModel,
    ImagePriceInfo,
    CreateImage,
    GeneratingInfo,
    ImageInfo,
    SuperSize,
    // queue
    Accelerate,
    CancelImage,
    ImageModelQueueInfo,
    // pro
    CreateImagePro,
    GeneratingInfoPro,
}

impl Router {
    pub const ALL: [Router; 15] = [
        Router::AvailableIntegralBalance,
        Router::ExchangePoint,
        Router::ModelBaseInfos,
        Router::DefaultResourceStyleModel,
        Router::DefaultResourceModel,
        Router::ImagePriceInfo,
        Router::CreateImage,
        Router::GeneratingInfo,
        Router::ImageInfo,
        Router::SuperSize,
        Router::Accelerate,
        Router::CancelImage,
        Router::ImageModelQueueInfo,
        Router::CreateImagePro,
        Router::GeneratingInfoPro,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Router::AvailableIntegralBalance => "/account/availableIntegralBalance",
            Router::ExchangePoint => "/account/integral/exchange",
            Router::ModelBaseInfos => "/ai/model_base_infos",
            Router::DefaultResourceStyleModel => "/ai/default_resource_style_model",
            Router::DefaultResourceModel => "/ai/default_resource",
            Router::ImagePriceInfo => "/ai/price_info",
            Router::CreateImage => "/ai/create",
            Router::GeneratingInfo => "/ai/generating_info",
            Router::ImageInfo => "/ai/info",
            Router::SuperSize => "/ai/supersize",
            Router::Accelerate => "/ai/accelerate",
            Router::CancelImage => "/ai/cancel",
            Router::ImageModelQueueInfo => "/ai/model_info",
            Router::CreateImagePro => "/ai/pro/create",
            Router::GeneratingInfoPro => "/ai/pro/generating_info",
        }
    }
}

impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
