//! Typed wrappers over the remote routes.
//!
//! Each wrapper builds the path, query and body, runs the call through
//! [`ApiClient::execute`](crate::ApiClient::execute), decodes the envelope and
//! turns a non-success business code into [`Error::Business`]. Business
//! errors carry the route and a rendering of the request in their
//! [`ErrorContext`].
//!
//! ```rust,no_run
//! use wujie_sdk::api::Caller;
//! use wujie_sdk::{ApiClient, CallContext};
//!
//! # async fn run() -> wujie_sdk::Result<()> {
//! let caller = Caller::new(ApiClient::builder().build()?);
//! let balance = caller.available_integral_balance(&CallContext::new()).await?;
//! println!("points left: {}", balance);
//! # Ok(())
//! # }
//! ```

pub mod types;

pub use types::*;

use types::{GeneratingInfoList, StyleModelList};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::{ApiClient, CallContext};
use crate::response::decode_data;
use crate::router::Router;
use crate::transport::ApiResponse;
use crate::{Error, ErrorContext, Result};

/// Typed entry point. Cloning shares the underlying client.
#[derive(Debug, Clone)]
pub struct Caller {
    client: ApiClient,
}

impl Caller {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Points currently available to the application.
    pub async fn available_integral_balance(&self, ctx: &CallContext) -> Result<i64> {
        let route = Router::AvailableIntegralBalance;
        let resp = self.client.get(route.path(), &[], ctx).await?;
        let data: Option<Balance> = decode_data(&resp, route_context(route))?;
        Ok(require(data, &resp)?.balance)
    }

    pub async fn exchange_point(&self, req: &ExchangePointRequest, ctx: &CallContext) -> Result<()> {
        self.post::<_, serde_json::Value>(Router::ExchangePoint, req, ctx)
            .await
            .map(|_| ())
    }

    pub async fn model_base_infos(&self, ctx: &CallContext) -> Result<Vec<ModelBaseInfo>> {
        let route = Router::ModelBaseInfos;
        let resp = self.client.get(route.path(), &[], ctx).await?;
        let data: Option<Vec<ModelBaseInfo>> = decode_data(&resp, route_context(route))?;
        Ok(data.unwrap_or_default())
    }

    pub async fn default_resource_style_model(&self, ctx: &CallContext) -> Result<Vec<StyleModel>> {
        let route = Router::DefaultResourceStyleModel;
        let resp = self.client.get(route.path(), &[], ctx).await?;
        let data: Option<StyleModelList> = decode_data(&resp, route_context(route))?;
        Ok(data.unwrap_or_default().style_models)
    }

    /// Quote the point cost of a generation without starting it.
    pub async fn image_price_info(
        &self,
        req: &CreateImageRequest,
        ctx: &CallContext,
    ) -> Result<ImagePriceInfo> {
        let (data, resp) = self.post(Router::ImagePriceInfo, req, ctx).await?;
        require(data, &resp)
    }

    /// Queue a generation. Poll the returned keys with [`Caller::generating_info`].
    pub async fn create_image(
        &self,
        req: &CreateImageRequest,
        ctx: &CallContext,
    ) -> Result<CreateImageData> {
        let (data, resp) = self.post(Router::CreateImage, req, ctx).await?;
        require(data, &resp)
    }

    pub async fn generating_info(
        &self,
        req: &GeneratingInfoRequest,
        ctx: &CallContext,
    ) -> Result<Vec<ImageGeneratingInfo>> {
        let (data, _) = self
            .post::<_, GeneratingInfoList>(Router::GeneratingInfo, req, ctx)
            .await?;
        Ok(data.unwrap_or_default().list)
    }

    pub async fn image_info(&self, key: &str, ctx: &CallContext) -> Result<ImageInfo> {
        let route = Router::ImageInfo;
        let resp = self
            .client
            .get(route.path(), &[("key", key.to_string())], ctx)
            .await?;
        let data = decode_data(
            &resp,
            route_context(route).with_request(format!("key: {}", key)),
        )?;
        require(data, &resp)
    }

    /// Withdraw a queued job. Fails with code 20110011 once the job has left the queue.
    pub async fn cancel_image(&self, req: &CancelImageRequest, ctx: &CallContext) -> Result<String> {
        let (data, _) = self.post::<_, String>(Router::CancelImage, req, ctx).await?;
        Ok(data.unwrap_or_default())
    }

    async fn post<B, T>(
        &self,
        route: Router,
        body: &B,
        ctx: &CallContext,
    ) -> Result<(Option<T>, ApiResponse)>
    where
        B: Serialize + std::fmt::Debug,
        T: DeserializeOwned,
    {
        let resp = self.client.post_json(route.path(), body, ctx).await?;
        let data = decode_data(
            &resp,
            route_context(route).with_request(format!("{:?}", body)),
        )?;
        Ok((data, resp))
    }
}

fn route_context(route: Router) -> ErrorContext {
    ErrorContext::new().with_origin(route.path())
}

fn require<T>(data: Option<T>, resp: &ApiResponse) -> Result<T> {
    data.ok_or_else(|| Error::Decode {
        message: "successful response carried no data".to_string(),
        trace_id: resp.trace_id(),
    })
}
