//! Request and payload types for the typed routes.
//!
//! Payload structs keep the fields callers act on and tolerate anything else
//! the gateway adds. Request fields left as `None` or empty are not sent.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub balance: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExchangePointRequest {
    pub exchange_target_mobile: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelBaseInfo {
    #[serde(rename = "type", default)]
    pub model_type: i32,
    #[serde(default)]
    pub model_code: i32,
    #[serde(default)]
    pub model_version: String,
    #[serde(default)]
    pub model_desc: String,
    #[serde(rename = "controlnet_support", default)]
    pub control_net_support: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleModel {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub model_code: i32,
    #[serde(default)]
    pub sample_image_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StyleModelList {
    #[serde(rename = "style_model", default)]
    pub style_models: Vec<StyleModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFusion {
    pub key: String,
    pub weight: f64,
}

/// Parameters for `/ai/create` and `/ai/price_info`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateImageRequest {
    pub model: i32,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uc_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_image_similarity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_size_multiple: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefine_multiple: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub style: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub character: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub model_fusion: Vec<ModelFusion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
}

impl CreateImageRequest {
    pub fn new(model: i32, prompt: impl Into<String>) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateResult {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub expected_second: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateImageData {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub results: Vec<CreateResult>,
    #[serde(default)]
    pub expected_integral_cost: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntegralUse {
    #[serde(default)]
    pub integral_use_on_create: i64,
    #[serde(default)]
    pub integral_use_on_resolution: i64,
    #[serde(default)]
    pub integral_use_on_style_model: i64,
    #[serde(default)]
    pub integral_use_on_steps: i64,
    #[serde(default)]
    pub discount_integral: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagePriceInfo {
    #[serde(default)]
    pub integral_use: IntegralUse,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratingInfoRequest {
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FailMessage {
    #[serde(default)]
    pub fail_code: i64,
    #[serde(default)]
    pub fail_message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageGeneratingInfo {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub picture_url: String,
    #[serde(default)]
    pub expected_seconds: i64,
    #[serde(default)]
    pub complete_percent: f64,
    #[serde(default)]
    pub queue_before_num: i64,
    #[serde(default)]
    pub fail_message: FailMessage,
    #[serde(default)]
    pub integral_cost: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct GeneratingInfoList {
    #[serde(default)]
    pub list: Vec<ImageGeneratingInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub model: i32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub picture_url: String,
    #[serde(default)]
    pub mini_picture_url: String,
    #[serde(default)]
    pub seed: String,
    #[serde(default)]
    pub integral_cost: i64,
    #[serde(default)]
    pub fail_message: FailMessage,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelImageRequest {
    pub key: String,
}
