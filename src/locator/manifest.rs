//! Web App Manifest 图标声明

use serde::Deserialize;
use url::Url;

use crate::error::FavResult;

/// manifest.json 中与图标相关的字段
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct WebAppManifest {
    #[serde(default)]
    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ManifestIcon {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub sizes: Option<String>,
    #[serde(default, rename = "type")]
    pub mime_type: Option<String>,
}

impl WebAppManifest {
    pub fn from_bytes(bytes: &[u8]) -> FavResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// 按声明顺序返回非空的图标引用
    pub fn icon_sources(&self) -> impl Iterator<Item = &str> {
        self.icons
            .iter()
            .map(|icon| icon.src.trim())
            .filter(|src| !src.is_empty())
    }
}

/// 未在页面中声明 manifest 时的默认位置
pub fn default_manifest_url(target: &Url) -> Url {
    crate::target::origin_path(target, "/manifest.json")
}
