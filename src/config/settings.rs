use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Base data directory; platform default when unset
    pub data_dir: Option<String>,
    /// Company keys loaded at startup; every company directory under the
    /// data directory when empty
    pub companies: Vec<String>,
    pub pdf: PdfSettings,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PdfSettings {
    pub currency_symbol: String,
    /// Replacement Typst template reading the same JSON data
    pub template: Option<String>,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "Rs. ".to_string(),
            template: None,
        }
    }
}
