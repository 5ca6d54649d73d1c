use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::cell_text;

/// One product line from a QC pre-dispatch report.
///
/// The relay itself hands rows back as raw JSON; this typed view is only used
/// where a fixed column layout is needed (terminal output).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(default)]
    pub variety: String,
    #[serde(default)]
    pub batch_code: String,
    #[serde(default)]
    pub mfg_date: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub mrp: String,
    #[serde(default)]
    pub defects_status: String,
    #[serde(default)]
    pub total_dispatch_ctn: String,
    #[serde(default)]
    pub party_name: String,
}

impl ProductRow {
    pub const FIELDS: [&'static str; 8] = [
        "variety",
        "batch_code",
        "mfg_date",
        "expiry_date",
        "mrp",
        "defects_status",
        "total_dispatch_ctn",
        "party_name",
    ];

    /// Lenient conversion: numbers and booleans are stringified, missing keys
    /// become empty strings. Non-object values yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let field = |name: &str| obj.get(name).map(cell_text).unwrap_or_default();
        Some(Self {
            variety: field("variety"),
            batch_code: field("batch_code"),
            mfg_date: field("mfg_date"),
            expiry_date: field("expiry_date"),
            mrp: field("mrp"),
            defects_status: field("defects_status"),
            total_dispatch_ctn: field("total_dispatch_ctn"),
            party_name: field("party_name"),
        })
    }

    pub fn cells(&self) -> [&str; 8] {
        [
            self.variety.as_str(),
            self.batch_code.as_str(),
            self.mfg_date.as_str(),
            self.expiry_date.as_str(),
            self.mrp.as_str(),
            self.defects_status.as_str(),
            self.total_dispatch_ctn.as_str(),
            self.party_name.as_str(),
        ]
    }
}
