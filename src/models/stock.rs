use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Figure - a numeric field the service may send as a number or as text
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Figure {
    Number(f64),
    Text(String),
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Figure::Number(n) => write!(f, "{}", n),
            Figure::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// StockInfo - company metadata from `/stock-info`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInfo {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub market_cap: Option<Figure>,
    #[serde(default)]
    pub pe_ratio: Option<Figure>,
    #[serde(default)]
    pub about: Option<String>,
}
