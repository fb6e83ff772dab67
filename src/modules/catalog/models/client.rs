// Client reference data
//
// Clients are owned by the bookkeeping service. The invoicing core only reads
// them from a catalog snapshot and refers to them by id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Client identifier assigned by the bookkeeping service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Postal address of a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
}

/// A billable client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "_id", alias = "id")]
    pub id: ClientId,

    pub name: String,

    /// Tax-registration number (GSTIN)
    #[serde(default)]
    pub gstin: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub address: Address,
}

impl Client {
    /// Label used in selection lists, e.g. `Acme Traders (29ABCDE1234F1Z5)`
    pub fn display_label(&self) -> String {
        if self.gstin.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.gstin)
        }
    }
}
