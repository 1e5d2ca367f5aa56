//! Code lists used in requests and documents.
//!
//! Each enum maps to the literal code string the API expects. The
//! documents themselves carry plain strings, so codes missing here can
//! still be sent.

use serde::{Deserialize, Serialize};

/// Integrator (special integrator / private integrator) the account is
/// registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Integrator {
    #[serde(rename = "UYM")]
    Uym,
    #[serde(rename = "UYK")]
    Uyk,
    #[serde(rename = "IZI")]
    Izi,
    #[serde(rename = "DGN")]
    Dgn,
    #[serde(rename = "MYS")]
    Mys,
}

impl Integrator {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Uym => "UYM",
            Self::Uyk => "UYK",
            Self::Izi => "IZI",
            Self::Dgn => "DGN",
            Self::Mys => "MYS",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "UYM" => Some(Self::Uym),
            "UYK" => Some(Self::Uyk),
            "IZI" => Some(Self::Izi),
            "DGN" => Some(Self::Dgn),
            "MYS" => Some(Self::Mys),
            _ => None,
        }
    }
}

/// Invoice type code (`InvoiceTypeCode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceTypeCode {
    /// SATIS — sale.
    #[serde(rename = "SATIS")]
    Sale,
    /// IADE — return.
    #[serde(rename = "IADE")]
    Return,
    /// ISTISNA — VAT exempt.
    #[serde(rename = "ISTISNA")]
    Exempt,
    /// TEVKIFAT — withholding.
    #[serde(rename = "TEVKIFAT")]
    Withholding,
    /// IHRACKAYITLI — export registered.
    #[serde(rename = "IHRACKAYITLI")]
    ExportRegistered,
    /// OZELMATRAH — special base.
    #[serde(rename = "OZELMATRAH")]
    SpecialBase,
}

impl InvoiceTypeCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sale => "SATIS",
            Self::Return => "IADE",
            Self::Exempt => "ISTISNA",
            Self::Withholding => "TEVKIFAT",
            Self::ExportRegistered => "IHRACKAYITLI",
            Self::SpecialBase => "OZELMATRAH",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SATIS" => Some(Self::Sale),
            "IADE" => Some(Self::Return),
            "ISTISNA" => Some(Self::Exempt),
            "TEVKIFAT" => Some(Self::Withholding),
            "IHRACKAYITLI" => Some(Self::ExportRegistered),
            "OZELMATRAH" => Some(Self::SpecialBase),
            _ => None,
        }
    }
}

/// Scenario profile (`ProfileId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileId {
    /// TEMELFATURA — basic invoice, no acceptance step.
    #[serde(rename = "TEMELFATURA")]
    Basic,
    /// TICARIFATURA — commercial invoice, buyer may accept or reject.
    #[serde(rename = "TICARIFATURA")]
    Commercial,
    /// EARSIVFATURA — e-archive invoice.
    #[serde(rename = "EARSIVFATURA")]
    Archive,
    /// IHRACAT — export.
    #[serde(rename = "IHRACAT")]
    Export,
    /// YOLCUBERABERFATURA — tax-free passenger invoice.
    #[serde(rename = "YOLCUBERABERFATURA")]
    Passenger,
}

impl ProfileId {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Basic => "TEMELFATURA",
            Self::Commercial => "TICARIFATURA",
            Self::Archive => "EARSIVFATURA",
            Self::Export => "IHRACAT",
            Self::Passenger => "YOLCUBERABERFATURA",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TEMELFATURA" => Some(Self::Basic),
            "TICARIFATURA" => Some(Self::Commercial),
            "EARSIVFATURA" => Some(Self::Archive),
            "IHRACAT" => Some(Self::Export),
            "YOLCUBERABERFATURA" => Some(Self::Passenger),
            _ => None,
        }
    }
}

/// Delivery channel for an e-archive invoice (`ArchiveInfo.SendType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SendType {
    /// KAGIT — printed and delivered on paper.
    #[default]
    #[serde(rename = "KAGIT")]
    Paper,
    /// ELEKTRONIK — delivered electronically.
    #[serde(rename = "ELEKTRONIK")]
    Electronic,
}

impl SendType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Paper => "KAGIT",
            Self::Electronic => "ELEKTRONIK",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KAGIT" => Some(Self::Paper),
            "ELEKTRONIK" => Some(Self::Electronic),
            _ => None,
        }
    }
}

/// Answer to a commercial invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    #[serde(rename = "KABUL")]
    Accept,
    #[serde(rename = "RED")]
    Reject,
}

impl ResponseType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Accept => "KABUL",
            Self::Reject => "RED",
        }
    }
}

/// VAT (KDV) tax code.
pub const TAX_CODE_VAT: &str = "0015";
