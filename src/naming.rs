//! Canonical document filename codec and the cabinet reference table.
//!
//! A filed document's identity is encoded as
//! `{client}-{drive}-{cabinet}-{serial:03}-{DESCRIPTION}-V{version}-{date}.{ext}`,
//! e.g. `ABC-F-A06-007-BANK_STATEMENT-V1.0-2024-03-01.pdf`. Encoding and
//! parsing round-trip exactly, except that the description is normalized to
//! the `[A-Z0-9_]` character set on encode.

use crate::model::DocumentRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Top-level archive drive a document is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveCode {
    /// `F` — the accounting drive
    #[serde(rename = "F")]
    Accounting,
    /// `W` — the long-term archive drive
    #[serde(rename = "W")]
    Archive,
}

impl DriveCode {
    pub fn letter(self) -> char {
        match self {
            Self::Accounting => 'F',
            Self::Archive => 'W',
        }
    }

    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "F" => Some(Self::Accounting),
            "W" => Some(Self::Archive),
            _ => None,
        }
    }
}

impl fmt::Display for DriveCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Naming codec errors
#[derive(Debug, Error)]
pub enum NamingError {
    /// The serial field is fixed at 3 digits; 1000 and up are rejected
    /// rather than widened.
    #[error("serial number {0} does not fit the 3-digit filename field")]
    SerialOverflow(u32),
}

/// Structured identity of a filed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    /// 2-3 uppercase letters identifying the client
    pub client_code: String,
    pub drive: DriveCode,
    /// One uppercase letter + two digits, e.g. `A06`
    pub cabinet_code: String,
    /// Per-client-per-cabinet sequential counter; 0 is coerced to 1
    pub serial: u32,
    pub description: String,
    /// Digits and dots, e.g. `1.0`
    pub version: String,
    /// ISO calendar date, `YYYY-MM-DD`
    pub date: String,
    pub extension: String,
}

/// Normalize a free-text description for use in a filename.
///
/// Uppercases, maps every character outside `[A-Z0-9_]` to `_`, collapses
/// underscore runs, and strips leading/trailing underscores. Idempotent.
/// Non-ASCII letters are not transliterated; they fall outside the character
/// set and become `_` like any other symbol.
pub fn sanitize_description(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = false;
    for ch in text.chars() {
        let up = ch.to_ascii_uppercase();
        if up.is_ascii_uppercase() || up.is_ascii_digit() {
            out.push(up);
            run = false;
        } else if !run {
            out.push('_');
            run = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// Encode a descriptor into its canonical filename.
///
/// The description is sanitized on the way in; no other field is validated
/// here (the parser enforces the grammar on decode, and record validation
/// belongs to `check`).
pub fn generate_filename(descriptor: &DocumentDescriptor) -> Result<String, NamingError> {
    if descriptor.serial >= 1000 {
        return Err(NamingError::SerialOverflow(descriptor.serial));
    }
    let serial = descriptor.serial.max(1);
    Ok(format!(
        "{}-{}-{}-{:03}-{}-V{}-{}.{}",
        descriptor.client_code,
        descriptor.drive.letter(),
        descriptor.cabinet_code,
        serial,
        sanitize_description(&descriptor.description),
        descriptor.version,
        descriptor.date,
        descriptor.extension,
    ))
}

/// Anchored filename grammar. The extension capture is greedy: everything
/// after the date's dot belongs to the extension, further dots included.
static FILENAME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Z]{2,3})-([FW])-([A-Z]\d{2})-(\d{3})-([A-Z0-9_]+)-V([\d.]+)-(\d{4}-\d{2}-\d{2})\.(.+)$",
    )
    .ok()
});

/// Parse a canonical filename back into its descriptor.
///
/// Returns `None` when the name does not match the grammar; absence of a
/// match is a valid result, not an error.
pub fn parse_filename(filename: &str) -> Option<DocumentDescriptor> {
    let re = FILENAME_RE.as_ref()?;
    let caps = re.captures(filename)?;
    let field = |n: usize| caps.get(n).map(|m| m.as_str().to_string());

    Some(DocumentDescriptor {
        client_code: field(1)?,
        drive: DriveCode::from_letter(caps.get(2)?.as_str())?,
        cabinet_code: field(3)?,
        serial: caps.get(4)?.as_str().parse::<u32>().ok()?,
        description: field(5)?,
        version: field(6)?,
        date: field(7)?,
        extension: field(8)?,
    })
}

// =============================================================================
// Cabinet reference table
// =============================================================================

/// Static reference data: one entry per document-type category
#[derive(Debug, Clone, Copy)]
pub struct CabinetMapping {
    /// Kebab-case category key, e.g. `bank-statement`
    pub key: &'static str,
    pub display: &'static str,
    pub cabinet_code: &'static str,
    pub drive: DriveCode,
    pub description: &'static str,
}

/// The closed cabinet table, in filing-plan order. No runtime mutation.
pub static CABINET_MAPPINGS: &[CabinetMapping] = &[
    CabinetMapping {
        key: "bank-statement",
        display: "Bank statement",
        cabinet_code: "A06",
        drive: DriveCode::Accounting,
        description: "Monthly bank account statements",
    },
    CabinetMapping {
        key: "incorporation-certificate",
        display: "Certificate of incorporation",
        cabinet_code: "B01",
        drive: DriveCode::Archive,
        description: "Company registration certificates",
    },
    CabinetMapping {
        key: "articles-of-association",
        display: "Articles of association",
        cabinet_code: "B02",
        drive: DriveCode::Archive,
        description: "Founding articles and amendments",
    },
    CabinetMapping {
        key: "shareholder-register",
        display: "Shareholder register",
        cabinet_code: "B03",
        drive: DriveCode::Archive,
        description: "Share ownership records",
    },
    CabinetMapping {
        key: "board-minutes",
        display: "Board meeting minutes",
        cabinet_code: "B04",
        drive: DriveCode::Archive,
        description: "Minutes of board and general meetings",
    },
    CabinetMapping {
        key: "annual-report",
        display: "Annual report",
        cabinet_code: "C01",
        drive: DriveCode::Accounting,
        description: "Filed annual reports",
    },
    CabinetMapping {
        key: "financial-statements",
        display: "Financial statements",
        cabinet_code: "C02",
        drive: DriveCode::Accounting,
        description: "Balance sheets and income statements",
    },
    CabinetMapping {
        key: "tax-return",
        display: "Tax return",
        cabinet_code: "C04",
        drive: DriveCode::Accounting,
        description: "Corporate income tax filings",
    },
    CabinetMapping {
        key: "vat-return",
        display: "VAT return",
        cabinet_code: "C05",
        drive: DriveCode::Accounting,
        description: "Periodic VAT filings",
    },
    CabinetMapping {
        key: "payroll-report",
        display: "Payroll report",
        cabinet_code: "D01",
        drive: DriveCode::Accounting,
        description: "Payroll runs and employer filings",
    },
    CabinetMapping {
        key: "purchase-invoice",
        display: "Purchase invoice",
        cabinet_code: "E01",
        drive: DriveCode::Accounting,
        description: "Supplier invoices",
    },
    CabinetMapping {
        key: "sales-invoice",
        display: "Sales invoice",
        cabinet_code: "E02",
        drive: DriveCode::Accounting,
        description: "Issued customer invoices",
    },
    CabinetMapping {
        key: "contract",
        display: "Contract",
        cabinet_code: "G01",
        drive: DriveCode::Archive,
        description: "Signed agreements",
    },
    CabinetMapping {
        key: "power-of-attorney",
        display: "Power of attorney",
        cabinet_code: "G02",
        drive: DriveCode::Archive,
        description: "Authorizations and mandates",
    },
];

/// The category key set, in table order
pub fn document_types() -> impl Iterator<Item = &'static str> {
    CABINET_MAPPINGS.iter().map(|m| m.key)
}

/// Look up a cabinet mapping by category key
pub fn cabinet_for(key: &str) -> Option<&'static CabinetMapping> {
    CABINET_MAPPINGS.iter().find(|m| m.key == key)
}

/// Next free serial for a client+cabinet pair.
///
/// Filters the index by client and cabinet before taking the max, so callers
/// can hand over the whole document collection.
pub fn next_serial(client_code: &str, cabinet_code: &str, existing: &[DocumentRecord]) -> u32 {
    existing
        .iter()
        .filter(|d| d.client_code == client_code && d.cabinet_code == cabinet_code)
        .map(|d| d.serial)
        .max()
        .map_or(1, |max| max + 1)
}
