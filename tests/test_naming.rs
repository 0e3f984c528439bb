//! Naming codec tests - sanitization, round-trips, and the cabinet table.

use deskctl::model::DocumentRecord;
use deskctl::naming::{
    CABINET_MAPPINGS, DocumentDescriptor, DriveCode, NamingError, cabinet_for, document_types,
    generate_filename, next_serial, parse_filename, sanitize_description,
};
use regex::Regex;

fn descriptor() -> DocumentDescriptor {
    DocumentDescriptor {
        client_code: "ABC".to_string(),
        drive: DriveCode::Accounting,
        cabinet_code: "A06".to_string(),
        serial: 7,
        description: "BANK_STATEMENT".to_string(),
        version: "1.0".to_string(),
        date: "2024-03-01".to_string(),
        extension: "pdf".to_string(),
    }
}

fn record(client: &str, cabinet: &str, serial: u32) -> DocumentRecord {
    DocumentRecord {
        client_code: client.to_string(),
        drive: DriveCode::Accounting,
        cabinet_code: cabinet.to_string(),
        serial,
        description: "X".to_string(),
        version: "1.0".to_string(),
        date: "2026-01-01".to_string(),
        extension: "pdf".to_string(),
        filename: String::new(),
    }
}

#[test]
fn test_sanitize_normalizes_mixed_input() {
    assert_eq!(
        sanitize_description("  Bank---Statement!! "),
        "BANK_STATEMENT"
    );
    assert_eq!(sanitize_description("vat return 2024 q1"), "VAT_RETURN_2024_Q1");
}

#[test]
fn test_sanitize_edge_inputs() {
    assert_eq!(sanitize_description(""), "");
    assert_eq!(sanitize_description("!!!???"), "");
    assert_eq!(sanitize_description("___"), "");
    assert_eq!(sanitize_description("a"), "A");
}

#[test]
fn test_sanitize_drops_non_ascii_letters() {
    // Accented and non-Latin letters fall outside the character set
    assert_eq!(sanitize_description("Résumé"), "R_SUM");
    assert_eq!(sanitize_description("факт"), "");
}

#[test]
fn test_sanitize_is_idempotent() {
    for input in [
        "  Bank---Statement!! ",
        "already_CLEAN_123",
        "a  b  c",
        "",
        "!!!",
        "Résumé 2024",
    ] {
        let once = sanitize_description(input);
        assert_eq!(sanitize_description(&once), once, "input: {input:?}");
    }
}

#[test]
fn test_sanitize_output_character_set() {
    let clean = Regex::new(r"^[A-Z0-9_]*$").unwrap();
    for input in ["Mixed Case 42", " _lead_trail_ ", "a--b__c  d"] {
        let out = sanitize_description(input);
        assert!(clean.is_match(&out), "output: {out:?}");
        assert!(!out.starts_with('_') && !out.ends_with('_'));
        assert!(!out.contains("__"));
    }
}

#[test]
fn test_generate_canonical_filename() {
    assert_eq!(
        generate_filename(&descriptor()).unwrap(),
        "ABC-F-A06-007-BANK_STATEMENT-V1.0-2024-03-01.pdf"
    );
}

#[test]
fn test_generate_sanitizes_description() {
    let mut d = descriptor();
    d.description = "bank statement".to_string();
    assert_eq!(
        generate_filename(&d).unwrap(),
        "ABC-F-A06-007-BANK_STATEMENT-V1.0-2024-03-01.pdf"
    );
}

#[test]
fn test_generate_coerces_zero_serial_to_one() {
    let mut d = descriptor();
    d.serial = 0;
    assert!(generate_filename(&d).unwrap().contains("-001-"));
}

#[test]
fn test_generate_rejects_serial_overflow() {
    let mut d = descriptor();
    d.serial = 1000;
    assert!(matches!(
        generate_filename(&d),
        Err(NamingError::SerialOverflow(1000))
    ));
    d.serial = 999;
    assert!(generate_filename(&d).unwrap().contains("-999-"));
}

#[test]
fn test_parse_round_trip() {
    let d = descriptor();
    let filename = generate_filename(&d).unwrap();
    let parsed = parse_filename(&filename).unwrap();
    assert_eq!(parsed, d);
    assert_eq!(parsed.serial, 7);
}

#[test]
fn test_parse_round_trip_archive_drive() {
    let d = DocumentDescriptor {
        client_code: "XY".to_string(),
        drive: DriveCode::Archive,
        cabinet_code: "B01".to_string(),
        serial: 12,
        description: "CERT_2024".to_string(),
        version: "2.1.3".to_string(),
        date: "2025-12-31".to_string(),
        extension: "tiff".to_string(),
    };
    let filename = generate_filename(&d).unwrap();
    assert_eq!(parse_filename(&filename).unwrap(), d);
}

#[test]
fn test_parse_multi_dot_extension_is_greedy() {
    let parsed = parse_filename("ABC-W-G01-002-CONTRACT-V1.0-2026-01-15.tar.gz").unwrap();
    assert_eq!(parsed.extension, "tar.gz");
    assert_eq!(parsed.serial, 2);
}

#[test]
fn test_parse_leading_zero_serial() {
    let parsed = parse_filename("ABC-F-A06-007-BANK_STATEMENT-V1.0-2024-03-01.pdf").unwrap();
    assert_eq!(parsed.serial, 7);
}

#[test]
fn test_parse_rejects_non_matching_names() {
    for name in [
        "not-a-valid-name.txt",
        "",
        "ABC-F-A06-007-BANK_STATEMENT-V1.0-2024-03-01",  // no extension
        "A-F-A06-007-X-V1.0-2024-03-01.pdf",             // client code too short
        "ABCD-F-A06-007-X-V1.0-2024-03-01.pdf",          // client code too long
        "ABC-Q-A06-007-X-V1.0-2024-03-01.pdf",           // unknown drive
        "ABC-F-A6-007-X-V1.0-2024-03-01.pdf",            // cabinet missing digit
        "ABC-F-A06-07-X-V1.0-2024-03-01.pdf",            // serial not 3 digits
        "ABC-F-A06-007-lower-V1.0-2024-03-01.pdf",       // lowercase description
        "ABC-F-A06-007-X-1.0-2024-03-01.pdf",            // missing V marker
        "ABC-F-A06-007-X-V1.0-2024-3-01.pdf",            // malformed date
    ] {
        assert!(parse_filename(name).is_none(), "should reject: {name}");
    }
}

#[test]
fn test_parse_date_shape_is_not_calendar_validated() {
    // The grammar checks shape only; calendar validity is the store's job
    let parsed = parse_filename("ABC-F-A06-001-X-V1.0-2024-13-99.pdf").unwrap();
    assert_eq!(parsed.date, "2024-13-99");
}

#[test]
fn test_cabinet_table_lookup() {
    let mapping = cabinet_for("bank-statement").unwrap();
    assert_eq!(mapping.cabinet_code, "A06");
    assert_eq!(mapping.drive, DriveCode::Accounting);
    assert!(cabinet_for("unknown-type").is_none());
}

#[test]
fn test_cabinet_table_is_well_formed() {
    let cabinet = Regex::new(r"^[A-Z]\d{2}$").unwrap();
    for mapping in CABINET_MAPPINGS {
        assert!(cabinet.is_match(mapping.cabinet_code), "{}", mapping.key);
        assert!(!mapping.display.is_empty());
    }
    // Keys are unique and document_types preserves table order
    let keys: Vec<_> = document_types().collect();
    assert_eq!(keys.len(), CABINET_MAPPINGS.len());
    let mut deduped = keys.clone();
    deduped.dedup();
    assert_eq!(keys.first().copied(), Some("bank-statement"));
    assert_eq!(deduped.len(), keys.len());
}

#[test]
fn test_next_serial_increments_max() {
    let docs = vec![
        record("ABC", "A06", 3),
        record("ABC", "A06", 7),
        record("ABC", "A06", 1),
    ];
    assert_eq!(next_serial("ABC", "A06", &docs), 8);
}

#[test]
fn test_next_serial_starts_at_one() {
    assert_eq!(next_serial("ABC", "A06", &[]), 1);
}

#[test]
fn test_next_serial_scopes_to_client_and_cabinet() {
    let docs = vec![
        record("ABC", "A06", 5),
        record("XYZ", "A06", 90), // other client
        record("ABC", "C01", 40), // other cabinet
    ];
    assert_eq!(next_serial("ABC", "A06", &docs), 6);
    assert_eq!(next_serial("XYZ", "A06", &docs), 91);
    assert_eq!(next_serial("XYZ", "C01", &docs), 1);
}
