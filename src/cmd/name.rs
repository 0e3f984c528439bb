//! Name command implementation: the codec surface, store-free.

use crate::cmd::NameTarget;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::naming::{DocumentDescriptor, cabinet_for, generate_filename, parse_filename};

/// Generate or parse canonical document filenames
pub fn name(target: &NameTarget) -> anyhow::Result<Vec<Diagnostic>> {
    match target {
        NameTarget::Generate {
            client,
            doc_type,
            serial,
            description,
            version,
            date,
            extension,
        } => generate(client, doc_type, *serial, description, version, date, extension),
        NameTarget::Parse { filename } => parse(filename),
    }
}

fn generate(
    client: &str,
    doc_type: &str,
    serial: u32,
    description: &str,
    version: &str,
    date: &str,
    extension: &str,
) -> anyhow::Result<Vec<Diagnostic>> {
    let mapping = cabinet_for(doc_type).ok_or_else(|| {
        Diagnostic::new(
            DiagnosticCode::E0401DocumentTypeUnknown,
            format!("Unknown document type: {doc_type} (see `deskctl list cabinets`)"),
            doc_type,
        )
    })?;

    let descriptor = DocumentDescriptor {
        client_code: client.to_string(),
        drive: mapping.drive,
        cabinet_code: mapping.cabinet_code.to_string(),
        serial,
        description: description.to_string(),
        version: version.to_string(),
        date: date.to_string(),
        extension: extension.to_string(),
    };

    let filename = generate_filename(&descriptor).map_err(|e| {
        Diagnostic::new(DiagnosticCode::E0402DocumentSerialOverflow, e.to_string(), doc_type)
    })?;

    println!("{filename}");
    Ok(vec![])
}

fn parse(filename: &str) -> anyhow::Result<Vec<Diagnostic>> {
    // No match is a defined absence; report it as a diagnostic, not a crash
    let Some(descriptor) = parse_filename(filename) else {
        return Ok(vec![Diagnostic::new(
            DiagnosticCode::E0404DocumentFilenameInvalid,
            "Filename does not match the naming grammar",
            filename,
        )]);
    };

    println!("client:      {}", descriptor.client_code);
    println!("drive:       {}", descriptor.drive);
    println!("cabinet:     {}", descriptor.cabinet_code);
    println!("serial:      {}", descriptor.serial);
    println!("description: {}", descriptor.description);
    println!("version:     {}", descriptor.version);
    println!("date:        {}", descriptor.date);
    println!("extension:   {}", descriptor.extension);

    Ok(vec![])
}
