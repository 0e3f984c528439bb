//! Init and new-record command implementations.

use crate::cmd::NewTarget;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::model::{
    ActionKind, ActionSpec, DocumentRecord, EngagementContent, EngagementMeta, EngagementSpec,
    Party, StageSpec,
};
use crate::naming::{DocumentDescriptor, cabinet_for, generate_filename, next_serial};
use crate::parse::{find_engagement, load_documents, write_documents, write_engagement};
use crate::ui;
use crate::validate::is_valid_client_code;
use crate::write::{WriteOp, create_dir_all, write_file};
use chrono::NaiveDate;
use slug::slugify;

/// Initialize a desk tree
pub fn init_desk(config: &Config, force: bool, op: WriteOp) -> anyhow::Result<Vec<Diagnostic>> {
    let config_path = config.paths.desk_root.join("config.toml");

    if config_path.exists() && !force && !op.is_preview() {
        anyhow::bail!(
            "{} already exists (use -f to overwrite)",
            config_path.display()
        );
    }

    // Create directories first (config lives inside desk_root)
    let dirs = [&config.paths.desk_root, &config.engagements_dir()];
    for dir in dirs {
        create_dir_all(dir, op)?;
        if !op.is_preview() {
            ui::created_path(dir);
        }
    }

    write_file(&config_path, Config::default_toml(), op)?;
    if !op.is_preview() {
        ui::created_path(&config_path);
    }

    // Empty document index so `list documents` works from day one
    let documents_path = config.documents_path();
    if !documents_path.exists() || force {
        write_file(&documents_path, "", op)?;
        if !op.is_preview() {
            ui::created_path(&documents_path);
        }
    }

    if !op.is_preview() {
        ui::success("Desk initialized");
    }
    Ok(vec![])
}

/// Create a new record
pub fn create(
    config: &Config,
    target: &NewTarget,
    as_of: NaiveDate,
) -> anyhow::Result<Vec<Diagnostic>> {
    match target {
        NewTarget::Engagement {
            title,
            client,
            deadline,
            start,
            dry_run,
        } => create_engagement(
            config,
            title,
            client.as_deref(),
            deadline,
            *start,
            as_of,
            WriteOp::from_dry_run(*dry_run),
        ),
        NewTarget::Stage {
            engagement,
            name,
            owner,
            deadline,
            dry_run,
        } => create_stage(
            config,
            engagement,
            name,
            *owner,
            deadline,
            WriteOp::from_dry_run(*dry_run),
        ),
        NewTarget::Action {
            engagement,
            kind,
            deadline,
            document,
            dry_run,
        } => create_action(
            config,
            engagement,
            *kind,
            deadline,
            document.as_deref(),
            WriteOp::from_dry_run(*dry_run),
        ),
        NewTarget::Document {
            doc_type,
            client,
            description,
            version,
            date,
            extension,
            dry_run,
        } => create_document(
            config,
            doc_type,
            client.as_deref(),
            description,
            version,
            date.as_deref(),
            extension,
            as_of,
            WriteOp::from_dry_run(*dry_run),
        ),
    }
}

/// Resolve the client code from the flag or the config default
fn resolve_client_code(config: &Config, client: Option<&str>) -> anyhow::Result<String> {
    let code = client
        .map(str::to_string)
        .or_else(|| config.portal.default_client_code.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("No client code: pass --client or set portal.default_client_code")
        })?;

    if !is_valid_client_code(&code) {
        anyhow::bail!("Invalid client code: {code} (expected 2-3 uppercase letters)");
    }
    Ok(code)
}

/// Require a parsable ISO date argument
fn require_date(value: &str, what: &str) -> anyhow::Result<()> {
    if value.parse::<NaiveDate>().is_err() {
        anyhow::bail!("Invalid {what}: {value} (expected YYYY-MM-DD)");
    }
    Ok(())
}

/// Create a new engagement
fn create_engagement(
    config: &Config,
    title: &str,
    client: Option<&str>,
    deadline: &str,
    start: bool,
    as_of: NaiveDate,
    op: WriteOp,
) -> anyhow::Result<Vec<Diagnostic>> {
    let client_code = resolve_client_code(config, client)?;
    require_date(deadline, "deadline")?;

    let dir = config.engagements_dir();
    create_dir_all(&dir, op)?;

    let date = as_of.format("%Y-%m-%d").to_string();
    let slug = slugify(title);

    // Find next engagement ID by scanning existing IDs for the effective date
    let id_prefix = format!("ENG-{date}-");

    let max_seq = std::fs::read_dir(&dir)
        .into_iter()
        .flatten()
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            (path.extension()? == "toml").then_some(path)
        })
        .filter_map(|path| std::fs::read_to_string(&path).ok())
        .filter_map(|content| {
            content
                .lines()
                .find(|line| line.starts_with("id = \""))
                .and_then(|line| line.strip_prefix("id = \""))
                .and_then(|s| s.strip_suffix('"'))
                .and_then(|id| id.strip_prefix(&id_prefix))
                .and_then(|seq_str| seq_str.parse::<u32>().ok())
        })
        .max()
        .unwrap_or(0);

    let next_seq = max_seq + 1;
    let engagement_id = format!("ENG-{date}-{next_seq:03}");

    // Find unique filename (loop until no collision)
    let mut filename = format!("{date}-{slug}.toml");
    let mut path = dir.join(&filename);
    let mut suffix = next_seq;

    while !op.is_preview() && path.exists() {
        filename = format!("{date}-{slug}-{suffix:03}.toml");
        path = dir.join(&filename);
        suffix += 1;
    }

    let spec = EngagementSpec {
        deskctl: EngagementMeta {
            schema: 1,
            id: engagement_id.clone(),
            client_code,
            title: title.to_string(),
            started: start.then(|| date.clone()),
            deadline: deadline.to_string(),
            completed: false,
            completed_on: None,
        },
        content: EngagementContent {
            description: "Describe the engagement scope and the agreed deliverables.".to_string(),
            notes: vec![],
        },
        stages: vec![],
        actions: vec![],
    };

    write_engagement(&path, &spec, op)?;

    if !op.is_preview() {
        ui::created("engagement", &path);
        ui::sub_info(format!("ID: {engagement_id}"));
    }

    Ok(vec![])
}

/// Add a stage to an engagement
fn create_stage(
    config: &Config,
    engagement_id: &str,
    name: &str,
    owner: Party,
    deadline: &str,
    op: WriteOp,
) -> anyhow::Result<Vec<Diagnostic>> {
    require_date(deadline, "deadline")?;

    let mut entry = find_engagement(config, engagement_id)?;
    let next_no = entry.spec.stages.iter().map(|s| s.no).max().unwrap_or(0) + 1;

    entry.spec.stages.push(StageSpec {
        no: next_no,
        name: name.to_string(),
        owner,
        deadline: deadline.to_string(),
        completed: false,
        waiting_on_client: false,
        overdue_reason: None,
    });

    write_engagement(&entry.path, &entry.spec, op)?;

    if !op.is_preview() {
        ui::created("stage", &entry.path);
        ui::sub_info(format!("Reference: {engagement_id}:S{next_no}"));
    }

    Ok(vec![])
}

/// Add a client action to an engagement
fn create_action(
    config: &Config,
    engagement_id: &str,
    kind: ActionKind,
    deadline: &str,
    document: Option<&str>,
    op: WriteOp,
) -> anyhow::Result<Vec<Diagnostic>> {
    require_date(deadline, "deadline")?;

    let mut entry = find_engagement(config, engagement_id)?;
    let next_no = entry.spec.actions.iter().map(|a| a.no).max().unwrap_or(0) + 1;

    entry.spec.actions.push(ActionSpec {
        no: next_no,
        kind,
        document: document.map(str::to_string),
        deadline: deadline.to_string(),
        submitted: false,
        submitted_on: None,
        fault: None,
    });

    write_engagement(&entry.path, &entry.spec, op)?;

    if !op.is_preview() {
        ui::created("client action", &entry.path);
        ui::sub_info(format!("Reference: {engagement_id}:A{next_no}"));
    }

    Ok(vec![])
}

/// File a new document into the index
#[allow(clippy::too_many_arguments)]
fn create_document(
    config: &Config,
    doc_type: &str,
    client: Option<&str>,
    description: &str,
    version: &str,
    date: Option<&str>,
    extension: &str,
    as_of: NaiveDate,
    op: WriteOp,
) -> anyhow::Result<Vec<Diagnostic>> {
    let mapping = cabinet_for(doc_type).ok_or_else(|| {
        Diagnostic::new(
            DiagnosticCode::E0401DocumentTypeUnknown,
            format!("Unknown document type: {doc_type} (see `deskctl list cabinets`)"),
            doc_type,
        )
    })?;

    let client_code = resolve_client_code(config, client)?;
    let date = match date {
        Some(d) => {
            require_date(d, "date")?;
            d.to_string()
        }
        None => as_of.format("%Y-%m-%d").to_string(),
    };

    let mut documents = load_documents(config)?;
    let serial = next_serial(&client_code, mapping.cabinet_code, &documents.documents);

    let descriptor = DocumentDescriptor {
        client_code: client_code.clone(),
        drive: mapping.drive,
        cabinet_code: mapping.cabinet_code.to_string(),
        serial,
        description: description.to_string(),
        version: version.to_string(),
        date: date.clone(),
        extension: extension.to_string(),
    };

    let filename = generate_filename(&descriptor).map_err(|e| {
        Diagnostic::new(
            DiagnosticCode::E0402DocumentSerialOverflow,
            e.to_string(),
            "desk/documents.toml",
        )
    })?;

    documents.documents.push(DocumentRecord {
        client_code,
        drive: mapping.drive,
        cabinet_code: mapping.cabinet_code.to_string(),
        serial,
        // The record stores the normalized form so the index round-trips
        description: crate::naming::sanitize_description(description),
        version: version.to_string(),
        date,
        extension: extension.to_string(),
        filename: filename.clone(),
    });

    write_documents(config, &documents, op)?;

    if !op.is_preview() {
        ui::filed(doc_type, &filename);
        ui::sub_info(format!("Cabinet: {} ({}), serial {serial:03}", mapping.cabinet_code, mapping.display));
    }

    Ok(vec![])
}
