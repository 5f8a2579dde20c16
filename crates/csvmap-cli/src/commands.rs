use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use csvmap_cli::session::{ColumnMapper, MappingEdit};
use csvmap_ingest::{list_csv_files, read_csv_file};
use csvmap_map::{load_profile, save_profile};
use csvmap_model::FieldLabelTable;
use csvmap_submit::{HttpTransport, SubmitReceipt, SubmitSettings, render_payload};

use crate::cli::{HeadersArgs, MappingArgs, PreviewArgs, SubmitArgs};
use crate::summary::{print_fields, print_headers, print_preview, print_receipt};

pub fn run_fields() -> Result<()> {
    print_fields(&FieldLabelTable::STANDARD);
    Ok(())
}

pub fn run_headers(args: &HeadersArgs) -> Result<()> {
    let files = if args.path.is_dir() {
        list_csv_files(&args.path).context("list csv files")?
    } else {
        vec![args.path.clone()]
    };
    if files.is_empty() {
        println!("No CSV files found in {}", args.path.display());
        return Ok(());
    }
    for path in files {
        let table =
            read_csv_file(&path).with_context(|| format!("load {}", path.display()))?;
        print_headers(&path, &table);
    }
    Ok(())
}

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let span = info_span!("preview", file = %args.file.display());
    let _guard = span.enter();
    let mapper = build_session(&args.file, &args.mapping)?;
    let records = mapper.records();
    print_preview(&mapper, &records, args.limit);
    Ok(())
}

pub fn run_submit(args: &SubmitArgs) -> Result<Option<SubmitReceipt>> {
    let span = info_span!("submit", file = %args.file.display());
    let _guard = span.enter();
    let mapper = build_session(&args.file, &args.mapping)?;
    let settings = SubmitSettings::default()
        .with_endpoint(args.endpoint.as_str())
        .with_timeout_secs(args.timeout);

    if args.dry_run {
        let payload = mapper
            .payload()
            .map_err(|e| anyhow!("{} ({e})", e.user_message()))?;
        println!("{}", render_payload(&payload).context("render payload")?);
        return Ok(None);
    }

    let transport = HttpTransport::new(&settings).context("create http client")?;
    let receipt = mapper
        .submit(transport, &settings)
        .map_err(|e| anyhow!("{} ({e})", e.user_message()))?;
    print_receipt(&settings, &receipt);
    Ok(Some(receipt))
}

/// Load the file, then the profile, then the command-line edits, in that order.
fn build_session(file: &Path, args: &MappingArgs) -> Result<ColumnMapper> {
    let mut mapper = ColumnMapper::new();
    mapper
        .load_csv_file(file)
        .with_context(|| format!("load {}", file.display()))?;
    if let Some(path) = &args.mapping {
        let profile = load_profile(path).context("load mapping profile")?;
        mapper.replace_mapping(profile);
    }
    mapper
        .apply_all(&mapping_edits(args))
        .context("apply mapping")?;
    mapper.warn_stale_selections();

    if let Some(path) = &args.save_mapping {
        save_profile(path, mapper.mapping()).context("save mapping profile")?;
        info!(path = %path.display(), "mapping profile saved");
    }
    Ok(mapper)
}

/// Translate `--map` and `--custom` flags into discrete mapping actions.
pub fn mapping_edits(args: &MappingArgs) -> Vec<MappingEdit> {
    let selects = args.map.iter().map(|(field, header)| MappingEdit::Select {
        field: *field,
        header: header.clone(),
    });
    let customs = args.custom.iter().map(|(name, source)| MappingEdit::AddCustom {
        name: name.clone(),
        source: source.clone(),
    });
    selects.chain(customs).collect()
}
