//! Subcommand implementations.

use anyhow::{Context, Result};

use seqsheet_ingest::{load_sheet, write_sheet_to};
use seqsheet_transform::{demux_sheet, merge, sheet_needs_demuxing};
use seqsheet_validate::validate;

use crate::cli::{DemuxArgs, MergeArgs, ValidateArgs};

/// Validate one sheet. Returns true when no Error-class finding was reported.
pub fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let (mut sheet, profile) = load_sheet(&args.sheet)
        .with_context(|| format!("failed to load {}", args.sheet.display()))?;
    tracing::info!(profile = profile.name, "validating sheet");
    Ok(validate(&mut sheet, profile))
}

pub fn run_merge(args: &MergeArgs) -> Result<()> {
    let (mut base, profile) = load_sheet(&args.base)
        .with_context(|| format!("failed to load {}", args.base.display()))?;

    let mut others = Vec::with_capacity(args.sheets.len());
    for path in &args.sheets {
        let (sheet, _) =
            load_sheet(path).with_context(|| format!("failed to load {}", path.display()))?;
        others.push(sheet);
    }

    merge(&mut base, &others)?;
    tracing::info!(
        profile = profile.name,
        samples = base.data.len(),
        "merged {} sheets",
        others.len() + 1
    );
    write_sheet_to(&base, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    Ok(())
}

pub fn run_demux(args: &DemuxArgs) -> Result<()> {
    let (sheet, _) = load_sheet(&args.sheet)
        .with_context(|| format!("failed to load {}", args.sheet.display()))?;

    if !sheet_needs_demuxing(&sheet)? {
        anyhow::bail!("{} does not contain plate replicates", args.sheet.display());
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;

    let stem = args
        .sheet
        .file_stem()
        .map_or_else(|| "sheet".to_string(), |s| s.to_string_lossy().to_string());
    for (index, child) in demux_sheet(&sheet)?.iter().enumerate() {
        let path = args.output_dir.join(format!("{stem}_r{}.csv", index + 1));
        write_sheet_to(child, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(samples = child.data.len(), "wrote {}", path.display());
    }
    Ok(())
}
