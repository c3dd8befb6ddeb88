use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use seqsheet_model::{KeyValues, Result, Sample, SampleSheet, SheetError, Table};
use seqsheet_profiles::{COLUMN_ALTS, Profile, profile_for_header};

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\[\]]+)\]$").expect("valid section pattern"));

/// The two header-row-then-data-rows project tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKind {
    Bioinformatics,
    Contact,
}

#[derive(Debug)]
enum State {
    Scanning,
    HeaderKv,
    ReadsList,
    SettingsKv,
    DataAwaitingHeader,
    DataRows,
    TableAwaitingHeader(TableKind),
    TableRows(TableKind),
    /// Index into `SampleSheet::extras`.
    OtherKv(usize),
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|field| field.trim().is_empty())
}

fn is_permitted(c: char) -> bool {
    c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn read_rows(text: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SheetError::Argument(format!("malformed csv: {e}")))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 1);
        // Spaces directly after a delimiter are layout, not content; strip
        // them from every field past the first, like a reader configured to
        // skip initial space would.
        rows.push((
            line,
            record
                .iter()
                .enumerate()
                .map(|(idx, field)| {
                    if idx == 0 {
                        field.to_string()
                    } else {
                        field.trim_start_matches(' ').to_string()
                    }
                })
                .collect(),
        ));
    }
    Ok(rows)
}

/// Parse a sectioned sample sheet document.
///
/// `[X]` marker rows switch sections; blank rows never change state. Leading
/// comment rows are dropped with a warning. Any character outside the
/// permitted ASCII set anywhere in a row aborts the parse.
pub fn parse_sheet(text: &str) -> Result<SampleSheet> {
    let mut sheet = SampleSheet::new();
    let mut state = State::Scanning;
    let mut seen_content = false;
    let mut stripped_comments = false;

    for (line, row) in read_rows(text)? {
        if is_blank(&row) {
            continue;
        }

        // Comments are only tolerated as a contiguous block before the first
        // section marker, and only with the `# ` marker; a bare `#` prefix is
        // a legitimate first field.
        if !seen_content && row[0].starts_with("# ") {
            stripped_comments = true;
            continue;
        }
        seen_content = true;

        let joined = row.concat();
        if joined.chars().any(|c| !is_permitted(c)) {
            return Err(SheetError::InvalidCharacters {
                line,
                content: row.join(","),
            });
        }

        if let Some(captures) = SECTION_RE.captures(&row[0]) {
            let name = captures.get(1).map_or("", |m| m.as_str());
            state = match name {
                "Header" => State::HeaderKv,
                "Reads" => State::ReadsList,
                "Settings" => State::SettingsKv,
                "Data" => State::DataAwaitingHeader,
                "Bioinformatics" => State::TableAwaitingHeader(TableKind::Bioinformatics),
                "Contact" => State::TableAwaitingHeader(TableKind::Contact),
                other => {
                    sheet.extras.push((other.to_string(), KeyValues::new()));
                    State::OtherKv(sheet.extras.len() - 1)
                }
            };
            continue;
        }

        match state {
            State::Scanning => {
                // Data before any section marker has nowhere to go.
                return Err(SheetError::MisplacedHeader(row.join(",")));
            }
            State::HeaderKv => {
                let value = row.get(1).cloned().unwrap_or_default();
                sheet.header.set(row[0].clone(), value);
            }
            State::SettingsKv => {
                let value = row.get(1).cloned().unwrap_or_default();
                sheet.settings.set(row[0].clone(), value);
            }
            State::OtherKv(idx) => {
                let value = row.get(1).cloned().unwrap_or_default();
                sheet.extras[idx].1.set(row[0].clone(), value);
            }
            State::ReadsList => {
                let cycles = row[0]
                    .parse::<u32>()
                    .map_err(|_| SheetError::InvalidReadCount {
                        line,
                        value: row[0].clone(),
                    })?;
                sheet.reads.push(cycles);
            }
            State::DataAwaitingHeader => {
                let mut columns = row.clone();
                while columns.last().is_some_and(String::is_empty) {
                    columns.pop();
                }
                if columns.iter().any(String::is_empty) {
                    return Err(SheetError::EmptyDataHeader {
                        fields: row.join(","),
                    });
                }
                for column in &mut columns {
                    if let Some(&(_, canonical)) =
                        COLUMN_ALTS.iter().find(|&&(alt, _)| alt == *column)
                    {
                        *column = canonical.to_string();
                    }
                }
                sheet.data.columns = columns;
                state = State::DataRows;
            }
            State::DataRows => {
                let sample: Sample = sheet
                    .data
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(idx, column)| {
                        (column.clone(), row.get(idx).cloned().unwrap_or_default())
                    })
                    .collect();
                sheet.data.push_sample(sample)?;
            }
            State::TableAwaitingHeader(kind) => {
                // Rows are padded to the widest section, so drop the padding
                // before fixing the column set.
                let columns: Vec<String> =
                    row.iter().filter(|f| !f.is_empty()).cloned().collect();
                let table = Table::new(columns);
                match kind {
                    TableKind::Bioinformatics => sheet.bioinformatics = Some(table),
                    TableKind::Contact => sheet.contact = Some(table),
                }
                state = State::TableRows(kind);
            }
            State::TableRows(kind) => {
                let table = match kind {
                    TableKind::Bioinformatics => sheet.bioinformatics.as_mut(),
                    TableKind::Contact => sheet.contact.as_mut(),
                };
                if let Some(table) = table {
                    table.push_row(row);
                }
            }
        }
    }

    if stripped_comments {
        tracing::warn!(
            "comments at the beginning of the sample sheet are not supported \
             and were ignored; use the Contact section instead"
        );
    }

    Ok(sheet)
}

/// Read only the `[Header]` section of a raw document, for profile lookup.
///
/// The first non-blank, non-comment row must be the `[Header]` marker.
pub fn sniff_header(text: &str) -> Result<KeyValues> {
    let mut header = KeyValues::new();
    let mut in_header = false;

    for (_, row) in read_rows(text)? {
        if is_blank(&row) || row[0].starts_with("# ") {
            continue;
        }
        let marker = SECTION_RE.captures(&row[0]);
        if !in_header {
            match marker {
                Some(captures) if captures.get(1).is_some_and(|m| m.as_str() == "Header") => {
                    in_header = true;
                    continue;
                }
                _ => return Err(SheetError::MisplacedHeader(row[0].clone())),
            }
        }
        if marker.is_some() {
            break;
        }
        let value = row.get(1).cloned().unwrap_or_default();
        header.set(row[0].clone(), value);
    }

    Ok(header)
}

/// Load a sheet from disk: sniff the header, select its profile, parse, and
/// silently canonicalize the Bioinformatics boolean columns.
pub fn load_sheet(path: &Path) -> Result<(SampleSheet, &'static Profile)> {
    let text = std::fs::read_to_string(path)?;
    load_sheet_from_str(&text).map_err(|err| match err {
        SheetError::UnrecognizedSheet(_) => {
            SheetError::UnrecognizedSheet(path.display().to_string())
        }
        other => other,
    })
}

/// In-memory equivalent of [`load_sheet`].
pub fn load_sheet_from_str(text: &str) -> Result<(SampleSheet, &'static Profile)> {
    let header = sniff_header(text)?;
    let profile = profile_for_header(&header)?;
    let mut sheet = parse_sheet(text)?;
    if let Some(bioinformatics) = sheet.bioinformatics.as_mut() {
        // Not validating here, just canonicalizing; messages are discarded.
        let _ = bioinformatics.normalize_boolean_columns(profile.bioinformatics_booleans);
    }
    Ok((sheet, profile))
}
