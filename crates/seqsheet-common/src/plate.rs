use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlateError {
    #[error("'{0}' is not a valid 384-well coordinate")]
    InvalidWell(String),
}

/// Map a 384-well coordinate (`A1`..`P24`) to its replicate quadrant (1..4)
/// and the corresponding 96-well coordinate.
///
/// Quadrants interleave: odd rows and odd columns form quadrant 1, odd rows
/// and even columns quadrant 2, even rows and odd columns quadrant 3, even
/// rows and even columns quadrant 4.
pub fn well_to_quadrant(well: &str) -> Result<(u8, String), PlateError> {
    let mut chars = well.chars();
    let row_letter = chars
        .next()
        .ok_or_else(|| PlateError::InvalidWell(well.to_string()))?
        .to_ascii_uppercase();
    if !('A'..='P').contains(&row_letter) {
        return Err(PlateError::InvalidWell(well.to_string()));
    }
    let column: u32 = chars
        .as_str()
        .parse()
        .map_err(|_| PlateError::InvalidWell(well.to_string()))?;
    if !(1..=24).contains(&column) {
        return Err(PlateError::InvalidWell(well.to_string()));
    }

    let row = row_letter as u32 - 'A' as u32;
    let col = column - 1;
    let quadrant = 1 + 2 * (row % 2) + (col % 2);
    let well96 = format!("{}{}", (b'A' + (row / 2) as u8) as char, col / 2 + 1);
    Ok((quadrant as u8, well96))
}
