use crate::error::{MazeError, Result};
use crate::grid::Marker;

/// One line per row of `0`/`1`. Path markers are written as passages.
pub fn encode(markers: &[Vec<Marker>]) -> String {
    let mut out = String::with_capacity(markers.len() * (markers.first().map_or(0, Vec::len) + 1));
    for row in markers {
        for marker in row {
            out.push(match marker {
                Marker::Wall => Marker::Wall.symbol(),
                Marker::Passage | Marker::Path => Marker::Passage.symbol(),
            });
        }
        out.push('\n');
    }
    out
}

pub fn decode(input: &str) -> Result<Vec<Vec<Marker>>> {
    let mut rows = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let row = line
            .chars()
            .enumerate()
            .map(|(j, ch)| match Marker::from_symbol(ch) {
                Some(marker @ (Marker::Wall | Marker::Passage)) => Ok(marker),
                _ => Err(MazeError::MalformedInput(format!(
                    "unexpected {:?} at line {}, column {}",
                    ch,
                    i + 1,
                    j + 1
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }
    let Some(width) = rows.first().map(Vec::len) else {
        return Err(MazeError::MalformedInput("file is empty".into()));
    };
    if let Some(i) = rows.iter().position(|r| r.len() != width) {
        return Err(MazeError::MalformedInput(format!(
            "line {} has {} symbols, expected {}",
            i + 1,
            rows[i].len(),
            width
        )));
    }
    Ok(rows)
}
