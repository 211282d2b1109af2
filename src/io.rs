//! Parsing for the block-structured scanner report format.
//!
//! Each block names a scanner and lists one beacon per line:
//!
//! ```text
//! --- scanner 0 ---
//! 404,-588,-901
//! 528,-643,409
//!
//! --- scanner 1 ---
//! 686,422,578
//! ```
//!
//! Blocks are separated by blank lines or end of input. The coordinate
//! dimensionality is fixed by the const parameter; a tuple with any
//! other arity is malformed input, fatal before registration starts.

use crate::core::Point;
use crate::error::{RegistrationError, Result};
use crate::scanner::{Scanner, ScannerId};

/// Parse every scanner block from the input text.
pub fn parse_scanners<const N: usize>(input: &str) -> Result<Vec<Scanner<N>>> {
    let mut scanners = Vec::new();
    let mut current: Option<ScannerId> = None;
    let mut points: Vec<Point<N>> = Vec::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            flush(&mut scanners, &mut current, &mut points)?;
        } else if line.starts_with("---") {
            flush(&mut scanners, &mut current, &mut points)?;
            current = Some(parse_header(line)?);
        } else if current.is_some() {
            points.push(parse_point(line)?);
        } else {
            return Err(RegistrationError::MalformedInput(format!(
                "coordinates before any scanner header: {line:?}"
            )));
        }
    }
    flush(&mut scanners, &mut current, &mut points)?;
    Ok(scanners)
}

fn flush<const N: usize>(
    scanners: &mut Vec<Scanner<N>>,
    current: &mut Option<ScannerId>,
    points: &mut Vec<Point<N>>,
) -> Result<()> {
    if let Some(id) = current.take() {
        if points.is_empty() {
            return Err(RegistrationError::MalformedInput(format!(
                "scanner {id} reports no beacons"
            )));
        }
        scanners.push(Scanner::new(id, std::mem::take(points)));
    }
    Ok(())
}

// "--- scanner 7 ---"
fn parse_header(line: &str) -> Result<ScannerId> {
    let mut words = line.split_whitespace();
    let framed = words.next() == Some("---") && words.next() == Some("scanner");
    let id = words.next().and_then(|w| w.parse().ok());
    match (framed, id, words.next(), words.next()) {
        (true, Some(id), Some("---"), None) => Ok(id),
        _ => Err(RegistrationError::MalformedInput(format!(
            "invalid scanner header: {line:?}"
        ))),
    }
}

// "404,-588,-901"
fn parse_point<const N: usize>(line: &str) -> Result<Point<N>> {
    let mut coords = [0i64; N];
    let mut parts = line.split(',');
    for coord in coords.iter_mut() {
        let part = parts.next().ok_or_else(|| {
            RegistrationError::MalformedInput(format!("expected {N} coordinates: {line:?}"))
        })?;
        *coord = part.trim().parse().map_err(|_| {
            RegistrationError::MalformedInput(format!("invalid coordinate {part:?} in {line:?}"))
        })?;
    }
    if parts.next().is_some() {
        return Err(RegistrationError::MalformedInput(format!(
            "expected {N} coordinates: {line:?}"
        )));
    }
    Ok(Point::new(coords))
}
