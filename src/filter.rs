//! PNG row filtering: the five per-row predictors, the Paeth predictor, and
//! the minimum-sum-of-absolute-values heuristic used to pick a filter per
//! row when encoding.
//!
//! Grounded on `png_filtration.c`'s `calc_filter_type` / `sum_row_for_heuristics`
//! / `unfilter_*` family, reworked around `Matrix` instead of raw byte rows.

use crate::error::{Error, Result};
use crate::header::Header;
use crate::pixel::{Matrix, Pixel};

const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}

impl Filter {
    fn from_tag(tag: u8) -> Result<Filter> {
        match tag {
            0 => Ok(Filter::None),
            1 => Ok(Filter::Sub),
            2 => Ok(Filter::Up),
            3 => Ok(Filter::Average),
            4 => Ok(Filter::Paeth),
            other => Err(Error::corrupt(format!("unrecognized filter type byte {other}"))),
        }
    }

    const ALL: [Filter; 5] = [Filter::None, Filter::Sub, Filter::Up, Filter::Average, Filter::Paeth];
}

/// The Paeth predictor (PNG spec §9.4): picks whichever of `a`, `b`, `c` is
/// closest to `a + b - c`.
fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i32 + b as i32 - c as i32;
    let pa = (p - a as i32).abs();
    let pb = (p - b as i32).abs();
    let pc = (p - c as i32).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

fn left(row: &[u8], col: usize) -> u8 {
    if col < BYTES_PER_PIXEL {
        0
    } else {
        row[col - BYTES_PER_PIXEL]
    }
}

fn up(prior: Option<&[u8]>, col: usize) -> u8 {
    prior.map_or(0, |r| r[col])
}

fn upper_left(prior: Option<&[u8]>, col: usize) -> u8 {
    if col < BYTES_PER_PIXEL {
        0
    } else {
        prior.map_or(0, |r| r[col - BYTES_PER_PIXEL])
    }
}

fn apply_filter(filter: Filter, row: &[u8], prior: Option<&[u8]>) -> Vec<u8> {
    let mut out = vec![0u8; row.len()];
    for col in 0..row.len() {
        let raw = row[col];
        out[col] = match filter {
            Filter::None => raw,
            Filter::Sub => raw.wrapping_sub(left(row, col)),
            Filter::Up => raw.wrapping_sub(up(prior, col)),
            Filter::Average => {
                let avg = (left(row, col) as u16 + up(prior, col) as u16) / 2;
                raw.wrapping_sub(avg as u8)
            }
            Filter::Paeth => raw.wrapping_sub(paeth_predictor(
                left(row, col),
                up(prior, col),
                upper_left(prior, col),
            )),
        };
    }
    out
}

fn reverse_filter(filter: Filter, filtered: &[u8], prior_unfiltered: Option<&[u8]>) -> Vec<u8> {
    let mut out = vec![0u8; filtered.len()];
    for col in 0..filtered.len() {
        let x = filtered[col];
        out[col] = match filter {
            Filter::None => x,
            Filter::Sub => x.wrapping_add(left(&out, col)),
            Filter::Up => x.wrapping_add(up(prior_unfiltered, col)),
            Filter::Average => {
                let avg = (left(&out, col) as u16 + up(prior_unfiltered, col) as u16) / 2;
                x.wrapping_add(avg as u8)
            }
            Filter::Paeth => x.wrapping_add(paeth_predictor(
                left(&out, col),
                up(prior_unfiltered, col),
                upper_left(prior_unfiltered, col),
            )),
        };
    }
    out
}

/// Sums the bytes of a filtered row the way the heuristic scores a filter
/// choice: each byte reinterpreted as a signed offset from zero, i.e. values
/// `>= 128` contribute `256 - byte` rather than `byte` (original's
/// `sum_row_for_heuristics`).
fn heuristic_sum(filtered_row: &[u8]) -> u32 {
    filtered_row
        .iter()
        .map(|&b| if b >= 128 { 256 - b as u32 } else { b as u32 })
        .sum()
}

/// Converts a pixel row into its raw RGBA byte row (the unfiltered
/// scanline content the filters operate on).
fn pixel_row_to_bytes(pixels: &[Pixel]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() * BYTES_PER_PIXEL);
    for p in pixels {
        out.extend_from_slice(&p.channels());
    }
    out
}

fn bytes_to_pixel_row(bytes: &[u8], row: &mut [Pixel]) {
    for (i, p) in row.iter_mut().enumerate() {
        let base = i * BYTES_PER_PIXEL;
        p.set_channels([bytes[base], bytes[base + 1], bytes[base + 2], bytes[base + 3]]);
    }
}

/// Applies the minimum-sum-of-absolute-values heuristic to choose a filter
/// for `row`, given the previous row's *unfiltered* bytes (`None` for the
/// first row of the image).
fn choose_filter(row: &[u8], prior: Option<&[u8]>) -> (Filter, Vec<u8>) {
    let mut best: Option<(Filter, Vec<u8>, u32)> = None;
    for &candidate in Filter::ALL.iter() {
        let filtered = apply_filter(candidate, row, prior);
        let score = heuristic_sum(&filtered);
        if best.as_ref().map_or(true, |(_, _, best_score)| score < *best_score) {
            best = Some((candidate, filtered, score));
        }
    }
    let (filter, filtered, _) = best.expect("Filter::ALL is non-empty");
    (filter, filtered)
}

/// Filters every row of `matrix` and serializes it as one PNG-ready stream:
/// a filter-type byte followed by `row_byte_len()` filtered bytes, repeated
/// for each row top to bottom.
pub fn filter(matrix: &Matrix, header: &Header) -> Vec<u8> {
    let row_len = header.row_byte_len();
    let mut out = Vec::with_capacity(header.filtered_stream_len());
    let mut prior_unfiltered: Option<Vec<u8>> = None;

    for r in 0..matrix.height() {
        let row_bytes = pixel_row_to_bytes(matrix.row(r));
        let (filter, filtered) = choose_filter(&row_bytes, prior_unfiltered.as_deref());
        out.push(filter as u8);
        out.extend_from_slice(&filtered);
        debug_assert_eq!(filtered.len(), row_len);
        prior_unfiltered = Some(row_bytes);
    }
    out
}

/// Reverses [`filter`]: parses a filter-type byte plus `row_byte_len()`
/// filtered bytes per row, reconstructing the pixel matrix.
pub fn unfilter(stream: &[u8], header: &Header) -> Result<Matrix> {
    let row_len = header.row_byte_len();
    let stride = 1 + row_len;
    if stream.len() != header.filtered_stream_len() {
        return Err(Error::corrupt(format!(
            "decompressed stream is {} bytes, expected {}",
            stream.len(),
            header.filtered_stream_len()
        )));
    }

    let mut matrix = Matrix::from_header(header);
    let mut prior_unfiltered: Option<Vec<u8>> = None;

    for r in 0..matrix.height() {
        let base = r * stride;
        let filter = Filter::from_tag(stream[base])?;
        let filtered_row = &stream[base + 1..base + 1 + row_len];
        let unfiltered = reverse_filter(filter, filtered_row, prior_unfiltered.as_deref());
        bytes_to_pixel_row(&unfiltered, matrix.row_mut(r));
        prior_unfiltered = Some(unfiltered);
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> Matrix {
        let mut m = Matrix::new(3, 2);
        let mut n = 0u8;
        for r in 0..2 {
            for c in 0..3 {
                *m.get_mut(r, c) = Pixel::new(n, n.wrapping_add(1), n.wrapping_add(2), 255);
                n = n.wrapping_add(7);
            }
        }
        m
    }

    #[test]
    fn paeth_predictor_picks_exact_matches() {
        assert_eq!(paeth_predictor(10, 20, 10), 20);
        assert_eq!(paeth_predictor(10, 20, 20), 10);
    }

    #[test]
    fn filter_then_unfilter_round_trips() {
        let header = Header::new(3, 2);
        let matrix = sample_matrix();
        let stream = filter(&matrix, &header);
        let restored = unfilter(&stream, &header).unwrap();
        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(matrix.get(r, c), restored.get(r, c));
            }
        }
    }

    #[test]
    fn stream_length_matches_header_formula() {
        let header = Header::new(3, 2);
        let stream = filter(&sample_matrix(), &header);
        assert_eq!(stream.len(), header.filtered_stream_len());
    }

    #[test]
    fn rejects_wrong_length_stream() {
        let header = Header::new(3, 2);
        let err = unfilter(&[0u8; 3], &header).unwrap_err();
        assert!(matches!(err, Error::CorruptContainer { .. }));
    }

    #[test]
    fn rejects_unknown_filter_byte() {
        let header = Header::new(1, 1);
        let mut stream = vec![9u8];
        stream.extend_from_slice(&[0u8; 4]);
        let err = unfilter(&stream, &header).unwrap_err();
        assert!(matches!(err, Error::CorruptContainer { .. }));
    }
}
