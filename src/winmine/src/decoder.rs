//! Board decoding from raw process memory

use tracing::debug;

use crate::board::Board;
use crate::cell::CellKind;
use crate::geometry::Geometry;
use crate::layout::Layout;
use crate::memory::MemorySource;
use crate::{Error, Result};

/// Read the board dimensions as `(width, height)`
///
/// Zero or negative values (a stale or uninitialized game) come back as zero.
/// Values beyond what the game allows are rejected.
pub fn read_dimensions<S: MemorySource + ?Sized>(
    source: &S,
    base: usize,
    layout: &Layout,
) -> Result<(usize, usize)> {
    let width = source.read_i32(base + layout.width)?;
    let height = source.read_i32(base + layout.height)?;

    let clamp = |v: i32| usize::try_from(v).unwrap_or(0);
    let (w, h) = (clamp(width), clamp(height));

    if w > layout.max_width || w >= layout.row_stride || h > layout.max_height {
        return Err(Error::ImplausibleDimensions { width, height });
    }

    Ok((w, h))
}

/// Decode the full cell array into a positioned [`Board`]
pub fn decode<S: MemorySource + ?Sized>(
    source: &S,
    base: usize,
    layout: &Layout,
    geometry: Geometry,
) -> Result<Board> {
    let (width, height) = read_dimensions(source, base, layout)?;
    if width == 0 || height == 0 {
        debug!("Board has no cells ({}x{})", width, height);
        return Ok(Board::empty(geometry));
    }

    let start = base + layout.board;
    let stride = layout.row_stride;
    let raw = source.read_bytes(start, layout.board_size(height))?;

    // Column 0 of every row is the left border
    let rows = (0..height)
        .map(|row| {
            (1..=width)
                .map(|col| {
                    let index = row * stride + col;
                    (CellKind::classify(raw[index]), start + index)
                })
                .collect()
        })
        .collect();

    debug!("Decoded {}x{} board at {:#x}", width, height, start);
    Ok(Board::from_raw(rows, geometry))
}
