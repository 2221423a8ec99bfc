use image::{GrayImage, Luma};

use crate::error::{MazeError, Result};
use crate::grid::Marker;

const BLACK: u8 = 0;
const WHITE: u8 = 255;
/// Sampled values below this decode as wall.
const THRESHOLD: u8 = 128;
/// Largest image side, in pixels, that `encode` will produce.
pub const MAX_IMAGE_SIDE: u32 = 1 << 15;

/// Paints every marker as a `cell_px` square: black for walls, white otherwise.
pub fn encode(markers: &[Vec<Marker>], cell_px: u32) -> Result<GrayImage> {
    let rows = markers.len();
    let cols = markers.first().map_or(0, Vec::len);
    let width = image_side(cols, cell_px)?;
    let height = image_side(rows, cell_px)?;
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let marker = markers[(y / cell_px) as usize][(x / cell_px) as usize];
        Luma([if marker.is_wall() { BLACK } else { WHITE }])
    }))
}

fn image_side(blocks: usize, cell_px: u32) -> Result<u32> {
    u32::try_from(blocks)
        .ok()
        .and_then(|blocks| blocks.checked_mul(cell_px))
        .filter(|side| *side <= MAX_IMAGE_SIDE)
        .ok_or_else(|| {
            MazeError::MalformedInput(format!(
                "{} blocks of {}px exceed the {}px image limit",
                blocks, cell_px, MAX_IMAGE_SIDE
            ))
        })
}

/// Samples the centre pixel of each `cell_px` block.
///
/// Lossy: path overlays come back as plain passages.
pub fn decode(img: &GrayImage, cell_px: u32) -> Result<Vec<Vec<Marker>>> {
    if cell_px == 0 {
        return Err(MazeError::MalformedInput("block size must be positive".into()));
    }
    if img.width() % cell_px != 0 || img.height() % cell_px != 0 {
        return Err(MazeError::MalformedInput(format!(
            "{}x{} image is not made of whole {}px blocks",
            img.width(),
            img.height(),
            cell_px
        )));
    }
    let rows = img.height() / cell_px;
    let cols = img.width() / cell_px;
    if rows == 0 || cols == 0 {
        return Err(MazeError::MalformedInput(format!(
            "{}x{} image is smaller than one {}px block",
            img.width(),
            img.height(),
            cell_px
        )));
    }
    let half = cell_px / 2;
    Ok((0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    let pixel = img.get_pixel(c * cell_px + half, r * cell_px + half);
                    marker_for_luma(pixel.0[0])
                })
                .collect()
        })
        .collect())
}

pub fn marker_for_luma(value: u8) -> Marker {
    if value < THRESHOLD {
        Marker::Wall
    } else {
        Marker::Passage
    }
}
