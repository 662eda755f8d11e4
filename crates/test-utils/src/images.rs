//! Encoded image fixtures built in memory.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

fn encode_png(image: &RgbImage) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("encoding an in-memory PNG cannot fail");
    cursor.into_inner()
}

/// Black and white squares of `cell` pixels: plenty of edges.
pub fn checkerboard_png(width: u32, height: u32, cell: u32) -> Vec<u8> {
    let cell = cell.max(1);
    let image = RgbImage::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    encode_png(&image)
}

/// A single flat gray: no edges at all.
pub fn uniform_png(width: u32, height: u32, level: u8) -> Vec<u8> {
    encode_png(&RgbImage::from_pixel(width, height, Rgb([level, level, level])))
}

/// A horizontal gradient: smooth, so nearly zero Laplacian response.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let span = width.saturating_sub(1).max(1);
    let image = RgbImage::from_fn(width, height, |x, _| {
        let level = (x * 255 / span) as u8;
        Rgb([level, level, level])
    });
    encode_png(&image)
}
