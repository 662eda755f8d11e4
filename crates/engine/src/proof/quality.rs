//! Sharpness scoring: variance of the Laplacian of a grayscale image.

use image::{DynamicImage, GrayImage, Luma};

/// Convert to 8-bit grayscale with BT.601 luma weights.
///
/// Alpha is discarded.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
        Luma([luma.round().clamp(0.0, 255.0) as u8])
    })
}

/// Population variance of the 4-neighbour Laplacian response.
///
/// Borders reflect without repeating the edge pixel (`dcb|abcd|cba`). Low
/// values mean few edges, which in practice means a blurry or blank photo.
pub fn laplacian_variance(gray: &GrayImage) -> f64 {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return 0.0;
    }

    let w = i64::from(width);
    let h = i64::from(height);
    let at = |x: i64, y: i64| -> f64 {
        let x = reflect_101(x, w) as u32;
        let y = reflect_101(y, h) as u32;
        f64::from(gray.get_pixel(x, y).0[0])
    };

    let mut responses = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..h {
        for x in 0..w {
            let response =
                at(x - 1, y) + at(x + 1, y) + at(x, y - 1) + at(x, y + 1) - 4.0 * at(x, y);
            responses.push(response);
        }
    }

    let n = responses.len() as f64;
    let mean = responses.iter().sum::<f64>() / n;
    responses.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n
}

fn reflect_101(index: i64, len: i64) -> i64 {
    if len == 1 {
        return 0;
    }
    if index < 0 {
        -index
    } else if index >= len {
        2 * len - 2 - index
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_uniform_image_has_zero_variance() {
        let gray = GrayImage::from_pixel(32, 32, Luma([128]));
        assert_eq!(laplacian_variance(&gray), 0.0);
    }

    #[test]
    fn test_checkerboard_has_high_variance() {
        let gray = GrayImage::from_fn(32, 32, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Luma([0])
            } else {
                Luma([255])
            }
        });
        assert!(laplacian_variance(&gray) > 1000.0);
    }

    #[test]
    fn test_single_pixel_image() {
        let gray = GrayImage::from_pixel(1, 1, Luma([200]));
        assert_eq!(laplacian_variance(&gray), 0.0);
    }

    #[test]
    fn test_single_bright_pixel() {
        // edge midpoints see the centre twice through the reflected border
        let mut gray = GrayImage::from_pixel(3, 3, Luma([0]));
        gray.put_pixel(1, 1, Luma([9]));
        let responses = [0.0, 18.0, 0.0, 18.0, -36.0, 18.0, 0.0, 18.0, 0.0];
        let mean: f64 = responses.iter().sum::<f64>() / 9.0;
        let expected = responses.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 9.0;
        assert!((laplacian_variance(&gray) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_reflect_101() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(2, 5), 2);
        assert_eq!(reflect_101(-1, 1), 0);
    }

    #[test]
    fn test_grayscale_weights() {
        let rgb = RgbImage::from_pixel(1, 1, Rgb([255, 0, 0]));
        let gray = to_grayscale(&DynamicImage::ImageRgb8(rgb));
        assert_eq!(gray.get_pixel(0, 0).0[0], 76);
    }
}
