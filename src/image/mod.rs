extern crate image as image_rs;

use image_rs::{DynamicImage,GrayImage,ImageBuffer,Luma,RgbImage,RgbaImage};

use crate::sensors::ImageMessage;
use self::image_encoding::ImageEncoding;

pub mod image_encoding;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unsupported image encoding '{0}'")]
    UnsupportedEncoding(String),
    #[error("image has zero extent ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("row step {step} is shorter than a row of {row_bytes} bytes")]
    Step { step: usize, row_bytes: usize },
    #[error("image buffer holds {actual} bytes, {expected} needed")]
    BufferSize { expected: usize, actual: usize },
    #[error("compressed image could not be decoded: {0}")]
    Compressed(#[from] image_rs::ImageError)
}

/// Decodes a transport image into the single channel 8 bit format the tracker works on.
pub fn decode_mono8(message: &ImageMessage) -> Result<GrayImage, DecodeError> {
    let encoding = ImageEncoding::from_name(&message.encoding).ok_or_else(|| DecodeError::UnsupportedEncoding(message.encoding.clone()))?;

    let bytes_per_pixel = match encoding.bytes_per_pixel() {
        Some(bpp) => bpp,
        None => return Ok(image_rs::load_from_memory(&message.data)?.to_luma8())
    };

    let (width, height) = (message.width, message.height);
    let packed = packed_rows(message, bytes_per_pixel)?;
    let expected = packed.len();
    let size_error = || DecodeError::BufferSize{expected, actual: message.data.len()};

    let gray = match encoding {
        ImageEncoding::Mono8 => GrayImage::from_raw(width, height, packed).ok_or_else(size_error)?,
        ImageEncoding::Mono16 => {
            let read: fn([u8; 2]) -> u16 = match message.is_bigendian {
                true => u16::from_be_bytes,
                false => u16::from_le_bytes
            };
            let values = packed.chunks_exact(2).map(|b| ImageEncoding::scale_to_u8(read([b[0],b[1]]))).collect::<Vec<u8>>();
            ImageBuffer::<Luma<u8>,Vec<u8>>::from_raw(width, height, values).ok_or_else(size_error)?
        },
        ImageEncoding::Rgb8 => DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, packed).ok_or_else(size_error)?).to_luma8(),
        ImageEncoding::Bgr8 => DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, swap_red_blue(packed, 3)).ok_or_else(size_error)?).to_luma8(),
        ImageEncoding::Rgba8 => DynamicImage::ImageRgba8(RgbaImage::from_raw(width, height, packed).ok_or_else(size_error)?).to_luma8(),
        ImageEncoding::Bgra8 => DynamicImage::ImageRgba8(RgbaImage::from_raw(width, height, swap_red_blue(packed, 4)).ok_or_else(size_error)?).to_luma8(),
        ImageEncoding::Compressed => unreachable!("compressed images are decoded above")
    };

    Ok(gray)
}

/// Copies the pixel bytes out of `data`, dropping any row padding beyond `width*bytes_per_pixel`.
fn packed_rows(message: &ImageMessage, bytes_per_pixel: usize) -> Result<Vec<u8>, DecodeError> {
    let width = message.width as usize;
    let height = message.height as usize;
    if width == 0 || height == 0 {
        return Err(DecodeError::Empty{width: message.width, height: message.height});
    }

    let row_bytes = width*bytes_per_pixel;
    let step = message.step as usize;
    if step < row_bytes {
        return Err(DecodeError::Step{step, row_bytes});
    }

    let expected = step*(height-1) + row_bytes;
    if message.data.len() < expected {
        return Err(DecodeError::BufferSize{expected, actual: message.data.len()});
    }

    let mut packed = Vec::<u8>::with_capacity(row_bytes*height);
    for row in message.data.chunks(step).take(height) {
        packed.extend_from_slice(&row[..row_bytes]);
    }
    Ok(packed)
}

fn swap_red_blue(mut packed: Vec<u8>, channels: usize) -> Vec<u8> {
    for pixel in packed.chunks_exact_mut(channels) {
        pixel.swap(0,2);
    }
    packed
}
