#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum ImageEncoding {
    Mono8,
    Mono16,
    Rgb8,
    Bgr8,
    Rgba8,
    Bgra8,
    Compressed
}

impl ImageEncoding {
    pub fn from_name(name: &str) -> Option<ImageEncoding> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mono8" | "8uc1" => Some(ImageEncoding::Mono8),
            "mono16" | "16uc1" => Some(ImageEncoding::Mono16),
            "rgb8" => Some(ImageEncoding::Rgb8),
            "bgr8" | "8uc3" => Some(ImageEncoding::Bgr8),
            "rgba8" => Some(ImageEncoding::Rgba8),
            "bgra8" | "8uc4" => Some(ImageEncoding::Bgra8),
            "png" | "jpeg" | "jpg" | "compressed" => Some(ImageEncoding::Compressed),
            _ => None
        }
    }

    /// None for compressed payloads, which carry no fixed pixel layout.
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            ImageEncoding::Mono8 => Some(1),
            ImageEncoding::Mono16 => Some(2),
            ImageEncoding::Rgb8 | ImageEncoding::Bgr8 => Some(3),
            ImageEncoding::Rgba8 | ImageEncoding::Bgra8 => Some(4),
            ImageEncoding::Compressed => None
        }
    }

    /// Rescales a 16 bit intensity to 8 bit over the full range.
    pub fn scale_to_u8(value: u16) -> u8 {
        ((value as f32)*(255.0/65535.0)).round() as u8
    }
}
