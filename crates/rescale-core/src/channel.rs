//! Color channels of a packed 32-bit pixel.
//!
//! 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
//! [`Channel`] names each 8-bit lane and carries its fixed bit offset, so the
//! same table is used both to pull a channel out of a pixel and to pack four
//! channel values back into one.

/// Mask for the low 8 bits of a shifted pixel value.
const CHANNEL_MASK: u32 = 0xff;

/// One 8-bit lane of a packed RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red channel (bits 24-31)
    Red,
    /// Green channel (bits 16-23)
    Green,
    /// Blue channel (bits 8-15)
    Blue,
    /// Alpha channel (bits 0-7)
    Alpha,
}

impl Channel {
    /// All channels in packing order, most significant first.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Bit offset of this channel inside a packed pixel.
    #[inline]
    pub const fn shift(self) -> u32 {
        match self {
            Channel::Red => 24,
            Channel::Green => 16,
            Channel::Blue => 8,
            Channel::Alpha => 0,
        }
    }

    /// Extract this channel's value from a packed pixel.
    #[inline]
    pub const fn extract(self, pixel: u32) -> u8 {
        ((pixel >> self.shift()) & CHANNEL_MASK) as u8
    }

    /// Pack four channel values, given in [`Channel::ALL`] order.
    #[inline]
    pub fn compose(values: [u8; 4]) -> u32 {
        Channel::ALL
            .iter()
            .zip(values)
            .fold(0u32, |acc, (channel, v)| acc | ((v as u32) << channel.shift()))
    }
}

/// Compose a 32-bit RGBA pixel.
#[inline]
pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    Channel::compose([r, g, b, a])
}

/// Compose a 32-bit RGB pixel (alpha = 255).
#[inline]
pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
    compose_rgba(r, g, b, 255)
}

/// Extract RGBA values from a 32-bit pixel.
#[inline]
pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
    (
        Channel::Red.extract(pixel),
        Channel::Green.extract(pixel),
        Channel::Blue.extract(pixel),
        Channel::Alpha.extract(pixel),
    )
}

/// Extract RGB values from a 32-bit pixel.
#[inline]
pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
    let (r, g, b, _) = extract_rgba(pixel);
    (r, g, b)
}
