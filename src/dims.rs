//! Raster header sniffing for the common web image formats. Only enough of
//! each container is read to recover the stored pixel dimensions; a full
//! decode is never needed.

/// Returns the stored pixel dimensions of `bytes`, trying PNG, JPEG, GIF and
/// WebP in turn. `None` means the bytes are not a recognized raster image or
/// declare a zero dimension.
pub fn dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    png_dimensions(bytes)
        .or_else(|| jpeg_dimensions(bytes))
        .or_else(|| gif_dimensions(bytes))
        .or_else(|| webp_dimensions(bytes))
}

fn nonzero(width: u32, height: u32) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}

fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    const SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";
    if bytes.len() < 24 || &bytes[..8] != SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    nonzero(width, height)
}

fn gif_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 10 {
        return None;
    }
    if &bytes[..6] != b"GIF87a" && &bytes[..6] != b"GIF89a" {
        return None;
    }
    let width = u16::from_le_bytes([bytes[6], bytes[7]]);
    let height = u16::from_le_bytes([bytes[8], bytes[9]]);
    nonzero(u32::from(width), u32::from(height))
}

fn jpeg_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
        return None;
    }

    // Walk marker segments until a start-of-frame carries the geometry.
    let mut i = 2usize;
    while i + 3 < bytes.len() {
        if bytes[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = bytes[i + 1];
        match marker {
            // Padding and standalone markers carry no length.
            0xFF => {
                i += 1;
                continue;
            }
            0x01 | 0xD0..=0xD7 => {
                i += 2;
                continue;
            }
            _ => {}
        }

        let length = usize::from(u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]));
        if length < 2 {
            return None;
        }

        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            if i + 9 >= bytes.len() {
                return None;
            }
            let height = u16::from_be_bytes([bytes[i + 5], bytes[i + 6]]);
            let width = u16::from_be_bytes([bytes[i + 7], bytes[i + 8]]);
            return nonzero(u32::from(width), u32::from(height));
        }

        i += 2 + length;
    }

    None
}

fn webp_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 30 || &bytes[..4] != b"RIFF" || &bytes[8..12] != b"WEBP" {
        return None;
    }

    match &bytes[12..16] {
        // Lossy: 14-bit dimensions after the frame tag and sync code.
        b"VP8 " => {
            if &bytes[23..26] != b"\x9d\x01\x2a" {
                return None;
            }
            let width = u32::from(u16::from_le_bytes([bytes[26], bytes[27]])) & 0x3FFF;
            let height = u32::from(u16::from_le_bytes([bytes[28], bytes[29]])) & 0x3FFF;
            nonzero(width, height)
        }
        // Lossless: 14-bit minus-one dimensions bit-packed after the signature.
        b"VP8L" => {
            if bytes[20] != 0x2F {
                return None;
            }
            let b = [bytes[21], bytes[22], bytes[23], bytes[24]];
            let width = 1 + (u32::from(b[0]) | (u32::from(b[1]) & 0x3F) << 8);
            let height = 1
                + ((u32::from(b[1]) >> 6)
                    | u32::from(b[2]) << 2
                    | (u32::from(b[3]) & 0x0F) << 10);
            nonzero(width, height)
        }
        // Extended: 24-bit minus-one canvas dimensions.
        b"VP8X" => {
            let width = 1 + u32::from_le_bytes([bytes[24], bytes[25], bytes[26], 0]);
            let height = 1 + u32::from_le_bytes([bytes[27], bytes[28], bytes[29], 0]);
            nonzero(width, height)
        }
        _ => None,
    }
}
