//! RGB565 byte-order conversion
//!
//! The renderer produces packed 16-bit 5-6-5 pixels in native byte
//! order; the panel consumes them high byte first. Each pixel is
//! byte-swapped once on its way into the transfer row buffer.

/// Swap the two bytes of a packed 16-bit pixel
///
/// Involution: applying it twice yields the original value.
#[inline]
pub const fn swap_bytes(v: u16) -> u16 {
    v.rotate_left(8)
}

/// Convert one row of pixels from `src` into `dst`
///
/// Writes `src.len()` byte-swapped pixels into the front of `dst`.
/// The buffers must be disjoint (draw buffer vs. transfer row
/// buffer); the borrow checker enforces this for safe callers.
/// An empty `src` is a no-op.
///
/// # Panics
///
/// Panics if `dst` is shorter than `src`. The flush controller
/// validates row width against the transfer buffer before calling.
pub fn convert_row(src: &[u16], dst: &mut [u16]) {
    for (d, s) in dst[..src.len()].iter_mut().zip(src) {
        *d = swap_bytes(*s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_known_values() {
        // Green and red in RGB565
        assert_eq!(swap_bytes(0x07E0), 0xE007);
        assert_eq!(swap_bytes(0xF800), 0x00F8);
        assert_eq!(swap_bytes(0x0000), 0x0000);
        assert_eq!(swap_bytes(0xFFFF), 0xFFFF);
        assert_eq!(swap_bytes(0x1234), 0x3412);
    }

    #[test]
    fn test_swap_involution_exhaustive() {
        for v in 0..=u16::MAX {
            assert_eq!(swap_bytes(swap_bytes(v)), v);
        }
    }

    #[test]
    fn test_convert_row() {
        let src = [0x07E0, 0xF800, 0x001F, 0xABCD];
        let mut dst = [0u16; 8];
        convert_row(&src, &mut dst);
        assert_eq!(&dst[..4], &[0xE007, 0x00F8, 0x1F00, 0xCDAB]);
        // Untouched tail
        assert_eq!(&dst[4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_convert_empty_row_is_noop() {
        let src: [u16; 0] = [];
        let mut dst = [0x1111u16; 4];
        convert_row(&src, &mut dst);
        assert_eq!(dst, [0x1111; 4]);
    }
}
