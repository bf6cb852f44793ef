use std::fmt;

/// Per-pixel silhouette of a sprite, one bit per pixel.
///
/// Each row is stored as a `u128` where bit `N` corresponds to column `N`,
/// so a mask is at most [`Mask::MAX_WIDTH`] pixels wide. Overlap tests work a
/// whole row at a time by shifting one row onto the other.
///
/// # Example
///
/// ```
/// use oxiflap_engine::Mask;
///
/// let wall = Mask::filled(4, 4);
/// let dot = Mask::filled(1, 1);
///
/// assert_eq!(wall.overlap(&dot, (3, 3)), Some((3, 3)));
/// assert_eq!(wall.overlap(&dot, (4, 0)), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    rows: Vec<u128>,
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("count", &self.count())
            .finish()
    }
}

impl Mask {
    pub const MAX_WIDTH: u32 = u128::BITS;

    fn row_bits(width: u32) -> u128 {
        if width >= Self::MAX_WIDTH {
            u128::MAX
        } else {
            (1 << width) - 1
        }
    }

    /// Creates a mask with every pixel set.
    #[must_use]
    pub fn filled(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Creates a mask for the ellipse inscribed in a `width` × `height` box.
    ///
    /// A pixel is set when its center lies inside the ellipse.
    #[must_use]
    pub fn ellipse(width: u32, height: u32) -> Self {
        let rx = f64::from(width) / 2.0;
        let ry = f64::from(height) / 2.0;
        Self::from_fn(width, height, |x, y| {
            let dx = (f64::from(x) + 0.5 - rx) / rx;
            let dy = (f64::from(y) + 0.5 - ry) / ry;
            dx * dx + dy * dy <= 1.0
        })
    }

    /// Creates a mask by evaluating `f(x, y)` for every pixel.
    ///
    /// # Panics
    ///
    /// Panics if `width` exceeds [`Mask::MAX_WIDTH`].
    #[must_use]
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        assert!(
            width <= Self::MAX_WIDTH,
            "mask width {width} exceeds {}",
            Self::MAX_WIDTH
        );
        let rows = (0..height)
            .map(|y| {
                (0..width)
                    .filter(|&x| f(x, y))
                    .fold(0, |bits, x| bits | (1 << x))
            })
            .collect();
        Self {
            width,
            height,
            rows,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.rows[y as usize] & (1 << x) != 0
    }

    /// Returns the number of set pixels.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    /// Finds the first pixel set in both masks when `other` is placed at
    /// `offset` relative to `self`'s top-left corner.
    ///
    /// The returned point is in `self`'s coordinates, scanning rows top to
    /// bottom and columns left to right.
    #[must_use]
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(u32, u32)> {
        let (dx, dy) = offset;
        let self_bits = Self::row_bits(self.width);
        for (y, &row) in self.rows.iter().enumerate() {
            let Ok(y) = i32::try_from(y) else {
                break;
            };
            let Some(other_row) = usize::try_from(y - dy)
                .ok()
                .and_then(|oy| other.rows.get(oy))
            else {
                continue;
            };
            let shifted = if dx >= 0 {
                other_row.checked_shl(dx.unsigned_abs()).unwrap_or(0)
            } else {
                other_row.checked_shr(dx.unsigned_abs()).unwrap_or(0)
            };
            let hit = row & shifted & self_bits;
            if hit != 0 {
                return Some((hit.trailing_zeros(), y.unsigned_abs()));
            }
        }
        None
    }
}
