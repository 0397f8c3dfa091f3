//! Tablet-space to screen-space coordinate mapping.
//!
//! # Orientations (for beginners)
//!
//! The digitizer reports positions in its own units (tens of thousands per
//! axis) with its own origin.  Depending on how the tablet is held, "right" on
//! the tablet may be "up" or "left" on the screen:
//!
//! | Orientation | Mapping                                              |
//! |-------------|------------------------------------------------------|
//! | `right`     | identity: tablet X → screen X, tablet Y → screen Y   |
//! | `left`      | 180°: both axes inverted before scaling              |
//! | `vertical`  | 90°: axes swapped (tablet Y → screen X, X → Y)       |
//!
//! After rotation each axis is scaled linearly to the screen size and rounded
//! to the nearest pixel.  [`OffsetPositionScaler`] then shifts the result onto
//! a non-primary monitor.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Default digitizer extent along the short edge.
pub const DEFAULT_TABLET_WIDTH: u32 = 15725;
/// Default digitizer extent along the long edge.
pub const DEFAULT_TABLET_HEIGHT: u32 = 20967;

/// Maps a tablet position to a screen position.
pub trait PositionScaler {
    fn scale_position(&self, x: i32, y: i32) -> (i32, i32);
}

impl<P: PositionScaler + ?Sized> PositionScaler for Box<P> {
    fn scale_position(&self, x: i32, y: i32) -> (i32, i32) {
        (**self).scale_position(x, y)
    }
}

impl<P: PositionScaler + ?Sized> PositionScaler for &P {
    fn scale_position(&self, x: i32, y: i32) -> (i32, i32) {
        (**self).scale_position(x, y)
    }
}

/// Tablet and screen extents shared by every orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub tablet_width: u32,
    pub tablet_height: u32,
    pub screen_width: u32,
    pub screen_height: u32,
}

/// Maps `pos` in `[0, from]` linearly onto `[0, to]`, rounding to nearest.
///
/// `from` must be non-zero; configuration validation guarantees this.  The
/// result saturates at the `i32` bounds for positions far outside the tablet.
fn scale_axis(pos: f64, from: u32, to: u32) -> i32 {
    (pos / f64::from(from) * f64::from(to)).round() as i32
}

/// Identity rotation.
#[derive(Debug, Clone, Copy)]
pub struct RightPositionScaler {
    pub geometry: ScreenGeometry,
}

impl PositionScaler for RightPositionScaler {
    fn scale_position(&self, x: i32, y: i32) -> (i32, i32) {
        let g = &self.geometry;
        (
            scale_axis(f64::from(x), g.tablet_width, g.screen_width),
            scale_axis(f64::from(y), g.tablet_height, g.screen_height),
        )
    }
}

/// 180° rotation.
#[derive(Debug, Clone, Copy)]
pub struct LeftPositionScaler {
    pub geometry: ScreenGeometry,
}

impl PositionScaler for LeftPositionScaler {
    fn scale_position(&self, x: i32, y: i32) -> (i32, i32) {
        let g = &self.geometry;
        let flipped_x = f64::from(g.tablet_width) - f64::from(x);
        let flipped_y = f64::from(g.tablet_height) - f64::from(y);
        (
            scale_axis(flipped_x, g.tablet_width, g.screen_width),
            scale_axis(flipped_y, g.tablet_height, g.screen_height),
        )
    }
}

/// 90° rotation: tablet Y drives screen X and tablet X drives screen Y.
#[derive(Debug, Clone, Copy)]
pub struct VerticalPositionScaler {
    pub geometry: ScreenGeometry,
}

impl PositionScaler for VerticalPositionScaler {
    fn scale_position(&self, x: i32, y: i32) -> (i32, i32) {
        let g = &self.geometry;
        (
            scale_axis(f64::from(y), g.tablet_height, g.screen_width),
            scale_axis(f64::from(x), g.tablet_width, g.screen_height),
        )
    }
}

/// Adds a fixed pixel offset to another scaler's output.
#[derive(Debug, Clone, Copy)]
pub struct OffsetPositionScaler<P> {
    pub wrapped: P,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl<P: PositionScaler> PositionScaler for OffsetPositionScaler<P> {
    fn scale_position(&self, x: i32, y: i32) -> (i32, i32) {
        let (sx, sy) = self.wrapped.scale_position(x, y);
        (sx.saturating_add(self.offset_x), sy.saturating_add(self.offset_y))
    }
}

/// How the tablet is held relative to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Right,
    Left,
    Vertical,
}

impl Orientation {
    /// Builds the rotation scaler for this orientation.
    pub fn scaler(self, geometry: ScreenGeometry) -> Box<dyn PositionScaler> {
        match self {
            Self::Right => Box::new(RightPositionScaler { geometry }),
            Self::Left => Box::new(LeftPositionScaler { geometry }),
            Self::Vertical => Box::new(VerticalPositionScaler { geometry }),
        }
    }
}

/// Error returned when an orientation name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown orientation {0:?} (expected right, left or vertical)")]
pub struct ParseOrientationError(String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "vertical" => Ok(Self::Vertical),
            _ => Err(ParseOrientationError(s.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Vertical => "vertical",
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(tw: u32, th: u32, sw: u32, sh: u32) -> ScreenGeometry {
        ScreenGeometry {
            tablet_width: tw,
            tablet_height: th,
            screen_width: sw,
            screen_height: sh,
        }
    }

    #[test]
    fn test_right_scales_each_axis_independently() {
        // Arrange
        let sc = RightPositionScaler { geometry: geometry(1000, 1000, 2000, 1000) };

        // Act / Assert
        assert_eq!(sc.scale_position(500, 500), (1000, 500));
        assert_eq!(sc.scale_position(0, 0), (0, 0));
        assert_eq!(sc.scale_position(1000, 1000), (2000, 1000));
    }

    #[test]
    fn test_left_inverts_both_axes() {
        let sc = LeftPositionScaler { geometry: geometry(1000, 1000, 2000, 1000) };
        assert_eq!(sc.scale_position(0, 0), (2000, 1000));
        assert_eq!(sc.scale_position(250, 100), (1500, 900));
    }

    #[test]
    fn test_vertical_swaps_axes_before_scaling() {
        // Arrange
        let sc = VerticalPositionScaler { geometry: geometry(1000, 1000, 1000, 2000) };

        // Act / Assert: the right-orientation result with its axes swapped
        assert_eq!(sc.scale_position(500, 500), (500, 1000));
        assert_eq!(sc.scale_position(100, 800), (800, 200));
    }

    #[test]
    fn test_vertical_uses_tablet_height_for_screen_width() {
        let sc = VerticalPositionScaler { geometry: geometry(200, 400, 1000, 600) };
        // y=200 is halfway along the tablet height -> halfway across the screen
        // x=50 is a quarter along the tablet width -> a quarter down the screen
        assert_eq!(sc.scale_position(50, 200), (500, 150));
    }

    #[test]
    fn test_offset_adds_to_any_base_scaler() {
        let g = geometry(15725, 20967, 1920, 1080);
        for orientation in [Orientation::Right, Orientation::Left, Orientation::Vertical] {
            // Arrange
            let base = orientation.scaler(g);
            let expected = base.scale_position(1234, 5678);
            let sc = OffsetPositionScaler { wrapped: base, offset_x: 100, offset_y: -50 };

            // Act
            let got = sc.scale_position(1234, 5678);

            // Assert
            assert_eq!(got, (expected.0 + 100, expected.1 - 50), "{orientation}");
        }
    }

    #[test]
    fn test_scaling_is_deterministic() {
        let sc = Orientation::Left.scaler(geometry(15725, 20967, 2560, 1440));
        assert_eq!(sc.scale_position(777, 333), sc.scale_position(777, 333));
    }

    #[test]
    fn test_rounds_to_nearest_pixel() {
        // 1/3 of 1000 = 333.33 -> 333, 2/3 of 1000 = 666.67 -> 667
        let sc = RightPositionScaler { geometry: geometry(3, 3, 1000, 1000) };
        assert_eq!(sc.scale_position(1, 2), (333, 667));
    }

    #[test]
    fn test_extreme_axis_values_saturate_instead_of_overflowing() {
        // Arrange
        let g = geometry(1000, 1000, 2000, 1000);
        let left = LeftPositionScaler { geometry: g };
        let right = RightPositionScaler { geometry: g };
        let vertical = VerticalPositionScaler { geometry: g };

        // Act / Assert
        assert_eq!(left.scale_position(i32::MIN, 0), (i32::MAX, 1000));
        assert_eq!(left.scale_position(i32::MAX, i32::MAX), (i32::MIN, -2_147_482_647));
        assert_eq!(right.scale_position(i32::MAX, i32::MIN), (i32::MAX, i32::MIN));
        assert_eq!(vertical.scale_position(i32::MIN, i32::MAX), (i32::MAX, i32::MIN));
    }

    #[test]
    fn test_offset_saturates_at_i32_bounds() {
        let g = geometry(1000, 1000, 1000, 1000);
        let up = OffsetPositionScaler {
            wrapped: RightPositionScaler { geometry: g },
            offset_x: 100,
            offset_y: 0,
        };
        let down = OffsetPositionScaler {
            wrapped: RightPositionScaler { geometry: g },
            offset_x: 0,
            offset_y: -100,
        };

        assert_eq!(up.scale_position(i32::MAX, 0), (i32::MAX, 0));
        assert_eq!(down.scale_position(0, i32::MIN), (0, i32::MIN));
    }

    #[test]
    fn test_geometry_wider_than_i32_does_not_truncate() {
        let sc = LeftPositionScaler { geometry: geometry(u32::MAX, 1000, 1000, 1000) };
        assert_eq!(sc.scale_position(0, 1000), (1000, 0));
    }

    #[test]
    fn test_orientation_parses_case_insensitively() {
        assert_eq!("Vertical".parse(), Ok(Orientation::Vertical));
        assert!("upside-down".parse::<Orientation>().is_err());
    }
}
