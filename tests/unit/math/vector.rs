//! Tests for world points and grid positions

#[cfg(test)]
mod tests {
    use gridplace::{GridPosition, WorldPoint};

    // Tests component-wise vector arithmetic
    // Verified by swapping y and z in Add
    #[test]
    fn test_world_point_arithmetic() {
        let a = WorldPoint::new(1.0, 2.0, 3.0);
        let b = WorldPoint::new(0.5, -1.0, 4.0);

        assert_eq!(a + b, WorldPoint::new(1.5, 1.0, 7.0));
        assert_eq!(a - b, WorldPoint::new(0.5, 3.0, -1.0));
        assert_eq!(a * 2.0, WorldPoint::new(2.0, 4.0, 6.0));
    }

    // Tests non-finite components are detected
    // Verified by checking only x
    #[test]
    fn test_world_point_is_finite() {
        assert!(WorldPoint::ZERO.is_finite());
        assert!(!WorldPoint::new(0.0, 0.0, f64::NAN).is_finite());
        assert!(!WorldPoint::new(f64::INFINITY, 0.0, 0.0).is_finite());
    }

    // Tests grid offsets add per axis and lift onto the x/z plane
    // Verified by mapping z onto world y
    #[test]
    fn test_grid_position_offset_and_lift() {
        let origin = GridPosition::new(3, 3);
        assert_eq!(origin.offset(GridPosition::new(0, 1)), GridPosition::new(3, 4));
        assert_eq!(
            GridPosition::new(2, -5).to_world_offset(),
            WorldPoint::new(2.0, 0.0, -5.0)
        );
    }

    // Tests offsets past the i32 range saturate instead of overflowing
    // Verified by using wrapping addition
    #[test]
    fn test_grid_position_offset_saturates() {
        let origin = GridPosition::new(9, -9);
        assert_eq!(
            origin.offset(GridPosition::new(i32::MAX, i32::MIN)),
            GridPosition::new(i32::MAX, i32::MIN)
        );
    }

    // Tests conversion from and into coordinate arrays
    // Verified by reversing array order
    #[test]
    fn test_grid_position_array_conversion() {
        let position = GridPosition::from([4, 7]);
        assert_eq!(position, GridPosition::new(4, 7));
        assert_eq!(<[i32; 2]>::from(position), [4, 7]);
        assert_eq!(position.to_string(), "4, 7");
    }
}
