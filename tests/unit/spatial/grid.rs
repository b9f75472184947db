//! Tests for fixed-size grid storage, conversion and change notification

#[cfg(test)]
mod tests {
    use gridplace::spatial::{GridCell, GridMap};
    use gridplace::{GridError, GridPosition, WorldPoint};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Cell = GridCell<u32>;

    fn grid(width: i32, height: i32, cell_size: f64, origin: WorldPoint) -> GridMap<Cell> {
        GridMap::new(width, height, cell_size, origin, Cell::new)
            .unwrap_or_else(|e| unreachable!("valid grid rejected: {e}"))
    }

    // Tests zero and negative dimensions are rejected
    // Verified by accepting zero height
    #[test]
    fn test_new_rejects_invalid_dimensions() {
        for (width, height, cell_size, parameter) in [
            (0, 10, 1.0, "width"),
            (-3, 10, 1.0, "width"),
            (10, 0, 1.0, "height"),
            (10, 10, 0.0, "cell_size"),
            (10, 10, -2.0, "cell_size"),
            (10, 10, f64::NAN, "cell_size"),
        ] {
            let result = GridMap::new(width, height, cell_size, WorldPoint::ZERO, Cell::new);
            match result {
                Err(GridError::InvalidDimension { parameter: p, .. }) => assert_eq!(p, parameter),
                other => unreachable!("expected InvalidDimension, got {other:?}"),
            }
        }
    }

    // Tests the factory runs once per cell with that cell's coordinate
    // Verified by swapping x and z in the factory call
    #[test]
    fn test_factory_builds_every_cell() {
        let mut calls = 0;
        let map = GridMap::new(4, 3, 1.0, WorldPoint::ZERO, |position| {
            calls += 1;
            position
        })
        .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(calls, 12);
        for position in map.positions() {
            assert_eq!(map.cell(position).ok(), Some(&position));
        }
        assert_eq!(map.cells().count(), 12);
    }

    // Tests lookups outside [0, W) x [0, H) fail with OutOfBounds
    // Verified by using <= in the bounds check
    #[test]
    fn test_cell_out_of_bounds() {
        let map = grid(10, 5, 1.0, WorldPoint::ZERO);

        assert!(map.cell(GridPosition::new(9, 4)).is_ok());
        for position in [
            GridPosition::new(10, 0),
            GridPosition::new(0, 5),
            GridPosition::new(-1, 0),
            GridPosition::new(0, -1),
        ] {
            assert!(matches!(
                map.cell(position),
                Err(GridError::OutOfBounds { width: 10, height: 5, .. })
            ));
        }
    }

    // Tests world to grid conversion floors relative to the origin
    // Verified by truncating instead of flooring
    #[test]
    fn test_world_to_grid_floors() {
        let map = grid(10, 10, 10.0, WorldPoint::new(-50.0, 0.0, 20.0));

        assert_eq!(
            map.world_to_grid(WorldPoint::new(-45.0, 7.0, 25.0)),
            GridPosition::new(0, 0)
        );
        assert_eq!(
            map.world_to_grid(WorldPoint::new(-50.5, 0.0, 19.0)),
            GridPosition::new(-1, -1)
        );
        assert_eq!(
            map.world_to_grid(WorldPoint::new(55.0, 0.0, 130.0)),
            GridPosition::new(10, 11)
        );
    }

    // Tests grid to world maps corners back onto the world
    // Verified by dropping the origin term
    #[test]
    fn test_grid_to_world_includes_origin() {
        let map = grid(10, 10, 2.5, WorldPoint::new(1.0, 3.0, -4.0));

        assert_eq!(
            map.grid_to_world(GridPosition::new(2, 4)),
            WorldPoint::new(6.0, 3.0, 6.0)
        );
        assert_eq!(
            map.grid_to_world(GridPosition::new(-2, 0)),
            WorldPoint::new(-4.0, 3.0, -4.0)
        );
    }

    // Tests every in-bounds cell round-trips through world space
    // Verified by offsetting grid_to_world by one cell
    #[test]
    fn test_world_grid_round_trip() {
        let map = grid(7, 9, 3.0, WorldPoint::new(-10.0, 0.0, 5.0));

        for position in map.positions() {
            assert_eq!(map.world_to_grid(map.grid_to_world(position)), position);
        }
    }

    // Tests each axis clamps independently
    // Verified by clamping z against width
    #[test]
    fn test_clamp_to_grid() {
        let map = grid(10, 4, 1.0, WorldPoint::ZERO);

        assert_eq!(map.clamp_to_grid(GridPosition::new(-5, 2)), GridPosition::new(0, 2));
        assert_eq!(map.clamp_to_grid(GridPosition::new(3, 9)), GridPosition::new(3, 3));
        assert_eq!(map.clamp_to_grid(GridPosition::new(42, -1)), GridPosition::new(9, 0));
        assert_eq!(map.clamp_to_grid(GridPosition::new(5, 1)), GridPosition::new(5, 1));
    }

    // Tests cell lookup by world position uses the same bounds contract
    // Verified by clamping inside cell_at_world
    #[test]
    fn test_cell_at_world() {
        let map = grid(10, 10, 10.0, WorldPoint::ZERO);

        let cell = map
            .cell_at_world(WorldPoint::new(35.0, 0.0, 12.0))
            .unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(cell.position(), GridPosition::new(3, 1));
        assert!(matches!(
            map.cell_at_world(WorldPoint::new(-1.0, 0.0, 0.0)),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    // Tests modify_cell notifies after every write, even without a change
    // Verified by notifying only when the occupant differs
    #[test]
    fn test_modify_cell_always_notifies() {
        let mut map = grid(3, 3, 1.0, WorldPoint::ZERO);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        map.subscribe(move |change| log.borrow_mut().push(change.position));

        let target = GridPosition::new(1, 2);
        assert!(map.modify_cell(target, Cell::clear_occupant).is_ok());
        assert!(map.modify_cell(target, Cell::clear_occupant).is_ok());

        assert_eq!(*seen.borrow(), vec![target, target]);
        assert!(map.cell(target).is_ok_and(Cell::can_build));
    }

    // Tests the grid stores any occupant type, independent of placement handles
    // Verified by pinning the cell type to placed-object handles
    #[test]
    fn test_generic_occupant_round_trip() {
        let mut map = grid(2, 2, 1.0, WorldPoint::ZERO);
        let target = GridPosition::new(1, 0);

        assert!(map.modify_cell(target, |cell| cell.set_occupant(7)).is_ok());

        assert_eq!(map.cell(target).ok().and_then(Cell::occupant), Some(&7));
        assert!(map.cell(GridPosition::new(0, 0)).is_ok_and(Cell::can_build));
    }

    // Tests out-of-bounds writes neither run the update nor notify
    // Verified by notifying before the bounds check
    #[test]
    fn test_modify_cell_out_of_bounds() {
        let mut map = grid(3, 3, 1.0, WorldPoint::ZERO);
        let seen = Rc::new(RefCell::new(0));
        let count = Rc::clone(&seen);
        map.subscribe(move |_| *count.borrow_mut() += 1);

        let mut ran = false;
        let result = map.modify_cell(GridPosition::new(3, 0), |_| ran = true);

        assert!(matches!(result, Err(GridError::OutOfBounds { .. })));
        assert!(!ran);
        assert_eq!(*seen.borrow(), 0);
    }

    // Tests unsubscribed listeners stop receiving notifications
    // Verified by ignoring unsubscribe
    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut map = grid(2, 2, 1.0, WorldPoint::ZERO);
        let seen = Rc::new(RefCell::new(0));
        let count = Rc::clone(&seen);
        let id = map.subscribe(move |_| *count.borrow_mut() += 1);

        map.notify_changed(GridPosition::new(0, 0));
        assert!(map.unsubscribe(id));
        assert!(!map.unsubscribe(id));
        map.notify_changed(GridPosition::new(0, 0));

        assert_eq!(*seen.borrow(), 1);
    }

    // Tests accessors report construction parameters
    // Verified by swapping width and height
    #[test]
    fn test_accessors() {
        let origin = WorldPoint::new(1.0, 2.0, 3.0);
        let map = grid(6, 2, 0.5, origin);

        assert_eq!(map.width(), 6);
        assert_eq!(map.height(), 2);
        assert!((map.cell_size() - 0.5).abs() < f64::EPSILON);
        assert_eq!(map.origin(), origin);
        assert!(map.contains(GridPosition::new(5, 1)));
        assert!(!map.contains(GridPosition::new(6, 1)));
    }
}
