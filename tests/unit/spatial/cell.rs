//! Tests for single-occupant grid cells

#[cfg(test)]
mod tests {
    use gridplace::GridPosition;
    use gridplace::spatial::GridCell;

    // Tests a new cell is empty and buildable
    // Verified by initializing with a placeholder occupant
    #[test]
    fn test_new_cell_is_buildable() {
        let cell: GridCell<u32> = GridCell::new(GridPosition::new(2, 5));

        assert!(cell.can_build());
        assert_eq!(cell.occupant(), None);
        assert_eq!(cell.position(), GridPosition::new(2, 5));
    }

    // Tests setting and clearing the occupant toggles buildability
    // Verified by leaving the occupant in place on clear
    #[test]
    fn test_set_and_clear_occupant() {
        let mut cell = GridCell::new(GridPosition::new(0, 0));

        cell.set_occupant(7_u32);
        assert!(!cell.can_build());
        assert_eq!(cell.occupant(), Some(&7));

        cell.set_occupant(9);
        assert_eq!(cell.occupant(), Some(&9));

        cell.clear_occupant();
        assert!(cell.can_build());

        cell.clear_occupant();
        assert!(cell.can_build());
        assert_eq!(cell.occupant(), None);
    }

    // Tests display lists the coordinate and occupant on separate lines
    // Verified by omitting the newline
    #[test]
    fn test_display() {
        let mut cell = GridCell::new(GridPosition::new(3, 4));
        assert_eq!(cell.to_string(), "3, 4");

        cell.set_occupant("tower");
        assert_eq!(cell.to_string(), "3, 4\ntower");
    }
}
