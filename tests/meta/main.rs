//! Checks that the unit test tree mirrors `src`

mod coverage;
