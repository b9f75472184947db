//! Unit tests mirroring the `src/` layout

mod io;
mod spatial;
