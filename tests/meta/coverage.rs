//! Layout checks keeping `tests/unit` a mirror of `src`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC: &str = "src";
    const UNIT: &str = "tests/unit";
    const TESTS: &str = "tests";

    /// Directories and `.rs` files under `root`, relative to it
    fn rust_tree(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                let is_dir = path.is_dir();
                if !is_dir && path.extension().is_none_or(|ext| ext != "rs") {
                    continue;
                }
                let relative = path
                    .strip_prefix(root)
                    .map_err(|_| io::Error::other(format!("{} escapes its root", path.display())))?
                    .to_path_buf();
                found.insert(relative);
                if is_dir {
                    pending.push(path);
                }
            }
        }

        Ok(found)
    }

    fn tree_or_empty(root: &str) -> BTreeSet<PathBuf> {
        let root = Path::new(root);
        rust_tree(root).unwrap_or_else(|error| {
            assert!(!root.exists(), "Failed to walk {}: {error}", root.display());
            BTreeSet::new()
        })
    }

    fn file_name_is(path: &Path, name: &str) -> bool {
        path.file_name().is_some_and(|file| file == name)
    }

    fn listing<'a>(paths: impl IntoIterator<Item = &'a PathBuf>, prefix: &str) -> String {
        paths
            .into_iter()
            .map(|path| format!("  - {prefix}/{}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests every source file has a unit test file at the mirrored path
    // Verified by deleting tests/unit/io/script.rs
    #[test]
    fn test_every_source_file_has_unit_mirror() {
        let sources = tree_or_empty(SRC);
        let units = tree_or_empty(UNIT);

        let unmirrored: Vec<_> = sources
            .iter()
            .filter(|path| path.as_path() != Path::new("main.rs"))
            .filter(|path| path.as_path() != Path::new("lib.rs"))
            .filter(|path| !file_name_is(path, "mod.rs"))
            .filter(|path| !units.contains(*path))
            .collect();

        assert!(
            unmirrored.is_empty(),
            "Source files without a unit test mirror:\n{}",
            listing(unmirrored, SRC)
        );
    }

    // Tests no unit test file outlives the source file it mirrors
    // Verified by adding tests/unit/spatial/chunk.rs
    #[test]
    fn test_every_unit_file_mirrors_a_source_file() {
        let sources = tree_or_empty(SRC);
        let units = tree_or_empty(UNIT);

        // The harness root only declares the mirrored modules
        let orphans: Vec<_> = units
            .iter()
            .filter(|path| path.as_path() != Path::new("main.rs"))
            .filter(|path| !file_name_is(path, "mod.rs"))
            .filter(|path| !sources.contains(*path))
            .collect();

        assert!(
            orphans.is_empty(),
            "Unit test files without a source counterpart:\n{}",
            listing(orphans, UNIT)
        );
    }

    // Tests every test file other than harness roots declares a test
    // Verified by emptying tests/placement.rs
    #[test]
    fn test_test_files_declare_tests() {
        let empty: Vec<_> = tree_or_empty(TESTS)
            .into_iter()
            .filter(|path| path.extension().is_some_and(|ext| ext == "rs"))
            .filter(|path| !file_name_is(path, "main.rs") && !file_name_is(path, "mod.rs"))
            .filter(|path| {
                !fs::read_to_string(Path::new(TESTS).join(path))
                    .is_ok_and(|content| content.contains("#[test]"))
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            listing(&empty, TESTS)
        );
    }

    // Tests every source file opens with a module doc comment
    // Verified by removing the doc line from src/io/image.rs
    #[test]
    fn test_source_files_open_with_module_docs() {
        let undocumented: Vec<_> = tree_or_empty(SRC)
            .into_iter()
            .filter(|path| path.extension().is_some_and(|ext| ext == "rs"))
            .filter(|path| {
                !fs::read_to_string(Path::new(SRC).join(path))
                    .is_ok_and(|content| content.trim_start().starts_with("//!"))
            })
            .collect();

        assert!(
            undocumented.is_empty(),
            "Source files without a module doc comment:\n{}",
            listing(&undocumented, SRC)
        );
    }
}
