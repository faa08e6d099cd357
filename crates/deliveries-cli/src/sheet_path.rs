use std::path::{Path, PathBuf};

pub const SHEET_FILE: &str = "deliveries.yaml";

/// Resolve the sheet file path.
///
/// Priority:
/// 1. `--sheet` flag / `DELIVERIES_SHEET` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `deliveries.yaml`
/// 3. Fall back to `cwd/deliveries.yaml`
pub fn resolve_sheet(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        let candidate = dir.join(SHEET_FILE);
        if candidate.is_file() {
            return candidate;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    cwd.join(SHEET_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_sheet_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        assert_eq!(resolve_sheet(Some(&path)), path);
    }

    #[test]
    fn explicit_sheet_need_not_exist_yet() {
        // `deliveries init` resolves the path before the file exists.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deliveries.yaml");
        assert!(!path.exists());
        assert_eq!(resolve_sheet(Some(&path)), path);
    }
}
