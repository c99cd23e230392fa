//! Launcher script generation.
//!
//! Writes a small shell script into the release's `bin/` directory that
//! points the runtime host at the release manifest and starts the units in
//! dependency order.

use std::path::{Path, PathBuf};

use relforge_common::error::{ReleaseError, Result};
use relforge_common::types::UnitName;

/// Renders the launcher script body.
#[must_use]
pub fn render(name: &str, version: &str, start_order: &[UnitName]) -> String {
    let units = start_order.join(",");
    format!(
        "#!/bin/sh\n\
         # Launcher for {name} {version}. Generated; do not edit.\n\
         RELEASE_ROOT=\"$(cd \"$(dirname \"$0\")/..\" && pwd)\"\n\
         export RELEASE_ROOT\n\
         exec runtime-host \\\n\
         \x20\x20--release \"$RELEASE_ROOT/releases/{version}/release.json\" \\\n\
         \x20\x20--lib \"$RELEASE_ROOT/lib\" \\\n\
         \x20\x20--start \"{units}\" \"$@\"\n"
    )
}

/// Writes the launcher script for the release and marks it executable.
///
/// # Errors
///
/// Returns an error if the script cannot be written.
pub fn write(bin_dir: &Path, name: &str, version: &str, start_order: &[UnitName]) -> Result<PathBuf> {
    let path = bin_dir.join(name);
    tracing::info!(path = %path.display(), "writing launcher script");
    std::fs::write(&path, render(name, version, start_order)).map_err(|e| ReleaseError::Io {
        path: path.clone(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
            ReleaseError::Io {
                path: path.clone(),
                source: e,
            }
        })?;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_units_in_order() {
        let script = render("myapp", "1.0.0", &["kernel".into(), "myapp".into()]);
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("--start \"kernel,myapp\""));
        assert!(script.contains("releases/1.0.0/release.json"));
    }

    #[test]
    fn write_creates_executable_script() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path =
            write(dir.path(), "myapp", "1.0.0", &["kernel".into()]).expect("write launcher");
        assert!(path.ends_with("myapp"));
        let content = std::fs::read_to_string(&path).expect("read");
        assert!(content.contains("runtime-host"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o111, 0o111, "script should be executable");
        }
    }
}
