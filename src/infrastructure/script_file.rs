use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

/// Writes the script and marks it executable. The file handle is closed
/// before the mode changes.
pub fn write_executable_script(path: &Path, contents: &str) -> Result<()> {
    {
        let script_file = File::create(path)
            .with_context(|| format!("Unable to create file: {}", path.display()))?;
        let mut script_writer = BufWriter::new(script_file);
        script_writer
            .write_all(contents.as_bytes())
            .with_context(|| format!("Unable to write file: {}", path.display()))?;
        script_writer.flush()?;
    }
    make_executable(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::{fs, os::unix::fs::PermissionsExt};

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Unable to make {} executable", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::write_executable_script;

    #[test]
    fn writes_contents_and_overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("mysqldump-db1-shop-orders");
        fs::write(&path, "stale contents that are longer than the new ones")
            .expect("stale file should be written");

        write_executable_script(&path, "#!/bin/bash\necho hi\n").expect("script should be written");

        assert_eq!(
            fs::read_to_string(&path).expect("script should be readable"),
            "#!/bin/bash\necho hi\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn marks_script_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("dump.sh");

        write_executable_script(&path, "#!/bin/bash\n").expect("script should be written");

        let mode = fs::metadata(&path)
            .expect("metadata should be readable")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn reports_unwritable_destination() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("missing").join("dump.sh");

        let error = write_executable_script(&path, "").expect_err("missing dir should fail");
        assert!(error.to_string().starts_with("Unable to create file"));
    }
}
