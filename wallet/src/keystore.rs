//! Secret key files.
//!
//! A key file holds one line: the 32-byte secret key as 64 hex characters.
//! Files written here are created with mode `0600` on Unix. Reading accepts
//! the 64-byte seed‖public form too, and ignores surrounding whitespace.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use zeroize::Zeroizing;

use physicscoin_protocol::crypto::{Keypair, SecretKey};

/// Writes `secret` to `path`. Refuses to replace an existing file unless
/// `force` is set.
///
/// A write that fails part-way removes the file again, so a truncated key is
/// never left where [`read_key_file`] would find it.
pub fn write_key_file(path: &Path, secret: &SecretKey, force: bool) -> Result<()> {
    let hex = Zeroizing::new(format!("{}\n", secret.to_hex().as_str()));
    write_new_file(path, force, |file| file.write_all(hex.as_bytes()))?;
    tracing::debug!(path = %path.display(), "key file written");
    Ok(())
}

fn write_new_file(
    path: &Path,
    force: bool,
    write: impl FnOnce(&mut File) -> io::Result<()>,
) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("failed to create key file {}", path.display()))?;

    let written = write(&mut file).and_then(|_| file.sync_all());
    drop(file);
    if let Err(err) = written {
        if let Err(cleanup) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %cleanup, "could not remove partial key file");
        }
        return Err(err).with_context(|| format!("failed to write key file {}", path.display()));
    }

    // `mode` only applies on creation; a forced overwrite keeps the old
    // permissions unless they are reset.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

/// Loads the keypair stored in `path`.
pub fn read_key_file(path: &Path) -> Result<Keypair> {
    let contents = Zeroizing::new(
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read key file {}", path.display()))?,
    );
    Keypair::from_secret_key_hex(contents.trim())
        .with_context(|| format!("key file {} does not hold a valid secret key", path.display()))
}
