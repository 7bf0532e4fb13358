//! Shared helpers for working with `figment::Jail` in tests.
//!
//! A jail gives each test its own working directory, which suits
//! configuration files and their `source =` includes. These helpers run a
//! closure inside the jail and surface its value as an `anyhow::Result`.

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down automatically once the closure completes, even when
/// the closure returns an error.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Absolute UTF-8 path of `name` inside the jail directory.
///
/// # Errors
///
/// Returns an error when the jail directory is not valid UTF-8.
pub fn jail_path(jail: &figment::Jail, name: &str) -> figment::error::Result<Utf8PathBuf> {
    let dir = Utf8PathBuf::from_path_buf(jail.directory().to_path_buf())
        .map_err(|dir| figment_error(format!("jail is not UTF-8: {}", dir.display())))?;
    Ok(dir.join(name))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
///
/// Lets closures passed to [`with_jail`] use `?` on library errors.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers often own the error and passing by value avoids extra clones"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
