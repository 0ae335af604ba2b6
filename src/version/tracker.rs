//! Maximum version tracking over a sequence of link targets

use tracing::debug;

use crate::version::error::VersionError;
use crate::version::extract::extract;
use crate::version::number::Version;

/// Feed one link target into the running maximum.
///
/// Text without a version candidate leaves `current` untouched. A candidate
/// replaces `current` when it is greater, or when it is equal but spelled with
/// more components ("3.11.0" over "3.11"), so the result renders the same
/// whatever the link order.
///
/// # Errors
/// Returns [`VersionError::Parse`] when a candidate matched the extraction
/// pattern but is not a valid version (a component overflowing `u64`).
pub fn fold(current: Version, text: &str) -> Result<Version, VersionError> {
    let Some(candidate) = extract(text) else {
        return Ok(current);
    };

    debug!("Version candidate {} in {}", candidate, text);

    let candidate = Version::parse(candidate)?;
    let longer_tie =
        candidate == current && candidate.components().len() > current.components().len();
    if current.less_than(&candidate) || longer_tie {
        Ok(candidate)
    } else {
        Ok(current)
    }
}

/// Left fold of `texts` into the highest version, starting from [`Version::zero`].
pub fn track_max<I, S>(texts: I) -> Result<Version, VersionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .try_fold(Version::zero(), |current, text| fold(current, text.as_ref()))
}
