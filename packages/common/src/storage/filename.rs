//! Filename sanitization and storage-name generation for untrusted uploads.

use uuid::Uuid;

use super::error::StorageError;

/// Maximum length of a sanitized filename, in characters.
pub const MAX_FILENAME_CHARS: usize = 255;

/// Maximum length of a single path component on common filesystems, in bytes.
const NAME_MAX_BYTES: usize = 255;

/// Characters replaced with `_` before a name touches the filesystem.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Sanitizes an untrusted filename and checks its extension against `allowed`.
///
/// `allowed` holds lowercase extensions without the leading dot. The returned
/// name keeps the extension exactly as the client spelled it.
pub fn sanitize_filename(original: &str, allowed: &[String]) -> Result<String, StorageError> {
    if original.trim().is_empty() {
        return Err(StorageError::InvalidInput("Filename cannot be empty".into()));
    }

    let replaced: String = original
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let collapsed = collapse_dots(&replaced);
    let cleaned: String = collapsed
        .trim()
        .chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect();

    let (stem, ext) = split_extension(&cleaned)
        .ok_or_else(|| StorageError::InvalidInput("Filename must have an extension".into()))?;

    let ext_lower = ext.to_lowercase();
    if !allowed.iter().any(|a| *a == ext_lower) {
        return Err(StorageError::InvalidInput(format!(
            "File type '.{ext_lower}' is not allowed"
        )));
    }

    if stem.trim().is_empty() {
        return Err(StorageError::InvalidInput(
            "Filename must have a name before the extension".into(),
        ));
    }

    fit_name(stem, ext, MAX_FILENAME_CHARS, |_| 1)
}

/// Builds `{id}_{sanitized}` from an already sanitized name.
///
/// The stem is shortened further when the combined name would not fit in a
/// single filesystem path component.
pub fn storage_name_for(id: Uuid, sanitized: &str) -> Result<String, StorageError> {
    let prefix = format!("{id}_");
    let (stem, ext) = split_extension(sanitized)
        .ok_or_else(|| StorageError::InvalidInput("Filename must have an extension".into()))?;
    let name = fit_name(
        stem,
        ext,
        NAME_MAX_BYTES.saturating_sub(prefix.len()),
        char::len_utf8,
    )?;
    Ok(format!("{prefix}{name}"))
}

/// Sanitizes `original` and prefixes it with a fresh random identifier.
pub fn make_storage_name(original: &str, allowed: &[String]) -> Result<String, StorageError> {
    let sanitized = sanitize_filename(original, allowed)?;
    storage_name_for(Uuid::new_v4(), &sanitized)
}

/// Splits `name` at its last dot. Returns `None` if there is no non-empty extension.
pub fn split_extension(name: &str) -> Option<(&str, &str)> {
    let (stem, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some((stem, ext))
}

/// Replaces every run of two or more dots with a single dot.
fn collapse_dots(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_dot = false;
    for c in name.chars() {
        if c == '.' {
            if prev_dot {
                continue;
            }
            prev_dot = true;
        } else {
            prev_dot = false;
        }
        out.push(c);
    }
    out
}

/// Joins `stem` and `ext`, shortening the stem until the name measures at most `limit`.
///
/// `unit` gives the cost of one character. A shortened stem never ends in a dot
/// or whitespace, so cutting cannot produce `..` in front of the extension.
fn fit_name(
    stem: &str,
    ext: &str,
    limit: usize,
    unit: fn(char) -> usize,
) -> Result<String, StorageError> {
    let measure = |s: &str| s.chars().map(unit).sum::<usize>();
    if measure(stem) + 1 + measure(ext) <= limit {
        return Ok(format!("{stem}.{ext}"));
    }

    let budget = limit.saturating_sub(measure(ext) + 1);
    let mut used = 0;
    let mut end = 0;
    for (idx, c) in stem.char_indices() {
        let cost = unit(c);
        if used + cost > budget {
            break;
        }
        used += cost;
        end = idx + c.len_utf8();
    }

    let shortened = stem[..end].trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    if shortened.is_empty() {
        return Err(StorageError::InvalidInput("Filename is too long".into()));
    }
    Ok(format!("{shortened}.{ext}"))
}
