//! Collision-safe filename resolution
//!
//! On upload, a desired filename that already exists in the store is renamed
//! by deterministic suffix growth: the first collision appends `-` plus one
//! random lowercase-letter-or-digit character to the base name, and every
//! further collision appends one more character (no extra separator) until a
//! free name is found. The extension, split at the last `.`, is preserved.
//!
//! Existence is a live store query per round, so concurrent uploaders can
//! still race; the resolver only guarantees the name was free at check time.

use std::future::Future;

use rand::Rng;
use thiserror::Error;

use crate::error::StorageError;

/// Collision rounds before giving up. The candidate space grows 36x per
/// round, so this is unreachable for any realistic store; it exists to keep
/// the loop bounded.
pub const MAX_ATTEMPTS: usize = 64;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no unique name found for {desired} after {attempts} attempts")]
    Exhausted { desired: String, attempts: usize },

    #[error(transparent)]
    Backend(#[from] StorageError),
}

/// Resolve `desired` to a name not currently present in the store.
///
/// `exists` must be a fresh query against the live backend; a backend
/// failure propagates rather than being read as "does not exist". The random
/// source is injected so tests can seed it.
pub async fn resolve_unique_name<R, F, Fut>(
    desired: &str,
    mut exists: F,
    rng: &mut R,
) -> Result<String, ResolveError>
where
    R: Rng,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, StorageError>>,
{
    if !exists(desired.to_string()).await? {
        return Ok(desired.to_string());
    }

    let (mut base, ext) = split_extension(desired);
    base.push('-');

    for _ in 0..MAX_ATTEMPTS {
        base.push(random_char(rng));
        let candidate = format!("{base}{ext}");
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
    }

    Err(ResolveError::Exhausted {
        desired: desired.to_string(),
        attempts: MAX_ATTEMPTS,
    })
}

/// Split at the last `.`; the extension keeps the dot. No dot means an empty
/// extension, and an empty base stays empty.
fn split_extension(name: &str) -> (String, &str) {
    match name.rfind('.') {
        Some(idx) => (name[..idx].to_string(), &name[idx..]),
        None => (name.to_string(), ""),
    }
}

fn random_char<R: Rng>(rng: &mut R) -> char {
    ALPHABET[rng.gen_range(0..ALPHABET.len())] as char
}
