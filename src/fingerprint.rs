//! Fingerprinted output filenames.
//!
//! Every generated asset gets a filename derived from its logical name
//! (`logo-192x192.png`) plus a short hash, so browsers can cache icons forever
//! and a rebuild that changes nothing produces the same names.
//!
//! | Method | Output for `logo-192x192.png` |
//! |---|---|
//! | `name` | `logo-192x192.<8 hex of hash(salt + name)>.png` |
//! | `content` | `logo-192x192.<8 hex of hash(bytes)>.png` |
//! | `none` | `logo-192x192.png` |
//!
//! The hash function is swappable. The default is MD5 rendered as hex;
//! [`sha256_hex`] is available for callers who prefer it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Salt mixed into name-based hashes so they differ from a plain hash of the name.
const NAME_SALT: &str = "_pwa-assets";

/// Number of trailing hex characters kept from the digest.
const HASH_LEN: usize = 8;

/// Hash function: bytes in, hex string out.
pub type HashFunction = Box<dyn Fn(&[u8]) -> String + Send + Sync>;

/// Strategy used to derive the fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashMethod {
    /// Stable per logical filename.
    #[default]
    Name,
    /// Changes whenever the encoded bytes change.
    Content,
    /// No fingerprint.
    None,
}

impl HashMethod {
    pub const ALL: [&'static str; 3] = ["name", "content", "none"];
}

impl FromStr for HashMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(HashMethod::Name),
            "content" => Ok(HashMethod::Content),
            "none" => Ok(HashMethod::None),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HashMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HashMethod::Name => "name",
            HashMethod::Content => "content",
            HashMethod::None => "none",
        })
    }
}

/// MD5 digest of `bytes` as lowercase hex.
pub fn md5_hex(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

/// SHA-256 digest of `bytes` as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Derives fingerprinted filenames with a configurable default method.
pub struct Fingerprinter {
    method: HashMethod,
    hash: HashFunction,
}

impl Fingerprinter {
    pub fn new(method: HashMethod) -> Self {
        Self {
            method,
            hash: Box::new(md5_hex),
        }
    }

    pub fn method(&self) -> HashMethod {
        self.method
    }

    pub fn set_method(&mut self, method: HashMethod) {
        self.method = method;
    }

    pub fn set_hash_function(&mut self, hash: HashFunction) {
        self.hash = hash;
    }

    /// Fingerprint with the default method.
    pub fn apply(&self, logical: &str, content: &[u8]) -> String {
        self.fingerprint(logical, content, self.method)
    }

    /// Fingerprint `logical` (e.g. `favicon-32x32.png`) with an explicit method.
    ///
    /// The name is split at its last `.`; the hash goes between base and
    /// extension. A name without a dot gets the hash appended.
    pub fn fingerprint(&self, logical: &str, content: &[u8], method: HashMethod) -> String {
        let digest = match method {
            HashMethod::None => return logical.to_string(),
            HashMethod::Name => (self.hash)(format!("{NAME_SALT}{logical}").as_bytes()),
            HashMethod::Content => (self.hash)(content),
        };
        let short = last_chars(&digest, HASH_LEN);
        match logical.rsplit_once('.') {
            Some((base, ext)) => format!("{base}.{short}.{ext}"),
            None => format!("{logical}.{short}"),
        }
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new(HashMethod::default())
    }
}

impl fmt::Debug for Fingerprinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fingerprinter")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

fn last_chars(s: &str, n: usize) -> &str {
    let start = s
        .char_indices()
        .rev()
        .nth(n.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    &s[start..]
}
