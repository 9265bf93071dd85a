//! Object ids for quests, conditions and reward items
//!
//! Ids are 24 lowercase hex digits, the same shape as template ids in the
//! item database. They are drawn from the injected random source so a seeded
//! generation produces the same ids every time.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

static OBJECT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-f]{24}$").expect("object id pattern is valid"));

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Generate a new 24-hex-digit object id
pub fn new_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..24)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect()
}

/// Check that `id` has the shape of an object/template id
#[inline]
pub fn is_object_id(id: &str) -> bool {
    OBJECT_ID.is_match(id)
}
