use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifier of a published card; the last path segment of `/card/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId(s.to_string())
    }
}

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

/// Mints card ids of the form `<unix millis>-<sequence><random>`.
///
/// The millisecond prefix keeps ids sortable by send time. The per-session
/// sequence makes two ids minted in the same millisecond differ even before
/// the random suffix is considered.
#[derive(Debug, Default)]
pub struct CardIdMinter {
    last_millis: i64,
    sequence: u32,
}

impl CardIdMinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint<R: Rng + ?Sized>(&mut self, now: DateTime<Utc>, rng: &mut R) -> CardId {
        let millis = now.timestamp_millis().max(self.last_millis);
        if millis == self.last_millis {
            self.sequence += 1;
        } else {
            self.last_millis = millis;
            self.sequence = 0;
        }
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();
        CardId(format!("{millis}-{:x}{suffix}", self.sequence))
    }
}

/// Whether `s` could have been produced by [`CardIdMinter`] or by the older
/// plain-timestamp scheme. Used to reject junk route segments early.
pub fn looks_like_card_id(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 64
        && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::mock::StepRng;

    #[test]
    fn same_millisecond_ids_differ() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut rng = StepRng::new(0, 0);
        let mut minter = CardIdMinter::new();
        let a = minter.mint(now, &mut rng);
        let b = minter.mint(now, &mut rng);
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("1700000000000-"));
    }

    #[test]
    fn clock_going_backwards_keeps_ids_increasing() {
        let mut rng = rand::thread_rng();
        let mut minter = CardIdMinter::new();
        let later = Utc.timestamp_millis_opt(1_700_000_000_500).unwrap();
        let earlier = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let a = minter.mint(later, &mut rng);
        let b = minter.mint(earlier, &mut rng);
        assert_ne!(a, b);
        assert!(b.as_str().starts_with("1700000000500-1"));
    }

    #[test]
    fn minted_ids_look_like_card_ids() {
        let mut minter = CardIdMinter::new();
        let id = minter.mint(Utc::now(), &mut rand::thread_rng());
        assert!(looks_like_card_id(id.as_str()));
        assert!(looks_like_card_id("1700000000000"));
        assert!(!looks_like_card_id(""));
        assert!(!looks_like_card_id("../etc"));
    }
}
