use chrono::{DateTime, Utc};

/// Issues `"{millis}-{seq}"` identities. The millisecond part never moves
/// backwards and `seq` counts up within one millisecond, so no two calls on the
/// same generator return the same identity.
#[derive(Debug, Default)]
pub struct IdentityGenerator {
    last_millis: i64,
    seq: u32,
}

impl IdentityGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(self.last_millis);
        if millis == self.last_millis {
            self.seq += 1;
        } else {
            self.last_millis = millis;
            self.seq = 0;
        }
        format!("{}-{}", self.last_millis, self.seq)
    }

    /// Moves the generator past an identity issued earlier, possibly by
    /// another process. Identities in any other format are ignored.
    pub fn observe(&mut self, identity: &str) {
        let Some((millis, seq)) = identity.split_once('-') else {
            return;
        };
        let (Ok(millis), Ok(seq)) = (millis.parse::<i64>(), seq.parse::<u32>()) else {
            return;
        };
        if (millis, seq) > (self.last_millis, self.seq) {
            self.last_millis = millis;
            self.seq = seq;
        }
    }
}
