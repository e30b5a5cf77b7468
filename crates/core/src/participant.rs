//! Opaque participant id generation.

use rand::Rng;

/// Characters a participant id is drawn from.
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of a participant id in characters.
pub const PARTICIPANT_ID_LEN: usize = 14;

/// Generate a new participant id.
///
/// Ids are opaque: 14 characters drawn uniformly from `[0-9a-z]`, minted
/// once at registration and carried in the session token thereafter.
pub fn generate_participant_id() -> String {
    let mut rng = rand::rng();
    (0..PARTICIPANT_ID_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
