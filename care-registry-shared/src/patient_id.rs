//! Patient code generation.
//!
//! A patient code is nine characters: the last two digits of the year,
//! the day of the year as three uppercase hex digits, then four random
//! characters from [`ALPHABET`]. The date prefix keeps codes roughly
//! ordered by creation date; the random tail keeps same-day codes apart.

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;

/// Characters eligible for the random tail of a patient code.
///
/// The letter `O` and the digit `0` are excluded to avoid transcription
/// mix-ups when codes are read aloud or typed.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNPQRSTUVWXYZ123456789";

/// Number of random characters after the date prefix.
const RANDOM_TAIL_LEN: usize = 4;

/// Generate a patient code for today's date.
///
/// Codes are not checked against the store for uniqueness; with a 34
/// character alphabet the random tail gives over 1.3 million same-day
/// combinations, which is ample for the expected record volume.
pub fn generate() -> String {
    generate_on(Utc::now().date_naive(), &mut rand::thread_rng())
}

/// Generate a patient code for a given date with a caller-supplied RNG.
///
/// Split out from [`generate`] so the date prefix and the alphabet can be
/// exercised deterministically.
pub fn generate_on<R: Rng>(date: NaiveDate, rng: &mut R) -> String {
    let year = date.year().rem_euclid(100);
    let mut code = format!("{:02}{:03X}", year, date.ordinal());

    for _ in 0..RANDOM_TAIL_LEN {
        let index = rng.gen_range(0..ALPHABET.len());
        code.push(ALPHABET[index] as char);
    }

    code
}
