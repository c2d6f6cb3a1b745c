// ABOUTME: Shared utility functions for Project Sleep
// ABOUTME: Token generation and date helpers

use chrono::{NaiveDate, Utc};
use rand::Rng;

/// Generate an opaque bearer token (32 alphanumeric characters)
pub fn generate_token() -> String {
    const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..32)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Today's date in UTC, used as the upload date of new ROMs
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
