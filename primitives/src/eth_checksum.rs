//! EIP-55 mixed-case checksum encoding.
use tiny_keccak::{Hasher, Keccak};

/// Checksums a hex encoded address, with or without a `0x` prefix.
/// The returned value is always `0x` prefixed.
pub fn checksum(address: &str) -> String {
    let address = address.trim_start_matches("0x").to_lowercase();

    let address_hash = {
        let mut hasher = Keccak::v256();
        let mut result = [0_u8; 32];

        hasher.update(address.as_bytes());
        hasher.finalize(&mut result);

        hex::encode(result)
    };

    address.chars().zip(address_hash.chars()).fold(
        String::with_capacity(42) + "0x",
        |mut acc, (address_char, hash_char)| {
            // uppercase when the nibble of the hash at this index is 8..f
            match hash_char.to_digit(16) {
                Some(nibble) if nibble > 7 => acc.extend(address_char.to_uppercase()),
                _ => acc.push(address_char),
            }

            acc
        },
    )
}
