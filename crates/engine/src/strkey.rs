//! Stellar strkey codec.
//!
//! A strkey is `version_byte || payload || crc16` encoded as unpadded,
//! upper-case RFC 4648 base32. For ed25519 keys the payload is 32 bytes, so
//! the raw form is 35 bytes and the text form exactly 56 characters.
//!
//! Follows the SEP-23 strkey rules for `G` account ids and `S` secret seeds.

use thiserror::Error;

/// Length of an ed25519 key payload.
pub const PAYLOAD_LEN: usize = 32;

/// Raw length: version byte + payload + 2 checksum bytes.
const RAW_LEN: usize = 1 + PAYLOAD_LEN + 2;

/// Encoded length of an ed25519 strkey (35 bytes * 8 / 5).
pub const ENCODED_LEN: usize = 56;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Strkey kinds this service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VersionByte {
    /// Public account id, renders with a `G` prefix.
    AccountId = 6 << 3,
    /// Secret seed, renders with an `S` prefix.
    SecretSeed = 18 << 3,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrkeyError {
    #[error("strkey must be 56 characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid base32 character {0:?}")]
    InvalidCharacter(char),

    #[error("unexpected version byte {actual:#04x}, expected {expected:#04x}")]
    InvalidVersionByte { expected: u8, actual: u8 },

    #[error("checksum mismatch")]
    InvalidChecksum,
}

/// Encode a 32-byte payload as a strkey of the given kind.
pub fn encode(version: VersionByte, payload: &[u8; PAYLOAD_LEN]) -> String {
    let mut raw = Vec::with_capacity(RAW_LEN);
    raw.push(version as u8);
    raw.extend_from_slice(payload);
    let checksum = crc16_xmodem(&raw);
    raw.extend_from_slice(&checksum.to_le_bytes());
    base32_encode(&raw)
}

/// Decode a strkey, requiring the given kind, and return its payload.
pub fn decode(expected: VersionByte, encoded: &str) -> Result<[u8; PAYLOAD_LEN], StrkeyError> {
    if encoded.len() != ENCODED_LEN {
        return Err(StrkeyError::InvalidLength(encoded.len()));
    }

    let raw = base32_decode(encoded)?;

    let version = raw[0];
    if version != expected as u8 {
        return Err(StrkeyError::InvalidVersionByte {
            expected: expected as u8,
            actual: version,
        });
    }

    let (body, checksum) = raw.split_at(RAW_LEN - 2);
    let actual = u16::from_le_bytes([checksum[0], checksum[1]]);
    if crc16_xmodem(body) != actual {
        return Err(StrkeyError::InvalidChecksum);
    }

    let mut payload = [0u8; PAYLOAD_LEN];
    payload.copy_from_slice(&body[1..]);
    Ok(payload)
}

/// CRC16-XModem: polynomial 0x1021, initial value 0, no reflection.
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(5) * 8);
    let mut buffer: u32 = 0;
    let mut bits = 0;

    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

/// Decode unpadded base32. Callers check the length first: 56 symbols are
/// exactly 35 bytes, with no trailing bits.
fn base32_decode(encoded: &str) -> Result<Vec<u8>, StrkeyError> {
    let mut out = Vec::with_capacity(encoded.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0;

    for c in encoded.chars() {
        let value = match c {
            'A'..='Z' => c as u32 - 'A' as u32,
            '2'..='7' => c as u32 - '2' as u32 + 26,
            _ => return Err(StrkeyError::InvalidCharacter(c)),
        };
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
    }
    Ok(out)
}
