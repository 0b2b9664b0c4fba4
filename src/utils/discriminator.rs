use sha2::{Digest, Sha256};

/// Returns the 8-byte instruction discriminator used by Anchor programs:
/// the first eight bytes of `sha256("global:<name>")`.
pub fn anchor_instruction_discriminator(name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("global:{name}").as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&digest[..8]);
    discriminator
}
