use rand::Rng;

/// Returns a copy of `data` with exactly one bit flipped at a random position
pub fn tamper_bytes(rng: &mut impl Rng, data: &[u8]) -> Vec<u8> {
    let mut tampered = data.to_vec();
    let bit_idx = rng.random_range(0..tampered.len() * 8);
    tampered[bit_idx / 8] ^= 1 << (bit_idx % 8);
    tampered
}
