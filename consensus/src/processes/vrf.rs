use blake2b_simd::Params;
use zkarchive_core::warn;

pub const VRF_DIGEST_SIZE: usize = 32;

/// Blake2b-256 digest of a block producer's VRF output, ordered byte-lexicographically
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VrfDigest([u8; VRF_DIGEST_SIZE]);

impl VrfDigest {
    /// Digests the hex decoded bytes of `vrf_output`. Archive data is trusted, so a value which is
    /// not valid hex is digested as raw bytes instead of failing the comparison.
    pub fn from_vrf_output(vrf_output: &str) -> Self {
        let bytes = decode_hex(vrf_output).unwrap_or_else(|| {
            warn!("VRF output '{}' is not valid hex, digesting its raw bytes", vrf_output);
            vrf_output.as_bytes().to_vec()
        });
        let hash = Params::new().hash_length(VRF_DIGEST_SIZE).hash(&bytes);
        let mut digest = [0u8; VRF_DIGEST_SIZE];
        digest.copy_from_slice(hash.as_bytes());
        Self(digest)
    }

    pub fn as_bytes(&self) -> &[u8; VRF_DIGEST_SIZE] {
        &self.0
    }
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    let mut bytes = vec![0u8; hex.len() / 2];
    faster_hex::hex_decode(hex.as_bytes(), &mut bytes).ok()?;
    Some(bytes)
}
