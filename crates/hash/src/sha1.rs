// Copyright 2025 Irreducible Inc.

//! SHA-0 and SHA-1 ([FIPS 180-1](https://csrc.nist.gov/pubs/fips/180-1/final)).
//!
//! The two functions differ only in the message schedule: SHA-1 rotates each expanded word left by
//! one bit, SHA-0 does not.

use std::fmt;

use sphlib_utils::codec::{decode_u32_be_into, encode_u32_be_from};

use crate::{
	buffer::BlockBuffer,
	engine::{DigestCore, DigestEngine},
};

const BLOCK_LEN: usize = 64;
const IV: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];
const K: [u32; 4] = [0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xca62c1d6];

fn compress(state: &mut [u32; 5], block: &[u8], rotate_schedule: bool) {
	let mut w = [0u32; 80];
	decode_u32_be_into(block, &mut w[..16]);
	for i in 16..80 {
		let x = w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16];
		w[i] = if rotate_schedule { x.rotate_left(1) } else { x };
	}

	let [mut a, mut b, mut c, mut d, mut e] = *state;
	for (i, &wi) in w.iter().enumerate() {
		let f = match i / 20 {
			0 => (b & c) | (!b & d),
			2 => (b & c) | (b & d) | (c & d),
			_ => b ^ c ^ d,
		};
		let t = a
			.rotate_left(5)
			.wrapping_add(f)
			.wrapping_add(e)
			.wrapping_add(K[i / 20])
			.wrapping_add(wi);
		(a, b, c, d, e) = (t, a, b.rotate_left(30), c, d);
	}

	for (s, v) in state.iter_mut().zip([a, b, c, d, e]) {
		*s = s.wrapping_add(v);
	}
}

/// Core of SHA-1, or of SHA-0 when `SHA1` is false.
#[derive(Debug, Clone)]
pub struct Sha1Core<const SHA1: bool> {
	state: [u32; 5],
}

impl<const SHA1: bool> Default for Sha1Core<SHA1> {
	fn default() -> Self {
		Self { state: IV }
	}
}

impl<const SHA1: bool> DigestCore for Sha1Core<SHA1> {
	fn block_size(&self) -> usize {
		BLOCK_LEN
	}

	fn output_size(&self) -> usize {
		20
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(if SHA1 { "SHA-1" } else { "SHA-0" })
	}

	fn reset(&mut self) {
		self.state = IV;
	}

	fn process_block(&mut self, block: &[u8]) {
		compress(&mut self.state, block, SHA1);
	}

	fn finalize(&mut self, buffer: &mut BlockBuffer, block_count: u64, out: &mut [u8]) {
		let bit_len = buffer.bit_len(block_count);
		buffer.len64_padding_be(bit_len, |block| compress(&mut self.state, block, SHA1));
		encode_u32_be_from(&self.state, out);
	}
}

pub type Sha0 = DigestEngine<Sha1Core<false>>;
pub type Sha1 = DigestEngine<Sha1Core<true>>;

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;
	use crate::engine::Digest;

	#[test]
	fn test_sha1_vectors() {
		let mut sha1 = Sha1::new();
		assert_eq!(sha1.digest_data(b""), hex!("da39a3ee5e6b4b0d3255bfef95601890afd80709"));
		assert_eq!(sha1.digest_data(b"abc"), hex!("a9993e364706816aba3e25717850c26c9cd0d89d"));
		assert_eq!(
			sha1.digest_data(b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"),
			hex!("84983e441c3bd26ebaae4aa1f95129e5e54670f1")
		);
	}

	#[test]
	fn test_sha1_million_a() {
		let mut sha1 = Sha1::new();
		let chunk = [b'a'; 1000];
		for _ in 0..1000 {
			sha1.update(&chunk);
		}
		assert_eq!(sha1.digest(), hex!("34aa973cd4c4daa4f61eeb2bdbad27316534016f"));
	}

	#[test]
	fn test_sha0_vectors() {
		let mut sha0 = Sha0::new();
		assert_eq!(sha0.digest_data(b""), hex!("f96cea198ad1dd5617ac084a3d92c6107708c0ef"));
		assert_eq!(sha0.digest_data(b"abc"), hex!("0164b8a914cd2a5e74c4f7ff082c4d97f1edf880"));
		assert_eq!(sha0.to_string(), "SHA-0");
	}
}
