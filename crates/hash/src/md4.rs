// Copyright 2025 Irreducible Inc.

//! MD4 ([RFC 1320](https://www.rfc-editor.org/rfc/rfc1320)).

use std::fmt;

use sphlib_utils::codec::{decode_u32_le_into, encode_u32_le_from};

use crate::{
	buffer::BlockBuffer,
	engine::{DigestCore, DigestEngine},
};

const BLOCK_LEN: usize = 64;
const IV: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

#[inline(always)]
fn f(x: u32, y: u32, z: u32) -> u32 {
	(x & y) | (!x & z)
}

#[inline(always)]
fn g(x: u32, y: u32, z: u32) -> u32 {
	(x & y) | (x & z) | (y & z)
}

#[inline(always)]
fn h(x: u32, y: u32, z: u32) -> u32 {
	x ^ y ^ z
}

fn compress(state: &mut [u32; 4], block: &[u8]) {
	let mut x = [0u32; 16];
	decode_u32_le_into(block, &mut x);

	let [mut a, mut b, mut c, mut d] = *state;

	const S1: [u32; 4] = [3, 7, 11, 19];
	for i in 0..16 {
		let t = a.wrapping_add(f(b, c, d)).wrapping_add(x[i]).rotate_left(S1[i % 4]);
		(a, b, c, d) = (d, t, b, c);
	}

	const R2: [usize; 16] = [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15];
	const S2: [u32; 4] = [3, 5, 9, 13];
	for i in 0..16 {
		let t = a
			.wrapping_add(g(b, c, d))
			.wrapping_add(x[R2[i]])
			.wrapping_add(0x5a827999)
			.rotate_left(S2[i % 4]);
		(a, b, c, d) = (d, t, b, c);
	}

	const R3: [usize; 16] = [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15];
	const S3: [u32; 4] = [3, 9, 11, 15];
	for i in 0..16 {
		let t = a
			.wrapping_add(h(b, c, d))
			.wrapping_add(x[R3[i]])
			.wrapping_add(0x6ed9eba1)
			.rotate_left(S3[i % 4]);
		(a, b, c, d) = (d, t, b, c);
	}

	state[0] = state[0].wrapping_add(a);
	state[1] = state[1].wrapping_add(b);
	state[2] = state[2].wrapping_add(c);
	state[3] = state[3].wrapping_add(d);
}

#[derive(Debug, Clone)]
pub struct Md4Core {
	state: [u32; 4],
}

impl Default for Md4Core {
	fn default() -> Self {
		Self { state: IV }
	}
}

impl DigestCore for Md4Core {
	fn block_size(&self) -> usize {
		BLOCK_LEN
	}

	fn output_size(&self) -> usize {
		16
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("MD4")
	}

	fn reset(&mut self) {
		self.state = IV;
	}

	fn process_block(&mut self, block: &[u8]) {
		compress(&mut self.state, block);
	}

	fn finalize(&mut self, buffer: &mut BlockBuffer, block_count: u64, out: &mut [u8]) {
		let bit_len = buffer.bit_len(block_count);
		buffer.len64_padding_le(bit_len, |block| compress(&mut self.state, block));
		encode_u32_le_from(&self.state, out);
	}
}

pub type Md4 = DigestEngine<Md4Core>;

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;
	use crate::engine::Digest;

	#[test]
	fn test_rfc1320_vectors() {
		let mut md4 = Md4::new();
		assert_eq!(md4.digest_data(b""), hex!("31d6cfe0d16ae931b73c59d7e0c089c0"));
		assert_eq!(md4.digest_data(b"a"), hex!("bde52cb31de33e46245e05fbdbd6fb24"));
		assert_eq!(md4.digest_data(b"abc"), hex!("a448017aaf21d8525fc10ae87aa6729d"));
		assert_eq!(md4.digest_data(b"message digest"), hex!("d9130a8164549fe818874806e1c7014b"));
		assert_eq!(
			md4.digest_data(
				b"12345678901234567890123456789012345678901234567890123456789012345678901234567890"
			),
			hex!("e33b4ddc9c38f2199c3e7b164fcc0536")
		);
	}
}
