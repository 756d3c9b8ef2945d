// Copyright 2025 Irreducible Inc.

//! RIPEMD-128 and RIPEMD-160 (Dobbertin, Bosselaers, Preneel, 1996).
//!
//! Both run two parallel lines of rounds over the same block and combine them into the chaining
//! value. They share the message word selection, the rotation amounts and the boolean functions;
//! RIPEMD-160 adds a fifth word and a fifth round per line.

use std::fmt;

use sphlib_utils::codec::{decode_u32_le_into, encode_u32_le_from};

use crate::{
	buffer::BlockBuffer,
	engine::{DigestCore, DigestEngine},
};

const BLOCK_LEN: usize = 64;
const IV: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

#[rustfmt::skip]
const R_LEFT: [usize; 80] = [
	0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
	7, 4, 13, 1, 10, 6, 15, 3, 12, 0, 9, 5, 2, 14, 11, 8,
	3, 10, 14, 4, 9, 15, 8, 1, 2, 7, 0, 6, 13, 11, 5, 12,
	1, 9, 11, 10, 0, 8, 12, 4, 13, 3, 7, 15, 14, 5, 6, 2,
	4, 0, 5, 9, 7, 12, 2, 10, 14, 1, 3, 8, 11, 6, 15, 13,
];

#[rustfmt::skip]
const R_RIGHT: [usize; 80] = [
	5, 14, 7, 0, 9, 2, 11, 4, 13, 6, 15, 8, 1, 10, 3, 12,
	6, 11, 3, 7, 0, 13, 5, 10, 14, 15, 8, 12, 4, 9, 1, 2,
	15, 5, 1, 3, 7, 14, 6, 9, 11, 8, 12, 2, 10, 0, 4, 13,
	8, 6, 4, 1, 3, 11, 15, 0, 5, 12, 2, 13, 9, 7, 10, 14,
	12, 15, 10, 4, 1, 5, 8, 7, 6, 2, 13, 14, 0, 3, 9, 11,
];

#[rustfmt::skip]
const S_LEFT: [u32; 80] = [
	11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8,
	7, 6, 8, 13, 11, 9, 7, 15, 7, 12, 15, 9, 11, 7, 13, 12,
	11, 13, 6, 7, 14, 9, 13, 15, 14, 8, 13, 6, 5, 12, 7, 5,
	11, 12, 14, 15, 14, 15, 9, 8, 9, 14, 5, 6, 8, 6, 5, 12,
	9, 15, 5, 11, 6, 8, 13, 12, 5, 12, 13, 14, 11, 8, 5, 6,
];

#[rustfmt::skip]
const S_RIGHT: [u32; 80] = [
	8, 9, 9, 11, 13, 15, 15, 5, 7, 7, 8, 11, 14, 14, 12, 6,
	9, 13, 15, 7, 12, 8, 9, 11, 7, 7, 12, 7, 6, 15, 13, 11,
	9, 7, 15, 11, 8, 6, 6, 14, 12, 13, 5, 14, 13, 13, 7, 5,
	15, 5, 8, 11, 14, 14, 6, 14, 6, 9, 12, 9, 12, 5, 15, 8,
	8, 5, 12, 9, 12, 5, 14, 6, 8, 13, 6, 5, 15, 13, 11, 11,
];

const K128_LEFT: [u32; 4] = [0x00000000, 0x5a827999, 0x6ed9eba1, 0x8f1bbcdc];
const K128_RIGHT: [u32; 4] = [0x50a28be6, 0x5c4dd124, 0x6d703ef3, 0x00000000];
const K160_LEFT: [u32; 5] = [0x00000000, 0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xa953fd4e];
const K160_RIGHT: [u32; 5] = [0x50a28be6, 0x5c4dd124, 0x6d703ef3, 0x7a6d76e9, 0x00000000];

/// The boolean function of round `round` (0-based).
#[inline(always)]
fn f(round: usize, x: u32, y: u32, z: u32) -> u32 {
	match round {
		0 => x ^ y ^ z,
		1 => (x & y) | (!x & z),
		2 => (x | !y) ^ z,
		3 => (x & z) | (y & !z),
		_ => x ^ (y | !z),
	}
}

fn compress128(state: &mut [u32; 5], block: &[u8]) {
	let mut x = [0u32; 16];
	decode_u32_le_into(block, &mut x);

	let [mut al, mut bl, mut cl, mut dl, _] = *state;
	let [mut ar, mut br, mut cr, mut dr, _] = *state;
	for j in 0..64 {
		let round = j / 16;

		let t = al
			.wrapping_add(f(round, bl, cl, dl))
			.wrapping_add(x[R_LEFT[j]])
			.wrapping_add(K128_LEFT[round])
			.rotate_left(S_LEFT[j]);
		(al, bl, cl, dl) = (dl, t, bl, cl);

		let t = ar
			.wrapping_add(f(3 - round, br, cr, dr))
			.wrapping_add(x[R_RIGHT[j]])
			.wrapping_add(K128_RIGHT[round])
			.rotate_left(S_RIGHT[j]);
		(ar, br, cr, dr) = (dr, t, br, cr);
	}

	let t = state[1].wrapping_add(cl).wrapping_add(dr);
	state[1] = state[2].wrapping_add(dl).wrapping_add(ar);
	state[2] = state[3].wrapping_add(al).wrapping_add(br);
	state[3] = state[0].wrapping_add(bl).wrapping_add(cr);
	state[0] = t;
}

fn compress160(state: &mut [u32; 5], block: &[u8]) {
	let mut x = [0u32; 16];
	decode_u32_le_into(block, &mut x);

	let [mut al, mut bl, mut cl, mut dl, mut el] = *state;
	let [mut ar, mut br, mut cr, mut dr, mut er] = *state;
	for j in 0..80 {
		let round = j / 16;

		let t = al
			.wrapping_add(f(round, bl, cl, dl))
			.wrapping_add(x[R_LEFT[j]])
			.wrapping_add(K160_LEFT[round])
			.rotate_left(S_LEFT[j])
			.wrapping_add(el);
		(al, bl, cl, dl, el) = (el, t, bl, cl.rotate_left(10), dl);

		let t = ar
			.wrapping_add(f(4 - round, br, cr, dr))
			.wrapping_add(x[R_RIGHT[j]])
			.wrapping_add(K160_RIGHT[round])
			.rotate_left(S_RIGHT[j])
			.wrapping_add(er);
		(ar, br, cr, dr, er) = (er, t, br, cr.rotate_left(10), dr);
	}

	let t = state[1].wrapping_add(cl).wrapping_add(dr);
	state[1] = state[2].wrapping_add(dl).wrapping_add(er);
	state[2] = state[3].wrapping_add(el).wrapping_add(ar);
	state[3] = state[4].wrapping_add(al).wrapping_add(br);
	state[4] = state[0].wrapping_add(bl).wrapping_add(cr);
	state[0] = t;
}

/// Core of RIPEMD-`BITS`, for `BITS` of 128 or 160.
///
/// RIPEMD-128 leaves the fifth state word untouched.
#[derive(Debug, Clone)]
pub struct RipemdCore<const BITS: usize> {
	state: [u32; 5],
}

impl<const BITS: usize> RipemdCore<BITS> {
	const COMPRESS: fn(&mut [u32; 5], &[u8]) = match BITS {
		128 => compress128,
		160 => compress160,
		_ => panic!("RIPEMD is defined for 128 and 160 bit outputs"),
	};
}

impl<const BITS: usize> Default for RipemdCore<BITS> {
	fn default() -> Self {
		Self { state: IV }
	}
}

impl<const BITS: usize> DigestCore for RipemdCore<BITS> {
	fn block_size(&self) -> usize {
		BLOCK_LEN
	}

	fn output_size(&self) -> usize {
		BITS / 8
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RIPEMD-{BITS}")
	}

	fn reset(&mut self) {
		self.state = IV;
	}

	fn process_block(&mut self, block: &[u8]) {
		Self::COMPRESS(&mut self.state, block);
	}

	fn finalize(&mut self, buffer: &mut BlockBuffer, block_count: u64, out: &mut [u8]) {
		let bit_len = buffer.bit_len(block_count);
		buffer.len64_padding_le(bit_len, |block| Self::COMPRESS(&mut self.state, block));
		encode_u32_le_from(&self.state[..BITS / 32], out);
	}
}

pub type Ripemd128 = DigestEngine<RipemdCore<128>>;
pub type Ripemd160 = DigestEngine<RipemdCore<160>>;

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;
	use crate::engine::Digest;

	#[test]
	fn test_ripemd128_vectors() {
		let mut rmd = Ripemd128::new();
		assert_eq!(rmd.digest_data(b""), hex!("cdf26213a150dc3ecb610f18f6b38b46"));
		assert_eq!(rmd.digest_data(b"a"), hex!("86be7afa339d0fc7cfc785e72f578d33"));
		assert_eq!(rmd.digest_data(b"abc"), hex!("c14a12199c66e4ba84636b0f69144c77"));
		assert_eq!(rmd.digest_data(b"message digest"), hex!("9e327b3d6e523062afc1132d7df9d1b8"));
		assert_eq!(rmd.to_string(), "RIPEMD-128");
	}

	#[test]
	fn test_ripemd160_vectors() {
		let mut rmd = Ripemd160::new();
		assert_eq!(rmd.digest_data(b""), hex!("9c1185a5c5e9fc54612808977ee8f548b2258d31"));
		assert_eq!(rmd.digest_data(b"a"), hex!("0bdc9d2d256b3ee9daae347be6f4dc835a467ffe"));
		assert_eq!(rmd.digest_data(b"abc"), hex!("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"));
		assert_eq!(
			rmd.digest_data(b"message digest"),
			hex!("5d0689ef49d2fae572b881b123a85ffa21595f36")
		);
		assert_eq!(rmd.to_string(), "RIPEMD-160");
	}
}
