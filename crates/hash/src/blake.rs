// Copyright 2025 Irreducible Inc.

//! BLAKE, the SHA-3 finalist (final-round parameters: 14 rounds for the 32-bit variants, 16 for
//! the 64-bit ones).
//!
//! Unlike the plain Merkle–Damgård functions, every compression takes a counter of the message
//! bits hashed so far, and the counter of a final block that carries no message bits is zero.
//! The cores therefore keep their own counter and build the final blocks themselves from the
//! flushed residue.

use std::fmt;

use sphlib_utils::codec::{
	decode_u32_be_into, decode_u64_be_into, encode_u32_be_from, encode_u64_be_from,
};

use crate::{
	buffer::BlockBuffer,
	engine::{DigestCore, DigestEngine},
	sha2::{SHA224_IV, SHA256_IV, SHA384_IV, SHA512_IV},
};

const SMALL_BLOCK_LEN: usize = 64;
const BIG_BLOCK_LEN: usize = 128;

#[rustfmt::skip]
const SIGMA: [[usize; 16]; 10] = [
	[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
	[14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
	[11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
	[7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
	[9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
	[2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
	[12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
	[13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
	[6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
	[10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

/// Column steps then diagonal steps of one round, as `(a, b, c, d)` state indices.
const G_INDICES: [[usize; 4]; 8] = [
	[0, 4, 8, 12],
	[1, 5, 9, 13],
	[2, 6, 10, 14],
	[3, 7, 11, 15],
	[0, 5, 10, 15],
	[1, 6, 11, 12],
	[2, 7, 8, 13],
	[3, 4, 9, 14],
];

#[rustfmt::skip]
const C32: [u32; 16] = [
	0x243f6a88, 0x85a308d3, 0x13198a2e, 0x03707344, 0xa4093822, 0x299f31d0, 0x082efa98, 0xec4e6c89,
	0x452821e6, 0x38d01377, 0xbe5466cf, 0x34e90c6c, 0xc0ac29b7, 0xc97c50dd, 0x3f84d5b5, 0xb5470917,
];

#[rustfmt::skip]
const C64: [u64; 16] = [
	0x243f6a8885a308d3, 0x13198a2e03707344, 0xa4093822299f31d0, 0x082efa98ec4e6c89,
	0x452821e638d01377, 0xbe5466cf34e90c6c, 0xc0ac29b7c97c50dd, 0x3f84d5b5b5470917,
	0x9216d5d98979fb1b, 0xd1310ba698dfb5ac, 0x2ffd72dbd01adfb7, 0xb8e1afed6a267e96,
	0xba7c9045f12c7f99, 0x24a19947b3916cf7, 0x0801f2e2858efc16, 0x636920d871574e69,
];

fn compress32(state: &mut [u32; 8], block: &[u8], counter: u64) {
	let mut m = [0u32; 16];
	decode_u32_be_into(block, &mut m);

	let (t0, t1) = (counter as u32, (counter >> 32) as u32);
	let mut v = [0u32; 16];
	v[..8].copy_from_slice(state);
	v[8..12].copy_from_slice(&C32[..4]);
	v[12] = t0 ^ C32[4];
	v[13] = t0 ^ C32[5];
	v[14] = t1 ^ C32[6];
	v[15] = t1 ^ C32[7];

	for round in 0..14 {
		let sigma = &SIGMA[round % 10];
		for (i, &[a, b, c, d]) in G_INDICES.iter().enumerate() {
			let (x, y) = (sigma[2 * i], sigma[2 * i + 1]);
			v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[x] ^ C32[y]);
			v[d] = (v[d] ^ v[a]).rotate_right(16);
			v[c] = v[c].wrapping_add(v[d]);
			v[b] = (v[b] ^ v[c]).rotate_right(12);
			v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[y] ^ C32[x]);
			v[d] = (v[d] ^ v[a]).rotate_right(8);
			v[c] = v[c].wrapping_add(v[d]);
			v[b] = (v[b] ^ v[c]).rotate_right(7);
		}
	}

	// The salt is always zero.
	for (i, h) in state.iter_mut().enumerate() {
		*h ^= v[i] ^ v[i + 8];
	}
}

fn compress64(state: &mut [u64; 8], block: &[u8], counter: u128) {
	let mut m = [0u64; 16];
	decode_u64_be_into(block, &mut m);

	let (t0, t1) = (counter as u64, (counter >> 64) as u64);
	let mut v = [0u64; 16];
	v[..8].copy_from_slice(state);
	v[8..12].copy_from_slice(&C64[..4]);
	v[12] = t0 ^ C64[4];
	v[13] = t0 ^ C64[5];
	v[14] = t1 ^ C64[6];
	v[15] = t1 ^ C64[7];

	for round in 0..16 {
		let sigma = &SIGMA[round % 10];
		for (i, &[a, b, c, d]) in G_INDICES.iter().enumerate() {
			let (x, y) = (sigma[2 * i], sigma[2 * i + 1]);
			v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[x] ^ C64[y]);
			v[d] = (v[d] ^ v[a]).rotate_right(32);
			v[c] = v[c].wrapping_add(v[d]);
			v[b] = (v[b] ^ v[c]).rotate_right(25);
			v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[y] ^ C64[x]);
			v[d] = (v[d] ^ v[a]).rotate_right(16);
			v[c] = v[c].wrapping_add(v[d]);
			v[b] = (v[b] ^ v[c]).rotate_right(11);
		}
	}

	for (i, h) in state.iter_mut().enumerate() {
		*h ^= v[i] ^ v[i + 8];
	}
}

/// 32-bit BLAKE core producing `OUT` bytes (28 or 32).
#[derive(Debug, Clone)]
pub struct BlakeSmallCore<const OUT: usize> {
	state: [u32; 8],
	/// Message bits compressed so far.
	counter: u64,
}

impl<const OUT: usize> BlakeSmallCore<OUT> {
	const IV: [u32; 8] = match OUT {
		28 => SHA224_IV,
		32 => SHA256_IV,
		_ => panic!("BLAKE small core supports 28 and 32 byte outputs"),
	};
}

impl<const OUT: usize> Default for BlakeSmallCore<OUT> {
	fn default() -> Self {
		Self {
			state: Self::IV,
			counter: 0,
		}
	}
}

impl<const OUT: usize> DigestCore for BlakeSmallCore<OUT> {
	fn block_size(&self) -> usize {
		SMALL_BLOCK_LEN
	}

	fn output_size(&self) -> usize {
		OUT
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "BLAKE-{}", OUT * 8)
	}

	fn reset(&mut self) {
		self.state = Self::IV;
		self.counter = 0;
	}

	fn process_block(&mut self, block: &[u8]) {
		self.counter = self.counter.wrapping_add(8 * SMALL_BLOCK_LEN as u64);
		compress32(&mut self.state, block, self.counter);
	}

	fn finalize(&mut self, buffer: &mut BlockBuffer, _block_count: u64, out: &mut [u8]) {
		const TRAILER_POS: usize = 56;

		let residue = buffer.flush();
		let bit_len = self.counter.wrapping_add(8 * residue.len() as u64);

		let mut block = [0u8; SMALL_BLOCK_LEN];
		block[..residue.len()].copy_from_slice(residue);
		block[residue.len()] = 0x80;
		let mut counter = if residue.is_empty() { 0 } else { bit_len };

		if residue.len() >= TRAILER_POS {
			compress32(&mut self.state, &block, counter);
			block = [0u8; SMALL_BLOCK_LEN];
			counter = 0;
		}

		// BLAKE-256 closes the padding with a one bit, BLAKE-224 with a zero bit.
		if OUT == 32 {
			block[TRAILER_POS - 1] |= 0x01;
		}
		block[TRAILER_POS..].copy_from_slice(&bit_len.to_be_bytes());
		compress32(&mut self.state, &block, counter);

		encode_u32_be_from(&self.state[..OUT / 4], out);
	}
}

/// 64-bit BLAKE core producing `OUT` bytes (48 or 64).
#[derive(Debug, Clone)]
pub struct BlakeBigCore<const OUT: usize> {
	state: [u64; 8],
	counter: u128,
}

impl<const OUT: usize> BlakeBigCore<OUT> {
	const IV: [u64; 8] = match OUT {
		48 => SHA384_IV,
		64 => SHA512_IV,
		_ => panic!("BLAKE big core supports 48 and 64 byte outputs"),
	};
}

impl<const OUT: usize> Default for BlakeBigCore<OUT> {
	fn default() -> Self {
		Self {
			state: Self::IV,
			counter: 0,
		}
	}
}

impl<const OUT: usize> DigestCore for BlakeBigCore<OUT> {
	fn block_size(&self) -> usize {
		BIG_BLOCK_LEN
	}

	fn output_size(&self) -> usize {
		OUT
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "BLAKE-{}", OUT * 8)
	}

	fn reset(&mut self) {
		self.state = Self::IV;
		self.counter = 0;
	}

	fn process_block(&mut self, block: &[u8]) {
		self.counter = self.counter.wrapping_add(8 * BIG_BLOCK_LEN as u128);
		compress64(&mut self.state, block, self.counter);
	}

	fn finalize(&mut self, buffer: &mut BlockBuffer, _block_count: u64, out: &mut [u8]) {
		const TRAILER_POS: usize = 112;

		let residue = buffer.flush();
		let bit_len = self.counter.wrapping_add(8 * residue.len() as u128);

		let mut block = [0u8; BIG_BLOCK_LEN];
		block[..residue.len()].copy_from_slice(residue);
		block[residue.len()] = 0x80;
		let mut counter = if residue.is_empty() { 0 } else { bit_len };

		if residue.len() >= TRAILER_POS {
			compress64(&mut self.state, &block, counter);
			block = [0u8; BIG_BLOCK_LEN];
			counter = 0;
		}

		if OUT == 64 {
			block[TRAILER_POS - 1] |= 0x01;
		}
		block[TRAILER_POS..].copy_from_slice(&bit_len.to_be_bytes());
		compress64(&mut self.state, &block, counter);

		encode_u64_be_from(&self.state[..OUT / 8], out);
	}
}

pub type Blake224 = DigestEngine<BlakeSmallCore<28>>;
pub type Blake256 = DigestEngine<BlakeSmallCore<32>>;
pub type Blake384 = DigestEngine<BlakeBigCore<48>>;
pub type Blake512 = DigestEngine<BlakeBigCore<64>>;
