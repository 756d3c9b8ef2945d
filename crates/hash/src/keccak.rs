// Copyright 2025 Irreducible Inc.

//! Keccak as submitted to the SHA-3 competition (round 3), before FIPS 202 changed the domain
//! separation. The padding is the plain `pad10*1` rule: a `0x01` byte after the message and the
//! top bit of the last rate byte.

use std::fmt;

use sphlib_utils::codec::{decode_u64_le, encode_u64_le_from};

use crate::{
	buffer::BlockBuffer,
	engine::{DigestCore, DigestEngine},
};

const STATE_LEN: usize = 200;
const MAX_RATE: usize = STATE_LEN - 2 * 28;

#[rustfmt::skip]
const ROUND_CONSTANTS: [u64; 24] = [
	0x0000000000000001, 0x0000000000008082, 0x800000000000808a, 0x8000000080008000,
	0x000000000000808b, 0x0000000080000001, 0x8000000080008081, 0x8000000000008009,
	0x000000000000008a, 0x0000000000000088, 0x0000000080008009, 0x000000008000000a,
	0x000000008000808b, 0x800000000000008b, 0x8000000000008089, 0x8000000000008003,
	0x8000000000008002, 0x8000000000000080, 0x000000000000800a, 0x800000008000000a,
	0x8000000080008081, 0x8000000000008080, 0x0000000080000001, 0x8000000080008008,
];

/// Rotation amounts along the rho-pi walk starting at lane 1.
const RHO: [u32; 24] = [
	1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Lane visited at each step of the rho-pi walk.
const PI: [usize; 24] = [
	10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Keccak-f\[1600\]. Lane `(x, y)` is `a[5 * y + x]`.
fn keccak_f(a: &mut [u64; 25]) {
	for &rc in &ROUND_CONSTANTS {
		// theta
		let mut c = [0u64; 5];
		for (x, cx) in c.iter_mut().enumerate() {
			*cx = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
		}
		for x in 0..5 {
			let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
			for y in 0..5 {
				a[5 * y + x] ^= d;
			}
		}

		// rho and pi
		let mut last = a[1];
		for (&j, &r) in PI.iter().zip(&RHO) {
			let tmp = a[j];
			a[j] = last.rotate_left(r);
			last = tmp;
		}

		// chi
		for y in 0..5 {
			let row = [a[5 * y], a[5 * y + 1], a[5 * y + 2], a[5 * y + 3], a[5 * y + 4]];
			for x in 0..5 {
				a[5 * y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
			}
		}

		// iota
		a[0] ^= rc;
	}
}

fn absorb(state: &mut [u64; 25], block: &[u8]) {
	for (lane, chunk) in state.iter_mut().zip(block.chunks_exact(8)) {
		*lane ^= decode_u64_le(chunk);
	}
	keccak_f(state);
}

/// Keccak sponge with capacity `2 * OUT` bytes producing `OUT` bytes (28, 32, 48 or 64).
#[derive(Debug, Clone)]
pub struct KeccakCore<const OUT: usize> {
	state: [u64; 25],
}

impl<const OUT: usize> KeccakCore<OUT> {
	const RATE: usize = match OUT {
		28 | 32 | 48 | 64 => STATE_LEN - 2 * OUT,
		_ => panic!("Keccak is defined for 28, 32, 48 and 64 byte outputs"),
	};
}

impl<const OUT: usize> Default for KeccakCore<OUT> {
	fn default() -> Self {
		Self { state: [0; 25] }
	}
}

impl<const OUT: usize> DigestCore for KeccakCore<OUT> {
	fn block_size(&self) -> usize {
		Self::RATE
	}

	fn output_size(&self) -> usize {
		OUT
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Keccak-{}", OUT * 8)
	}

	fn reset(&mut self) {
		self.state = [0; 25];
	}

	fn process_block(&mut self, block: &[u8]) {
		absorb(&mut self.state, block);
	}

	fn finalize(&mut self, buffer: &mut BlockBuffer, _block_count: u64, out: &mut [u8]) {
		let residue = buffer.flush();

		let mut block = [0u8; MAX_RATE];
		let block = &mut block[..Self::RATE];
		block[..residue.len()].copy_from_slice(residue);
		block[residue.len()] ^= 0x01;
		block[Self::RATE - 1] ^= 0x80;
		absorb(&mut self.state, block);

		let mut bytes = [0u8; STATE_LEN];
		encode_u64_le_from(&self.state, &mut bytes);
		out.copy_from_slice(&bytes[..OUT]);
	}
}

pub type Keccak224 = DigestEngine<KeccakCore<28>>;
pub type Keccak256 = DigestEngine<KeccakCore<32>>;
pub type Keccak384 = DigestEngine<KeccakCore<48>>;
pub type Keccak512 = DigestEngine<KeccakCore<64>>;
