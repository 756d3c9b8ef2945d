// Copyright 2025 Irreducible Inc.

//! [Grøstl](https://www.groestl.info/Groestl.pdf), the SHA-3 finalist.
//!
//! The state is a byte matrix with eight rows, stored column by column so that message byte `k`
//! lands in column `k / 8`, row `k % 8`. The 224/256 variants use eight columns (a 512-bit state),
//! the 384/512 variants sixteen. Unlike the MD-family cores, the padding trailer counts blocks, not
//! bits.

mod table;
#[cfg(test)]
mod tests;

use std::fmt;

use table::{xtime, SBOX};

use crate::{
	buffer::BlockBuffer,
	engine::{DigestCore, DigestEngine},
};

type Column = [u8; 8];

const P_SHIFTS_512: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
const Q_SHIFTS_512: [usize; 8] = [1, 3, 5, 7, 0, 2, 4, 6];
const P_SHIFTS_1024: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 11];
const Q_SHIFTS_1024: [usize; 8] = [1, 3, 5, 11, 0, 2, 4, 6];

/// First row of the circulant MixBytes matrix.
const MIX_ROW: [u8; 8] = [2, 2, 3, 4, 5, 3, 5, 7];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Permutation {
	P,
	Q,
}

/// `c * a` for the few constants appearing in [`MIX_ROW`], given `a2 = 2a` and `a4 = 4a`.
#[inline(always)]
fn mul_small(c: u8, a: u8, a2: u8, a4: u8) -> u8 {
	match c {
		2 => a2,
		3 => a2 ^ a,
		4 => a4,
		5 => a4 ^ a,
		7 => a4 ^ a2 ^ a,
		_ => unreachable!("MixBytes coefficients are fixed"),
	}
}

fn mix_column(column: &mut Column) {
	let a = *column;
	let a2 = a.map(xtime);
	let a4 = a2.map(xtime);
	for (i, out) in column.iter_mut().enumerate() {
		*out = (0..8).fold(0, |acc, j| {
			acc ^ mul_small(MIX_ROW[(j + 8 - i) % 8], a[j], a2[j], a4[j])
		});
	}
}

fn permute<const COLS: usize>(state: &mut [Column; COLS], perm: Permutation) {
	let (rounds, shifts) = match (COLS, perm) {
		(8, Permutation::P) => (10, P_SHIFTS_512),
		(8, Permutation::Q) => (10, Q_SHIFTS_512),
		(16, Permutation::P) => (14, P_SHIFTS_1024),
		(16, Permutation::Q) => (14, Q_SHIFTS_1024),
		_ => unreachable!("Grøstl states have 8 or 16 columns"),
	};

	for round in 0..rounds as u8 {
		// AddRoundConstant
		for (col, column) in state.iter_mut().enumerate() {
			let constant = ((col as u8) << 4) ^ round;
			match perm {
				Permutation::P => column[0] ^= constant,
				Permutation::Q => {
					for byte in column.iter_mut() {
						*byte ^= 0xff;
					}
					column[7] ^= constant;
				}
			}
		}

		// SubBytes and ShiftBytes
		let prev = *state;
		for (col, column) in state.iter_mut().enumerate() {
			for (row, byte) in column.iter_mut().enumerate() {
				*byte = SBOX[prev[(col + shifts[row]) % COLS][row] as usize];
			}
		}

		// MixBytes
		for column in state.iter_mut() {
			mix_column(column);
		}
	}
}

fn xor_into<const COLS: usize>(dst: &mut [Column; COLS], src: &[Column; COLS]) {
	for (d, s) in dst.iter_mut().zip(src) {
		for (x, y) in d.iter_mut().zip(s) {
			*x ^= y;
		}
	}
}

fn state_from_bytes<const COLS: usize>(bytes: &[u8]) -> [Column; COLS] {
	let mut state = [[0u8; 8]; COLS];
	for (column, chunk) in state.iter_mut().zip(bytes.chunks_exact(8)) {
		column.copy_from_slice(chunk);
	}
	state
}

/// `h <- P(h ^ m) ^ Q(m) ^ h`
fn compress<const COLS: usize>(h: &mut [Column; COLS], block: &[u8]) {
	let m = state_from_bytes::<COLS>(block);

	let mut p_in = *h;
	xor_into(&mut p_in, &m);
	permute(&mut p_in, Permutation::P);

	let mut q_in = m;
	permute(&mut q_in, Permutation::Q);

	xor_into(h, &p_in);
	xor_into(h, &q_in);
}

/// Grøstl core with a `COLS`-column state (8 or 16) producing `OUT` bytes.
#[derive(Debug, Clone)]
pub struct GroestlCore<const COLS: usize, const OUT: usize> {
	state: [Column; COLS],
}

impl<const COLS: usize, const OUT: usize> GroestlCore<COLS, OUT> {
	const BLOCK_LEN: usize = 8 * COLS;

	/// The initial value encodes the output length in bits in its last bytes.
	fn initial_state() -> [Column; COLS] {
		let mut state = [[0u8; 8]; COLS];
		state[COLS - 1][6..].copy_from_slice(&((8 * OUT) as u16).to_be_bytes());
		state
	}
}

impl<const COLS: usize, const OUT: usize> Default for GroestlCore<COLS, OUT> {
	fn default() -> Self {
		Self {
			state: Self::initial_state(),
		}
	}
}

impl<const COLS: usize, const OUT: usize> DigestCore for GroestlCore<COLS, OUT> {
	fn block_size(&self) -> usize {
		Self::BLOCK_LEN
	}

	fn output_size(&self) -> usize {
		OUT
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Groestl-{}", OUT * 8)
	}

	fn reset(&mut self) {
		self.state = Self::initial_state();
	}

	fn process_block(&mut self, block: &[u8]) {
		compress(&mut self.state, block);
	}

	fn finalize(&mut self, buffer: &mut BlockBuffer, block_count: u64, out: &mut [u8]) {
		// The trailer counts the padding blocks too.
		let blocks_len = if buffer.remaining() <= 8 {
			block_count.wrapping_add(2)
		} else {
			block_count.wrapping_add(1)
		};
		buffer.len64_padding_be(blocks_len, |block| compress(&mut self.state, block));

		let mut res = self.state;
		permute(&mut res, Permutation::P);
		xor_into(&mut res, &self.state);

		// The digest is the tail of the state.
		let tail = res.iter().flatten().skip(Self::BLOCK_LEN - OUT);
		for (o, &b) in out.iter_mut().zip(tail) {
			*o = b;
		}
	}
}

pub type Groestl224 = DigestEngine<GroestlCore<8, 28>>;
pub type Groestl256 = DigestEngine<GroestlCore<8, 32>>;
pub type Groestl384 = DigestEngine<GroestlCore<16, 48>>;
pub type Groestl512 = DigestEngine<GroestlCore<16, 64>>;
