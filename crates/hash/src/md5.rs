// Copyright 2025 Irreducible Inc.

//! MD5 ([RFC 1321](https://www.rfc-editor.org/rfc/rfc1321)).

use std::fmt;

use lazy_static::lazy_static;
use sphlib_utils::codec::{decode_u32_le_into, encode_u32_le_from};

use crate::{
	buffer::BlockBuffer,
	engine::{DigestCore, DigestEngine},
};

const BLOCK_LEN: usize = 64;
const IV: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

const SHIFTS: [[u32; 4]; 4] = [[7, 12, 17, 22], [5, 9, 14, 20], [4, 11, 16, 23], [6, 10, 15, 21]];

lazy_static! {
	/// `T[i] = floor(2^32 * |sin(i + 1)|)`. Double precision reproduces every entry exactly.
	static ref SINE_TABLE: [u32; 64] = {
		let mut table = [0u32; 64];
		for (i, t) in table.iter_mut().enumerate() {
			*t = ((i as f64 + 1.0).sin().abs() * 4294967296.0) as u32;
		}
		table
	};
}

fn compress(state: &mut [u32; 4], block: &[u8]) {
	let mut x = [0u32; 16];
	decode_u32_le_into(block, &mut x);
	let t = &*SINE_TABLE;

	let [mut a, mut b, mut c, mut d] = *state;
	for i in 0..64 {
		let (mix, k) = match i / 16 {
			0 => ((b & c) | (!b & d), i),
			1 => ((b & d) | (c & !d), (5 * i + 1) % 16),
			2 => (b ^ c ^ d, (3 * i + 5) % 16),
			_ => (c ^ (b | !d), (7 * i) % 16),
		};
		let sum = a.wrapping_add(mix).wrapping_add(t[i]).wrapping_add(x[k]);
		(a, b, c, d) = (d, b.wrapping_add(sum.rotate_left(SHIFTS[i / 16][i % 4])), b, c);
	}

	state[0] = state[0].wrapping_add(a);
	state[1] = state[1].wrapping_add(b);
	state[2] = state[2].wrapping_add(c);
	state[3] = state[3].wrapping_add(d);
}

#[derive(Debug, Clone)]
pub struct Md5Core {
	state: [u32; 4],
}

impl Default for Md5Core {
	fn default() -> Self {
		Self { state: IV }
	}
}

impl DigestCore for Md5Core {
	fn block_size(&self) -> usize {
		BLOCK_LEN
	}

	fn output_size(&self) -> usize {
		16
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("MD5")
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

pub type Md5 = DigestEngine<Md5Core>;

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;
	use crate::engine::Digest;

	#[test]
	fn test_sine_table_endpoints() {
		assert_eq!(SINE_TABLE[0], 0xd76aa478);
		assert_eq!(SINE_TABLE[1], 0xe8c7b756);
		assert_eq!(SINE_TABLE[63], 0xeb86d391);
	}

	#[test]
	fn test_rfc1321_vectors() {
		let mut md5 = Md5::new();
		assert_eq!(md5.digest_data(b""), hex!("d41d8cd98f00b204e9800998ecf8427e"));
		assert_eq!(md5.digest_data(b"a"), hex!("0cc175b9c0f1b6a831c399e269772661"));
		assert_eq!(md5.digest_data(b"abc"), hex!("900150983cd24fb0d6963f7d28e17f72"));
		assert_eq!(md5.digest_data(b"message digest"), hex!("f96b697d7cb7938d525a2f31aaf161d0"));
		assert_eq!(
			md5.digest_data(b"abcdefghijklmnopqrstuvwxyz"),
			hex!("c3fcd3d76192e4007dfb496cca67e13b")
		);
	}
}
