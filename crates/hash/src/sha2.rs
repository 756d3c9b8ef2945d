// Copyright 2025 Irreducible Inc.

//! The SHA-2 family ([FIPS 180-4](https://csrc.nist.gov/pubs/fips/180-4/upd1/final)).
//!
//! SHA-224 and SHA-256 share the 32-bit core, SHA-384 and SHA-512 the 64-bit core. Within a core,
//! variants differ only in the initial value and in how many output words are kept.

use std::fmt;

use sphlib_utils::codec::{
	decode_u32_be_into, decode_u64_be_into, encode_u32_be_from, encode_u64_be_from,
};

use crate::{
	buffer::BlockBuffer,
	engine::{DigestCore, DigestEngine},
};

#[rustfmt::skip]
const K32: [u32; 64] = [
	0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
	0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
	0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
	0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
	0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
	0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
	0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
	0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

#[rustfmt::skip]
const K64: [u64; 80] = [
	0x428a2f98d728ae22, 0x7137449123ef65cd, 0xb5c0fbcfec4d3b2f, 0xe9b5dba58189dbbc,
	0x3956c25bf348b538, 0x59f111f1b605d019, 0x923f82a4af194f9b, 0xab1c5ed5da6d8118,
	0xd807aa98a3030242, 0x12835b0145706fbe, 0x243185be4ee4b28c, 0x550c7dc3d5ffb4e2,
	0x72be5d74f27b896f, 0x80deb1fe3b1696b1, 0x9bdc06a725c71235, 0xc19bf174cf692694,
	0xe49b69c19ef14ad2, 0xefbe4786384f25e3, 0x0fc19dc68b8cd5b5, 0x240ca1cc77ac9c65,
	0x2de92c6f592b0275, 0x4a7484aa6ea6e483, 0x5cb0a9dcbd41fbd4, 0x76f988da831153b5,
	0x983e5152ee66dfab, 0xa831c66d2db43210, 0xb00327c898fb213f, 0xbf597fc7beef0ee4,
	0xc6e00bf33da88fc2, 0xd5a79147930aa725, 0x06ca6351e003826f, 0x142929670a0e6e70,
	0x27b70a8546d22ffc, 0x2e1b21385c26c926, 0x4d2c6dfc5ac42aed, 0x53380d139d95b3df,
	0x650a73548baf63de, 0x766a0abb3c77b2a8, 0x81c2c92e47edaee6, 0x92722c851482353b,
	0xa2bfe8a14cf10364, 0xa81a664bbc423001, 0xc24b8b70d0f89791, 0xc76c51a30654be30,
	0xd192e819d6ef5218, 0xd69906245565a910, 0xf40e35855771202a, 0x106aa07032bbd1b8,
	0x19a4c116b8d2d0c8, 0x1e376c085141ab53, 0x2748774cdf8eeb99, 0x34b0bcb5e19b48a8,
	0x391c0cb3c5c95a63, 0x4ed8aa4ae3418acb, 0x5b9cca4f7763e373, 0x682e6ff3d6b2b8a3,
	0x748f82ee5defb2fc, 0x78a5636f43172f60, 0x84c87814a1f0ab72, 0x8cc702081a6439ec,
	0x90befffa23631e28, 0xa4506cebde82bde9, 0xbef9a3f7b2c67915, 0xc67178f2e372532b,
	0xca273eceea26619c, 0xd186b8c721c0c207, 0xeada7dd6cde0eb1e, 0xf57d4f7fee6ed178,
	0x06f067aa72176fba, 0x0a637dc5a2c898a6, 0x113f9804bef90dae, 0x1b710b35131c471b,
	0x28db77f523047d84, 0x32caab7b40c72493, 0x3c9ebe0a15c9bebc, 0x431d67c49c100d4c,
	0x4cc5d4becb3e42b6, 0x597f299cfc657e2a, 0x5fcb6fab3ad6faec, 0x6c44198c4a475817,
];

pub(crate) const SHA224_IV: [u32; 8] = [
	0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7, 0xbefa4fa4,
];
pub(crate) const SHA256_IV: [u32; 8] = [
	0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];
pub(crate) const SHA384_IV: [u64; 8] = [
	0xcbbb9d5dc1059ed8,
	0x629a292a367cd507,
	0x9159015a3070dd17,
	0x152fecd8f70e5939,
	0x67332667ffc00b31,
	0x8eb44a8768581511,
	0xdb0c2e0d64f98fa7,
	0x47b5481dbefa4fa4,
];
pub(crate) const SHA512_IV: [u64; 8] = [
	0x6a09e667f3bcc908,
	0xbb67ae8584caa73b,
	0x3c6ef372fe94f82b,
	0xa54ff53a5f1d36f1,
	0x510e527fade682d1,
	0x9b05688c2b3e6c1f,
	0x1f83d9abfb41bd6b,
	0x5be0cd19137e2179,
];

fn compress256(state: &mut [u32; 8], block: &[u8]) {
	let mut w = [0u32; 64];
	decode_u32_be_into(block, &mut w[..16]);
	for i in 16..64 {
		let s0 = w[i - 15].rotate_right(7) ^ w[i - 15].rotate_right(18) ^ (w[i - 15] >> 3);
		let s1 = w[i - 2].rotate_right(17) ^ w[i - 2].rotate_right(19) ^ (w[i - 2] >> 10);
		w[i] = w[i - 16]
			.wrapping_add(s0)
			.wrapping_add(w[i - 7])
			.wrapping_add(s1);
	}

	let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
	for i in 0..64 {
		let big_s1 = e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25);
		let ch = (e & f) ^ (!e & g);
		let t1 = h
			.wrapping_add(big_s1)
			.wrapping_add(ch)
			.wrapping_add(K32[i])
			.wrapping_add(w[i]);
		let big_s0 = a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22);
		let maj = (a & b) ^ (a & c) ^ (b & c);
		let t2 = big_s0.wrapping_add(maj);
		(a, b, c, d, e, f, g, h) = (t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g);
	}

	for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
		*s = s.wrapping_add(v);
	}
}

fn compress512(state: &mut [u64; 8], block: &[u8]) {
	let mut w = [0u64; 80];
	decode_u64_be_into(block, &mut w[..16]);
	for i in 16..80 {
		let s0 = w[i - 15].rotate_right(1) ^ w[i - 15].rotate_right(8) ^ (w[i - 15] >> 7);
		let s1 = w[i - 2].rotate_right(19) ^ w[i - 2].rotate_right(61) ^ (w[i - 2] >> 6);
		w[i] = w[i - 16]
			.wrapping_add(s0)
			.wrapping_add(w[i - 7])
			.wrapping_add(s1);
	}

	let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
	for i in 0..80 {
		let big_s1 = e.rotate_right(14) ^ e.rotate_right(18) ^ e.rotate_right(41);
		let ch = (e & f) ^ (!e & g);
		let t1 = h
			.wrapping_add(big_s1)
			.wrapping_add(ch)
			.wrapping_add(K64[i])
			.wrapping_add(w[i]);
		let big_s0 = a.rotate_right(28) ^ a.rotate_right(34) ^ a.rotate_right(39);
		let maj = (a & b) ^ (a & c) ^ (b & c);
		let t2 = big_s0.wrapping_add(maj);
		(a, b, c, d, e, f, g, h) = (t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g);
	}

	for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
		*s = s.wrapping_add(v);
	}
}

/// 32-bit SHA-2 core producing `OUT` bytes (28 or 32).
#[derive(Debug, Clone)]
pub struct Sha2SmallCore<const OUT: usize> {
	state: [u32; 8],
}

impl<const OUT: usize> Sha2SmallCore<OUT> {
	const BLOCK_LEN: usize = 64;
	const IV: [u32; 8] = match OUT {
		28 => SHA224_IV,
		32 => SHA256_IV,
		_ => panic!("SHA-2 small core supports 28 and 32 byte outputs"),
	};
}

impl<const OUT: usize> Default for Sha2SmallCore<OUT> {
	fn default() -> Self {
		Self { state: Self::IV }
	}
}

impl<const OUT: usize> DigestCore for Sha2SmallCore<OUT> {
	fn block_size(&self) -> usize {
		Self::BLOCK_LEN
	}

	fn output_size(&self) -> usize {
		OUT
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SHA-{}", OUT * 8)
	}

	fn reset(&mut self) {
		self.state = Self::IV;
	}

	fn process_block(&mut self, block: &[u8]) {
		compress256(&mut self.state, block);
	}

	fn finalize(&mut self, buffer: &mut BlockBuffer, block_count: u64, out: &mut [u8]) {
		let bit_len = buffer.bit_len(block_count);
		buffer.len64_padding_be(bit_len, |block| compress256(&mut self.state, block));
		encode_u32_be_from(&self.state[..OUT / 4], out);
	}
}

/// 64-bit SHA-2 core producing `OUT` bytes (48 or 64).
#[derive(Debug, Clone)]
pub struct Sha2BigCore<const OUT: usize> {
	state: [u64; 8],
}

impl<const OUT: usize> Sha2BigCore<OUT> {
	const BLOCK_LEN: usize = 128;
	const IV: [u64; 8] = match OUT {
		48 => SHA384_IV,
		64 => SHA512_IV,
		_ => panic!("SHA-2 big core supports 48 and 64 byte outputs"),
	};
}

impl<const OUT: usize> Default for Sha2BigCore<OUT> {
	fn default() -> Self {
		Self { state: Self::IV }
	}
}

impl<const OUT: usize> DigestCore for Sha2BigCore<OUT> {
	fn block_size(&self) -> usize {
		Self::BLOCK_LEN
	}

	fn output_size(&self) -> usize {
		OUT
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SHA-{}", OUT * 8)
	}

	fn reset(&mut self) {
		self.state = Self::IV;
	}

	fn process_block(&mut self, block: &[u8]) {
		compress512(&mut self.state, block);
	}

	fn finalize(&mut self, buffer: &mut BlockBuffer, block_count: u64, out: &mut [u8]) {
		// The 128-bit length field is exact: the block counter only wraps after 2^64 blocks.
		let bit_len = buffer.bit_len_u128(block_count);
		buffer.len128_padding_be(bit_len, |block| compress512(&mut self.state, block));
		encode_u64_be_from(&self.state[..OUT / 8], out);
	}
}

pub type Sha224 = DigestEngine<Sha2SmallCore<28>>;
pub type Sha256 = DigestEngine<Sha2SmallCore<32>>;
pub type Sha384 = DigestEngine<Sha2BigCore<48>>;
pub type Sha512 = DigestEngine<Sha2BigCore<64>>;

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;
	use crate::engine::Digest;

	const TWO_BLOCK_MSG: &[u8] = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";

	#[test]
	fn test_sha224_vectors() {
		let mut sha = Sha224::new();
		assert_eq!(
			sha.digest_data(b""),
			hex!("d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f")
		);
		assert_eq!(
			sha.digest_data(b"abc"),
			hex!("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7")
		);
		assert_eq!(
			sha.digest_data(TWO_BLOCK_MSG),
			hex!("75388b16512776cc5dba5da1fd890150b0c6455cb4f58b1952522525")
		);
	}

	#[test]
	fn test_sha256_vectors() {
		let mut sha = Sha256::new();
		assert_eq!(
			sha.digest_data(b""),
			hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
		);
		assert_eq!(
			sha.digest_data(b"abc"),
			hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
		);
		assert_eq!(
			sha.digest_data(TWO_BLOCK_MSG),
			hex!("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1")
		);
	}

	#[test]
	fn test_sha384_vectors() {
		let mut sha = Sha384::new();
		assert_eq!(
			sha.digest_data(b""),
			hex!(
				"38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da"
				"274edebfe76f65fbd51ad2f14898b95b"
			)
		);
		assert_eq!(
			sha.digest_data(b"abc"),
			hex!(
				"cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed"
				"8086072ba1e7cc2358baeca134c825a7"
			)
		);
	}

	#[test]
	fn test_sha512_vectors() {
		let mut sha = Sha512::new();
		assert_eq!(
			sha.digest_data(b""),
			hex!(
				"cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce"
				"47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
			)
		);
		assert_eq!(
			sha.digest_data(b"abc"),
			hex!(
				"ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a"
				"2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
			)
		);
	}

	#[test]
	fn test_names() {
		assert_eq!(Sha224::new().to_string(), "SHA-224");
		assert_eq!(Sha512::new().to_string(), "SHA-512");
	}
}
