// Copyright 2025 Irreducible Inc.

use std::{fmt, num::NonZeroUsize};

use hex_literal::hex;
use proptest::prelude::*;
use rand::{rngs::StdRng, RngCore, SeedableRng};
use sphlib_hash::{
	Algorithm, BlockBuffer, BlockLength, Digest, DigestCore, DigestEngine, Groestl256, Hmac,
	Sha256,
};

#[test]
fn test_groestl256_multi_update() {
	let expected = hex!("8c7ad62eb26a21297bc39c2d7293b4bd4d3399fa8afab29e970471739e28b301");

	let mut hasher = Groestl256::new();
	hasher.update(b"The quick brown fox jumps over the lazy dog");
	assert_eq!(hasher.digest(), expected);

	hasher.update(b"The quick brown fox jumps");
	hasher.update(b" over the lazy dog");
	assert_eq!(hasher.digest(), expected);

	assert_eq!(
		hasher.digest_data(b"The quick brown fox jumps over the lazy dog."),
		hex!("f48290b1bcacee406a0429b993adb8fb3d065f4b09cbcdb464a631d4a0080aaf")
	);
}

#[test]
fn test_groestl256_block_boundaries() {
	let mut hasher = Groestl256::new();
	assert_eq!(
		hasher.digest_data(&[b'A'; 64]),
		hex!("fb3ba0dd1af025433fd91b0813a5c7e14a885beb988a61e9efabcf6e9fcb1073")
	);
	assert_eq!(
		hasher.digest_data(&[b'A'; 65]),
		hex!("55bbe6657e052e83b95f2f468a22fd4ed8f4dd07f966e3addb593ffaa874820c")
	);
}

#[test]
fn test_abc_vectors() {
	let cases: &[(Algorithm, &str)] = &[
		(Algorithm::Md4, "a448017aaf21d8525fc10ae87aa6729d"),
		(Algorithm::Md5, "900150983cd24fb0d6963f7d28e17f72"),
		(Algorithm::Sha1, "a9993e364706816aba3e25717850c26c9cd0d89d"),
		(Algorithm::Sha224, "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"),
		(
			Algorithm::Sha256,
			"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
		),
		(Algorithm::Ripemd128, "c14a12199c66e4ba84636b0f69144c77"),
		(Algorithm::Ripemd160, "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"),
		(
			Algorithm::Keccak256,
			"4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45",
		),
	];
	for &(alg, expected) in cases {
		assert_eq!(hex::encode(alg.new_digest().digest_data(b"abc")), expected, "{alg}");
	}
}

#[test]
fn test_byte_at_a_time() {
	let mut rng = StdRng::seed_from_u64(0);
	let mut data = vec![0u8; 300];
	rng.fill_bytes(&mut data);

	for &alg in Algorithm::ALL {
		let expected = alg.new_digest().digest_data(&data);
		let mut digest = alg.new_digest();
		for &byte in &data {
			digest.update_byte(byte);
		}
		assert_eq!(digest.digest(), expected, "{alg}");
	}
}

#[test]
fn test_every_length_around_block_boundaries() {
	let data = (0..=255u8).cycle().take(3 * 128 + 1).collect::<Vec<_>>();
	for &alg in Algorithm::ALL {
		let BlockLength::Fixed(block) = alg.block_length() else {
			panic!("{alg} has a fixed block length");
		};
		for len in (block - 20..block + 20).chain(2 * block - 20..2 * block + 1) {
			let mut streamed = alg.new_digest();
			let (head, tail) = data[..len].split_at(len / 3);
			streamed.update(head);
			streamed.update(tail);
			assert_eq!(
				streamed.digest(),
				alg.new_digest().digest_data(&data[..len]),
				"{alg} at {len} bytes"
			);
		}
	}
}

fn feed_in_chunks(digest: &mut dyn Digest, mut data: &[u8], cuts: &[usize]) {
	for &cut in cuts {
		let (head, tail) = data.split_at(cut.min(data.len()));
		digest.update(head);
		data = tail;
	}
	digest.update(data);
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(32))]

	#[test]
	fn test_chunking_invariance(
		input in prop::collection::vec(any::<u8>(), 0..=600),
		cuts in prop::collection::vec(0usize..=200, 0..=8),
	) {
		for &alg in Algorithm::ALL {
			let expected = alg.new_digest().digest_data(&input);
			let mut digest = alg.new_digest();
			feed_in_chunks(&mut digest, &input, &cuts);
			assert_eq!(digest.digest(), expected, "{alg}");
		}
	}

	#[test]
	fn test_idempotent_reset(
		input in prop::collection::vec(any::<u8>(), 0..=300),
		junk in prop::collection::vec(any::<u8>(), 1..=100),
	) {
		for &alg in Algorithm::ALL {
			let mut digest = alg.new_digest();
			digest.update(&input);
			let first = digest.digest();
			digest.update(&input);
			assert_eq!(digest.digest(), first, "{alg}");

			digest.update(&junk);
			digest.reset();
			assert_eq!(digest.digest_data(&input), first, "{alg}");
		}
	}

	#[test]
	fn test_clone_independence(
		prefix in prop::collection::vec(any::<u8>(), 0..=300),
		extra in prop::collection::vec(any::<u8>(), 0..=100),
		extra2 in prop::collection::vec(any::<u8>(), 0..=100),
	) {
		for &alg in Algorithm::ALL {
			let mut original = alg.new_digest();
			original.update(&prefix);
			let mut fork = original.clone();
			fork.update(&extra);
			original.update(&extra2);

			let expected_fork = alg.new_digest().digest_data(&[&prefix[..], &extra[..]].concat());
			let expected_original = alg.new_digest().digest_data(&[&prefix[..], &extra2[..]].concat());
			assert_eq!(fork.digest(), expected_fork, "{alg}");
			assert_eq!(original.digest(), expected_original, "{alg}");
		}
	}

	#[test]
	fn test_truncated_digest(input in prop::collection::vec(any::<u8>(), 0..=300)) {
		for &alg in Algorithm::ALL {
			let full = alg.new_digest().digest_data(&input);
			let mut digest = alg.new_digest();
			for n in 0..=full.len() {
				digest.update(&input);
				let mut out = vec![0u8; n];
				assert_eq!(digest.digest_into(&mut out), n);
				assert_eq!(out, full[..n], "{alg} truncated to {n}");
			}
		}
	}
}

const VIRTUAL_MULTIPLE: NonZeroUsize = match NonZeroUsize::new(16) {
	Some(multiple) => multiple,
	None => unreachable!(),
};

/// SHA-256 that reports a virtual block length to HMAC.
#[derive(Clone, Default)]
struct VirtualBlockCore {
	inner: Sha256,
}

impl DigestCore for VirtualBlockCore {
	fn block_size(&self) -> usize {
		64
	}

	fn block_length(&self) -> BlockLength {
		BlockLength::Virtual(VIRTUAL_MULTIPLE)
	}

	fn output_size(&self) -> usize {
		32
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Virtual")
	}

	fn reset(&mut self) {
		self.inner.reset();
	}

	fn process_block(&mut self, block: &[u8]) {
		self.inner.update(block);
	}

	fn finalize(&mut self, buffer: &mut BlockBuffer, _block_count: u64, out: &mut [u8]) {
		self.inner.update(buffer.flush());
		self.inner.digest_into(out);
	}
}

/// HMAC written out by hand with the key zero-padded to `padded_len` bytes.
fn manual_hmac(key: &[u8], padded_len: usize, msg: &[u8]) -> Vec<u8> {
	let mut padded = key.to_vec();
	padded.resize(padded_len, 0);
	let ipad = padded.iter().map(|b| b ^ 0x36).collect::<Vec<_>>();
	let opad = padded.iter().map(|b| b ^ 0x5c).collect::<Vec<_>>();

	let inner = Sha256::new().chain_update(&ipad).chain_update(msg).digest();
	Sha256::new().chain_update(&opad).chain_update(&inner).digest()
}

#[test]
fn test_hmac_virtual_block_length() {
	let msg = b"virtual block length";
	for (key_len, padded_len) in [(0, 0), (1, 16), (16, 16), (20, 32), (100, 112)] {
		let key = vec![0x42u8; key_len];
		let mut mac = Hmac::with_key(DigestEngine::<VirtualBlockCore>::new(), &key);
		assert_eq!(mac.block_length(), BlockLength::Virtual(VIRTUAL_MULTIPLE));
		assert_eq!(mac.digest_data(msg), manual_hmac(&key, padded_len, msg), "key of {key_len}");
	}
}

#[test]
fn test_hmac_key_regimes_by_hand() {
	let msg = b"key regimes";
	let mut rng = StdRng::seed_from_u64(1);

	// Short and exact keys are zero-padded to the block length.
	for key_len in [0, 1, 32, 63, 64] {
		let mut key = vec![0u8; key_len];
		rng.fill_bytes(&mut key);
		let mut mac = Hmac::with_key(Sha256::new(), &key);
		assert_eq!(mac.digest_data(msg), manual_hmac(&key, 64, msg), "key of {key_len}");
	}

	// Longer keys are hashed down first.
	let mut key = vec![0u8; 65];
	rng.fill_bytes(&mut key);
	let hashed = Sha256::new().digest_data(&key);
	let mut mac = Hmac::with_key(Sha256::new(), &key);
	assert_eq!(mac.digest_data(msg), manual_hmac(&hashed, 64, msg));
}

#[test]
fn test_hmac_distinct_keys() {
	let mut a = Algorithm::Blake256.new_hmac(b"key one");
	let mut b = Algorithm::Blake256.new_hmac(b"key two");
	let tag = a.digest_data(b"message");
	assert_eq!(a.digest_data(b"message"), tag);
	assert_ne!(b.digest_data(b"message"), tag);
}
