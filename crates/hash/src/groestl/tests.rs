// Copyright 2025 Irreducible Inc.

use hex_literal::hex;
use proptest::prelude::*;

use super::{Groestl224, Groestl256, Groestl384, Groestl512};
use crate::engine::Digest;

#[test]
fn test_groestl256_empty() {
	assert_eq!(
		Groestl256::new().digest(),
		hex!("1a52d11d550039be16107f9c58db9ebcc417f16f736adb2502567119f0083467")
	);
}

#[test]
fn test_names() {
	assert_eq!(Groestl224::new().to_string(), "Groestl-224");
	assert_eq!(Groestl512::new().to_string(), "Groestl-512");
}

proptest! {
	#[test]
	fn test_groestl_vs_reference(
		input in prop::collection::vec(any::<u8>(), 0..=2048),
	) {
		assert_eq!(
			Groestl224::new().digest_data(&input),
			<groestl_crypto::Groestl224 as digest::Digest>::digest(&input).to_vec()
		);
		assert_eq!(
			Groestl256::new().digest_data(&input),
			<groestl_crypto::Groestl256 as digest::Digest>::digest(&input).to_vec()
		);
		assert_eq!(
			Groestl384::new().digest_data(&input),
			<groestl_crypto::Groestl384 as digest::Digest>::digest(&input).to_vec()
		);
		assert_eq!(
			Groestl512::new().digest_data(&input),
			<groestl_crypto::Groestl512 as digest::Digest>::digest(&input).to_vec()
		);
	}
}
