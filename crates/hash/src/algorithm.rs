// Copyright 2025 Irreducible Inc.

//! Runtime selection of a hash function by name.

use std::{fmt, str::FromStr};

use crate::{
	blake::{Blake224, Blake256, Blake384, Blake512},
	engine::{BlockLength, Digest},
	error::Error,
	groestl::{Groestl224, Groestl256, Groestl384, Groestl512},
	hmac::Hmac,
	keccak::{Keccak224, Keccak256, Keccak384, Keccak512},
	md4::Md4,
	md5::Md5,
	ripemd::{Ripemd128, Ripemd160},
	sha1::{Sha0, Sha1},
	sha2::{Sha224, Sha256, Sha384, Sha512},
};

macro_rules! algorithms {
	($($variant:ident => $digest:ty, $name:literal;)*) => {
		/// Every hash function implemented by this crate.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum Algorithm {
			$($variant,)*
		}

		impl Algorithm {
			pub const ALL: &'static [Algorithm] = &[$(Algorithm::$variant,)*];

			/// Canonical name, identical to the [`Display`](fmt::Display) output of the digest.
			pub const fn name(self) -> &'static str {
				match self {
					$(Self::$variant => $name,)*
				}
			}

			/// A fresh instance of the hash function.
			pub fn new_digest(self) -> Box<dyn Digest> {
				match self {
					$(Self::$variant => Box::new(<$digest>::new()),)*
				}
			}
		}
	};
}

algorithms! {
	Md4 => Md4, "MD4";
	Md5 => Md5, "MD5";
	Sha0 => Sha0, "SHA-0";
	Sha1 => Sha1, "SHA-1";
	Sha224 => Sha224, "SHA-224";
	Sha256 => Sha256, "SHA-256";
	Sha384 => Sha384, "SHA-384";
	Sha512 => Sha512, "SHA-512";
	Ripemd128 => Ripemd128, "RIPEMD-128";
	Ripemd160 => Ripemd160, "RIPEMD-160";
	Blake224 => Blake224, "BLAKE-224";
	Blake256 => Blake256, "BLAKE-256";
	Blake384 => Blake384, "BLAKE-384";
	Blake512 => Blake512, "BLAKE-512";
	Groestl224 => Groestl224, "Groestl-224";
	Groestl256 => Groestl256, "Groestl-256";
	Groestl384 => Groestl384, "Groestl-384";
	Groestl512 => Groestl512, "Groestl-512";
	Keccak224 => Keccak224, "Keccak-224";
	Keccak256 => Keccak256, "Keccak-256";
	Keccak384 => Keccak384, "Keccak-384";
	Keccak512 => Keccak512, "Keccak-512";
}

impl Algorithm {
	pub fn digest_length(self) -> usize {
		self.new_digest().digest_length()
	}

	pub fn block_length(self) -> BlockLength {
		self.new_digest().block_length()
	}

	/// HMAC over a fresh instance of this hash function.
	pub fn new_hmac(self, key: &[u8]) -> Hmac<Box<dyn Digest>> {
		Hmac::with_key(self.new_digest(), key)
	}
}

/// Case-folded name with separators removed, so that `sha256`, `SHA-256` and `Sha_256` agree.
fn normalize(name: &str) -> String {
	name.chars()
		.filter(|c| !matches!(c, '-' | '_' | ' '))
		.map(|c| match c {
			'ø' | 'Ø' => 'o',
			c => c.to_ascii_lowercase(),
		})
		.collect::<String>()
		.replace("groestl", "grostl")
}

impl FromStr for Algorithm {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let wanted = normalize(s);
		Self::ALL
			.iter()
			.copied()
			.find(|alg| normalize(alg.name()) == wanted)
			.ok_or_else(|| Error::UnknownAlgorithm(s.to_owned()))
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	#[test]
	fn test_names_match_digests() {
		for &alg in Algorithm::ALL {
			assert_eq!(alg.to_string(), alg.new_digest().to_string());
		}
	}

	#[test]
	fn test_parse() {
		assert_eq!("sha256".parse::<Algorithm>(), Ok(Algorithm::Sha256));
		assert_eq!("SHA-256".parse::<Algorithm>(), Ok(Algorithm::Sha256));
		assert_eq!("ripemd_160".parse::<Algorithm>(), Ok(Algorithm::Ripemd160));
		assert_eq!("groestl-256".parse::<Algorithm>(), Ok(Algorithm::Groestl256));
		assert_eq!("Grøstl-512".parse::<Algorithm>(), Ok(Algorithm::Groestl512));
		assert_eq!("keccak384".parse::<Algorithm>(), Ok(Algorithm::Keccak384));
		assert_matches!("sha3-256".parse::<Algorithm>(), Err(Error::UnknownAlgorithm(name)) if name == "sha3-256");
	}

	#[test]
	fn test_lengths() {
		assert_eq!(Algorithm::Md5.digest_length(), 16);
		assert_eq!(Algorithm::Sha384.block_length(), BlockLength::Fixed(128));
		assert_eq!(Algorithm::Groestl224.digest_length(), 28);
		assert_eq!(Algorithm::Keccak512.block_length(), BlockLength::Fixed(72));
	}

	#[test]
	fn test_boxed_hmac() {
		let mut boxed = Algorithm::Sha256.new_hmac(b"key");
		let mut typed = Hmac::with_key(Sha256::new(), b"key");
		assert_eq!(boxed.to_string(), "HMAC/SHA-256");
		assert_eq!(boxed.digest_data(b"message"), typed.digest_data(b"message"));
	}
}
