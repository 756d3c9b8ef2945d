// Copyright 2025 Irreducible Inc.

//! The AES S-box used by SubBytes, computed at compile time.

/// Multiplication in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1.
const fn gf_mul(mut a: u8, mut b: u8) -> u8 {
	let mut acc = 0u8;
	while b != 0 {
		if b & 1 != 0 {
			acc ^= a;
		}
		a = xtime(a);
		b >>= 1;
	}
	acc
}

/// Multiplication by x (`0x02`).
#[inline(always)]
pub(super) const fn xtime(a: u8) -> u8 {
	(a << 1) ^ if a & 0x80 != 0 { 0x1b } else { 0 }
}

/// `a^254`, the multiplicative inverse for non-zero `a` and zero otherwise.
const fn gf_inv(a: u8) -> u8 {
	let mut result = 1u8;
	let mut base = a;
	let mut exp = 254u32;
	while exp != 0 {
		if exp & 1 != 0 {
			result = gf_mul(result, base);
		}
		base = gf_mul(base, base);
		exp >>= 1;
	}
	result
}

const fn build_sbox() -> [u8; 256] {
	let mut sbox = [0u8; 256];
	let mut i = 0;
	while i < 256 {
		let b = gf_inv(i as u8);
		sbox[i] = b
			^ b.rotate_left(1)
			^ b.rotate_left(2)
			^ b.rotate_left(3)
			^ b.rotate_left(4)
			^ 0x63;
		i += 1;
	}
	sbox
}

pub(super) static SBOX: [u8; 256] = build_sbox();

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sbox_known_entries() {
		assert_eq!(SBOX[0x00], 0x63);
		assert_eq!(SBOX[0x01], 0x7c);
		assert_eq!(SBOX[0x53], 0xed);
		assert_eq!(SBOX[0xff], 0x16);
	}

	#[test]
	fn test_sbox_is_a_permutation() {
		let mut seen = [false; 256];
		for &s in SBOX.iter() {
			assert!(!seen[s as usize]);
			seen[s as usize] = true;
		}
	}

	#[test]
	fn test_gf_inverse() {
		for a in 1..=255u8 {
			assert_eq!(gf_mul(a, gf_inv(a)), 1);
		}
	}
}
