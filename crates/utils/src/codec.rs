// Copyright 2025 Irreducible Inc.

//! Fixed-width word encoding and bounds-checked buffer copies.
//!
//! Every hash core reads its message block as a sequence of 32- or 64-bit words and writes its
//! chaining state back out the same way; the byte order is a property of the algorithm, so both
//! orders are provided for both widths.

use std::ops::Range;

use crate::ensure;

#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
	#[error("range {start}..{end} is out of bounds for a buffer of length {len}")]
	OutOfBounds { start: usize, end: usize, len: usize },
	#[error("range length overflows usize")]
	LengthOverflow,
}

macro_rules! word_codec {
	($word:ty, $decode:ident, $encode:ident, $decode_into:ident, $encode_from:ident, $from:ident, $to:ident) => {
		/// Reads one word from the first bytes of `src`.
		///
		/// # Panics
		///
		/// Panics if `src` is shorter than the word width.
		#[inline]
		pub fn $decode(src: &[u8]) -> $word {
			let mut bytes = [0u8; std::mem::size_of::<$word>()];
			bytes.copy_from_slice(&src[..std::mem::size_of::<$word>()]);
			<$word>::$from(bytes)
		}

		/// Writes one word into the first bytes of `dst`.
		///
		/// # Panics
		///
		/// Panics if `dst` is shorter than the word width.
		#[inline]
		pub fn $encode(val: $word, dst: &mut [u8]) {
			dst[..std::mem::size_of::<$word>()].copy_from_slice(&val.$to());
		}

		/// Decodes `src` into consecutive words.
		///
		/// # Panics
		///
		/// Panics if `src.len()` is not exactly `dst.len()` words wide.
		#[inline]
		pub fn $decode_into(src: &[u8], dst: &mut [$word]) {
			const WIDTH: usize = std::mem::size_of::<$word>();
			assert_eq!(src.len(), dst.len() * WIDTH);
			for (chunk, word) in src.chunks_exact(WIDTH).zip(dst.iter_mut()) {
				*word = $decode(chunk);
			}
		}

		/// Encodes consecutive words into `dst`.
		///
		/// # Panics
		///
		/// Panics if `dst.len()` is not exactly `src.len()` words wide.
		#[inline]
		pub fn $encode_from(src: &[$word], dst: &mut [u8]) {
			const WIDTH: usize = std::mem::size_of::<$word>();
			assert_eq!(dst.len(), src.len() * WIDTH);
			for (chunk, &word) in dst.chunks_exact_mut(WIDTH).zip(src) {
				$encode(word, chunk);
			}
		}
	};
}

word_codec!(u32, decode_u32_be, encode_u32_be, decode_u32_be_into, encode_u32_be_from, from_be_bytes, to_be_bytes);
word_codec!(u32, decode_u32_le, encode_u32_le, decode_u32_le_into, encode_u32_le_from, from_le_bytes, to_le_bytes);
word_codec!(u64, decode_u64_be, encode_u64_be, decode_u64_be_into, encode_u64_be_from, from_be_bytes, to_be_bytes);
word_codec!(u64, decode_u64_le, encode_u64_le, decode_u64_le_into, encode_u64_le_from, from_le_bytes, to_le_bytes);

/// Validates the range `pos..pos + len` against a buffer of `buf_len` elements.
pub fn checked_range(pos: usize, len: usize, buf_len: usize) -> Result<Range<usize>, Error> {
	let end = pos.checked_add(len).ok_or(Error::LengthOverflow)?;
	ensure!(
		end <= buf_len,
		Error::OutOfBounds {
			start: pos,
			end,
			len: buf_len
		}
	);
	Ok(pos..end)
}

/// Copies `len` elements from `src[src_pos..]` into `dst[dst_pos..]`.
///
/// Both ranges are checked before anything is written, so a failed call leaves `dst` untouched.
pub fn array_copy<T: Copy>(
	src: &[T],
	src_pos: usize,
	dst: &mut [T],
	dst_pos: usize,
	len: usize,
) -> Result<(), Error> {
	let src_range = checked_range(src_pos, len, src.len())?;
	let dst_range = checked_range(dst_pos, len, dst.len())?;
	dst[dst_range].copy_from_slice(&src[src_range]);
	Ok(())
}

/// Copies `len` elements inside `buf` from `src_pos` to `dst_pos`.
///
/// The two ranges may overlap; the result is as if the source range had first been copied into a
/// temporary buffer (`memmove` semantics).
pub fn array_move<T: Copy>(
	buf: &mut [T],
	src_pos: usize,
	dst_pos: usize,
	len: usize,
) -> Result<(), Error> {
	let src_range = checked_range(src_pos, len, buf.len())?;
	checked_range(dst_pos, len, buf.len())?;
	buf.copy_within(src_range, dst_pos);
	Ok(())
}
