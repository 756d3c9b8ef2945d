// Copyright 2025 Irreducible Inc.

use std::{cmp::min, fmt};

/// Fixed-capacity residue buffer sitting in front of a block compression function.
///
/// Invariant: `pos` is always strictly less than the buffer size between calls, so a completed
/// block is compressed as soon as its last byte arrives.
#[derive(Clone)]
pub struct BlockBuffer {
	data: Box<[u8]>,
	pos: usize,
}

impl BlockBuffer {
	/// Creates an empty buffer holding blocks of `size` bytes.
	///
	/// # Panics
	///
	/// Panics if `size` is zero.
	pub fn new(size: usize) -> Self {
		assert!(size > 0, "block size must be positive");
		Self {
			data: vec![0u8; size].into_boxed_slice(),
			pos: 0,
		}
	}

	/// Block size in bytes.
	#[inline]
	pub fn size(&self) -> usize {
		self.data.len()
	}

	/// Number of buffered bytes.
	#[inline]
	pub fn len(&self) -> usize {
		self.pos
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.pos == 0
	}

	/// Free space left in the current block.
	#[inline]
	pub fn remaining(&self) -> usize {
		self.size() - self.pos
	}

	/// Message length in bytes after `block_count` full blocks plus the buffered residue, modulo
	/// 2^64.
	#[inline]
	pub fn message_len(&self, block_count: u64) -> u64 {
		block_count
			.wrapping_mul(self.size() as u64)
			.wrapping_add(self.pos as u64)
	}

	/// [`Self::message_len`] in bits, modulo 2^64.
	#[inline]
	pub fn bit_len(&self, block_count: u64) -> u64 {
		self.message_len(block_count).wrapping_mul(8)
	}

	/// Exact message length in bits, for 128-bit length trailers.
	#[inline]
	pub fn bit_len_u128(&self, block_count: u64) -> u128 {
		(block_count as u128 * self.size() as u128 + self.pos as u128) * 8
	}

	/// Drops the buffered bytes. The stale contents are left in place; only the logical length is
	/// cleared.
	#[inline]
	pub fn reset(&mut self) {
		self.pos = 0;
	}

	/// Feeds `input` through the buffer, calling `compress` once for every completed block.
	///
	/// Returns the number of blocks compressed.
	pub fn digest_blocks(&mut self, mut input: &[u8], mut compress: impl FnMut(&[u8])) -> u64 {
		let size = self.size();
		let mut blocks = 0;

		if self.pos != 0 {
			let to_copy = min(size - self.pos, input.len());
			self.data[self.pos..self.pos + to_copy].copy_from_slice(&input[..to_copy]);
			self.pos += to_copy;
			input = &input[to_copy..];

			if self.pos < size {
				return 0;
			}
			compress(&self.data);
			self.pos = 0;
			blocks += 1;
		}

		// Whole blocks go straight from the input.
		let mut chunks = input.chunks_exact(size);
		for block in &mut chunks {
			compress(block);
			blocks += 1;
		}

		let rest = chunks.remainder();
		self.data[..rest.len()].copy_from_slice(rest);
		self.pos = rest.len();
		blocks
	}

	/// Returns the valid prefix of the buffer and empties it.
	///
	/// This is what a finalizer uses when it must forward the residue somewhere else rather than
	/// pad it in place; the fixed-size backing storage past the prefix is never exposed.
	pub fn flush(&mut self) -> &[u8] {
		let len = self.pos;
		self.pos = 0;
		&self.data[..len]
	}

	/// Appends `marker`, zero-fills and places `suffix` in the last bytes of the final block.
	///
	/// When the marker and suffix do not both fit in the current block, the current block is
	/// compressed with zero padding and the suffix goes into a fresh zero block.
	pub fn digest_pad(&mut self, marker: u8, suffix: &[u8], mut compress: impl FnMut(&[u8])) {
		let size = self.size();
		assert!(suffix.len() < size, "padding suffix must leave room for the marker");

		let pos = self.pos;
		self.data[pos] = marker;
		self.data[pos + 1..].fill(0);

		if size - pos - 1 < suffix.len() {
			compress(&self.data);
			self.data.fill(0);
		}

		self.data[size - suffix.len()..].copy_from_slice(suffix);
		compress(&self.data);
		self.pos = 0;
	}

	/// MD-strengthening with a 64-bit big-endian length trailer.
	pub fn len64_padding_be(&mut self, len: u64, compress: impl FnMut(&[u8])) {
		self.digest_pad(0x80, &len.to_be_bytes(), compress);
	}

	/// MD-strengthening with a 64-bit little-endian length trailer.
	pub fn len64_padding_le(&mut self, len: u64, compress: impl FnMut(&[u8])) {
		self.digest_pad(0x80, &len.to_le_bytes(), compress);
	}

	/// MD-strengthening with a 128-bit big-endian length trailer.
	pub fn len128_padding_be(&mut self, len: u128, compress: impl FnMut(&[u8])) {
		self.digest_pad(0x80, &len.to_be_bytes(), compress);
	}
}

impl fmt::Debug for BlockBuffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BlockBuffer")
			.field("size", &self.size())
			.field("len", &self.pos)
			.finish_non_exhaustive()
	}
}
