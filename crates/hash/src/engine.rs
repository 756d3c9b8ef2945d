// Copyright 2025 Irreducible Inc.

//! The streaming digest engine.
//!
//! [`DigestEngine`] does all of the bookkeeping that is common to block-oriented hash functions:
//! it buffers arbitrarily chunked input, hands completed blocks to the algorithm core, counts them,
//! and turns finalization into a self-resetting operation. The algorithm-specific parts are
//! supplied by a [`DigestCore`].

use std::{fmt, io, num::NonZeroUsize};

use crate::buffer::BlockBuffer;

/// Natural block length of a hash function, as seen by constructions such as HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockLength {
	/// The function consumes blocks of this many bytes.
	Fixed(usize),
	/// The function has no natural block length. Keys are zero-padded to the next multiple of this
	/// many bytes instead.
	Virtual(NonZeroUsize),
}

impl BlockLength {
	/// Resolves the length a key of `key_len` bytes is padded to.
	pub fn key_block_length(self, key_len: usize) -> usize {
		match self {
			Self::Fixed(len) => len,
			Self::Virtual(multiple) => key_len.div_ceil(multiple.get()) * multiple.get(),
		}
	}
}

/// The caller-facing interface of every hash function and MAC in this crate.
///
/// Instances are exclusively owned, mutable state; sharing one instance between threads requires
/// external synchronization. `digest`, `digest_data` and `digest_into` all leave the instance
/// reset, ready to hash a new message.
pub trait Digest: fmt::Display + Send {
	/// Absorbs `data`. Any chunking of a message yields the same digest.
	fn update(&mut self, data: &[u8]);

	fn update_byte(&mut self, byte: u8) {
		self.update(&[byte]);
	}

	/// Finalizes into a freshly allocated vector of [`Self::digest_length`] bytes.
	fn digest(&mut self) -> Vec<u8> {
		let mut out = vec![0u8; self.digest_length()];
		self.digest_into(&mut out);
		out
	}

	/// Absorbs `data`, then finalizes.
	fn digest_data(&mut self, data: &[u8]) -> Vec<u8> {
		self.update(data);
		self.digest()
	}

	/// Finalizes into `out`, writing `min(out.len(), digest_length)` bytes.
	///
	/// A short `out` receives the leading bytes of the full digest. Returns the number of bytes
	/// written.
	fn digest_into(&mut self, out: &mut [u8]) -> usize;

	/// Discards buffered input and returns to the initial state.
	fn reset(&mut self);

	/// Output size in bytes.
	fn digest_length(&self) -> usize;

	fn block_length(&self) -> BlockLength;

	/// Clones the complete in-flight state behind a box.
	fn box_clone(&self) -> Box<dyn Digest>;
}

impl Clone for Box<dyn Digest> {
	fn clone(&self) -> Self {
		self.box_clone()
	}
}

impl Digest for Box<dyn Digest> {
	fn update(&mut self, data: &[u8]) {
		(**self).update(data)
	}

	fn update_byte(&mut self, byte: u8) {
		(**self).update_byte(byte)
	}

	fn digest_into(&mut self, out: &mut [u8]) -> usize {
		(**self).digest_into(out)
	}

	fn reset(&mut self) {
		(**self).reset()
	}

	fn digest_length(&self) -> usize {
		(**self).digest_length()
	}

	fn block_length(&self) -> BlockLength {
		(**self).block_length()
	}

	fn box_clone(&self) -> Box<dyn Digest> {
		(**self).box_clone()
	}
}

/// Algorithm-specific half of a digest engine.
///
/// A core owns the chaining state only. The residue buffer and the block counter live in the
/// [`DigestEngine`] wrapping it, which calls [`Self::process_block`] once for every full block and
/// [`Self::finalize`] once per message.
pub trait DigestCore: Clone + Send + 'static {
	/// Size of the blocks handed to [`Self::process_block`]. Must be positive and constant for the
	/// lifetime of the core.
	fn block_size(&self) -> usize;

	/// Block length reported to constructions built on top of this function.
	fn block_length(&self) -> BlockLength {
		BlockLength::Fixed(self.block_size())
	}

	/// Digest size in bytes. Must be constant for the lifetime of the core.
	fn output_size(&self) -> usize;

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

	/// Restores the initial chaining value.
	fn reset(&mut self);

	/// Compresses one block of exactly [`Self::block_size`] bytes.
	fn process_block(&mut self, block: &[u8]);

	/// Pads the residue left in `buffer`, compresses the final block(s) and writes the digest into
	/// `out`, which is exactly [`Self::output_size`] bytes long.
	///
	/// `block_count` is the number of full blocks compressed so far (modulo 2^64). The engine
	/// resets the core afterwards, so the core may leave its state in any condition.
	fn finalize(&mut self, buffer: &mut BlockBuffer, block_count: u64, out: &mut [u8]);
}

/// Streaming hash engine generic over an algorithm core.
///
/// Cloning an engine forks the computation: the clone and the original share nothing afterwards.
#[derive(Clone)]
pub struct DigestEngine<C: DigestCore> {
	core: C,
	buffer: BlockBuffer,
	block_count: u64,
}

impl<C: DigestCore> DigestEngine<C> {
	pub fn from_core(core: C) -> Self {
		let buffer = BlockBuffer::new(core.block_size());
		Self {
			core,
			buffer,
			block_count: 0,
		}
	}

	pub fn core(&self) -> &C {
		&self.core
	}

	/// Number of full blocks compressed since the last reset.
	pub fn block_count(&self) -> u64 {
		self.block_count
	}

	/// Number of message bytes absorbed since the last reset, modulo 2^64.
	pub fn bytes_absorbed(&self) -> u64 {
		self.buffer.message_len(self.block_count)
	}

	/// Absorbs `data` and returns the engine, for building one-liners.
	#[must_use]
	pub fn chain_update(mut self, data: impl AsRef<[u8]>) -> Self {
		Digest::update(&mut self, data.as_ref());
		self
	}

	fn finalize_full(&mut self, out: &mut [u8]) {
		let Self {
			core,
			buffer,
			block_count,
		} = self;
		core.finalize(buffer, *block_count, out);
	}
}

impl<C: DigestCore + Default> DigestEngine<C> {
	pub fn new() -> Self {
		Self::from_core(C::default())
	}
}

impl<C: DigestCore + Default> Default for DigestEngine<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C: DigestCore> Digest for DigestEngine<C> {
	#[inline]
	fn update(&mut self, data: &[u8]) {
		let Self {
			core,
			buffer,
			block_count,
		} = self;
		let blocks = buffer.digest_blocks(data, |block| core.process_block(block));
		*block_count = block_count.wrapping_add(blocks);
	}

	fn digest_into(&mut self, out: &mut [u8]) -> usize {
		let natural_len = self.core.output_size();
		let written = out.len().min(natural_len);
		if written == natural_len {
			self.finalize_full(&mut out[..natural_len]);
		} else {
			let mut full = vec![0u8; natural_len];
			self.finalize_full(&mut full);
			out[..written].copy_from_slice(&full[..written]);
		}
		Digest::reset(self);
		written
	}

	fn reset(&mut self) {
		self.core.reset();
		self.buffer.reset();
		self.block_count = 0;
	}

	fn digest_length(&self) -> usize {
		self.core.output_size()
	}

	fn block_length(&self) -> BlockLength {
		self.core.block_length()
	}

	fn box_clone(&self) -> Box<dyn Digest> {
		Box::new(self.clone())
	}
}

impl<C: DigestCore> fmt::Display for DigestEngine<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.core.write_alg_name(f)
	}
}

impl<C: DigestCore> fmt::Debug for DigestEngine<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("DigestEngine<")?;
		self.core.write_alg_name(f)?;
		f.write_str("> { ... }")
	}
}

impl<C: DigestCore> io::Write for DigestEngine<C> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		Digest::update(self, buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl<C: DigestCore> digest::Update for DigestEngine<C> {
	fn update(&mut self, data: &[u8]) {
		Digest::update(self, data);
	}
}

impl<C: DigestCore> digest::Reset for DigestEngine<C> {
	fn reset(&mut self) {
		Digest::reset(self);
	}
}

impl<C: DigestCore> digest::HashMarker for DigestEngine<C> {}
