// Copyright 2025 Irreducible Inc.

//! Generic HMAC ([RFC 2104](https://www.rfc-editor.org/rfc/rfc2104)) over any [`Digest`].
//!
//! The MAC is itself a [`DigestEngine`], so it can be updated incrementally, cloned mid-stream, or
//! used as the inner function of another HMAC.

use std::{fmt, sync::Arc};

use subtle::ConstantTimeEq;

use crate::{
	buffer::BlockBuffer,
	engine::{BlockLength, Digest, DigestCore, DigestEngine},
};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5C;

/// Input is forwarded to the inner digest in chunks of this size. The value has no cryptographic
/// meaning.
const FORWARD_CHUNK_LEN: usize = 64;

/// HMAC over the digest `D`.
pub type Hmac<D> = DigestEngine<HmacCore<D>>;

/// The [`DigestCore`] behind [`Hmac`].
#[derive(Clone)]
pub struct HmacCore<D> {
	inner: D,
	inner_pad: Arc<[u8]>,
	outer_pad: Arc<[u8]>,
	output_len: usize,
}

impl<D: Digest + Clone + 'static> HmacCore<D> {
	/// Keys `inner` with `key`.
	///
	/// `inner` is reset first; whatever it had absorbed is discarded. An `output_len` at or above
	/// the natural digest length of `inner` selects the natural length.
	pub fn new(mut inner: D, key: &[u8], output_len: Option<usize>) -> Self {
		inner.reset();

		let natural_len = inner.digest_length();
		let block_len = inner.block_length().key_block_length(key.len());

		let mut padded_key = vec![0u8; block_len];
		if key.len() > block_len {
			tracing::trace!(
				key_len = key.len(),
				block_len,
				"HMAC key is longer than the block length, hashing it down"
			);
			let hashed = inner.digest_data(key);
			let len = hashed.len().min(block_len);
			padded_key[..len].copy_from_slice(&hashed[..len]);
		} else {
			padded_key[..key.len()].copy_from_slice(key);
		}

		let inner_pad = padded_key.iter().map(|b| b ^ IPAD).collect::<Arc<[u8]>>();
		let outer_pad = padded_key.iter().map(|b| b ^ OPAD).collect::<Arc<[u8]>>();

		let output_len = match output_len {
			Some(len) if len < natural_len => {
				tracing::trace!(len, natural_len, "HMAC output truncated");
				len
			}
			_ => natural_len,
		};

		let mut core = Self {
			inner,
			inner_pad,
			outer_pad,
			output_len,
		};
		core.reset();
		core
	}

	/// The keyed inner digest. Its state includes the inner pad and any forwarded input.
	pub fn inner(&self) -> &D {
		&self.inner
	}
}

impl<D: Digest + Clone + 'static> DigestCore for HmacCore<D> {
	fn block_size(&self) -> usize {
		FORWARD_CHUNK_LEN
	}

	fn block_length(&self) -> BlockLength {
		self.inner.block_length()
	}

	fn output_size(&self) -> usize {
		self.output_len
	}

	fn write_alg_name(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "HMAC/{}", self.inner)
	}

	fn reset(&mut self) {
		self.inner.reset();
		self.inner.update(&self.inner_pad);
	}

	fn process_block(&mut self, block: &[u8]) {
		self.inner.update(block);
	}

	fn finalize(&mut self, buffer: &mut BlockBuffer, _block_count: u64, out: &mut [u8]) {
		self.inner.update(buffer.flush());
		let inner_hash = self.inner.digest();

		self.inner.update(&self.outer_pad);
		self.inner.update(&inner_hash);
		self.inner.digest_into(out);
	}
}

impl<D: Digest + Clone + 'static> Hmac<D> {
	/// HMAC keyed with `key`, producing the natural digest length of `inner`.
	pub fn with_key(inner: D, key: &[u8]) -> Self {
		Self::from_core(HmacCore::new(inner, key, None))
	}

	/// HMAC keyed with `key` whose output is truncated to `output_len` bytes.
	pub fn with_output_length(inner: D, key: &[u8], output_len: usize) -> Self {
		Self::from_core(HmacCore::new(inner, key, Some(output_len)))
	}

	/// Finalizes the MAC and compares it with `tag` in constant time.
	///
	/// `tag` may be a prefix of the MAC, but no shorter than half of it (and never empty unless the
	/// MAC itself is empty). The instance is reset either way.
	pub fn verify(&mut self, tag: &[u8]) -> bool {
		let mac = self.digest();
		let min_len = mac.len().div_ceil(2);
		if tag.len() > mac.len() || tag.len() < min_len {
			return false;
		}
		mac[..tag.len()].ct_eq(tag).into()
	}
}
