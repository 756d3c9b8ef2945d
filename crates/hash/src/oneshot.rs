// Copyright 2025 Irreducible Inc.

//! One-call hashing of text, byte slices and [`Bytes`] buffers.
//!
//! Every input form is normalized to a byte sequence before it reaches a digest, and the digest is
//! post-processed into the requested [`OutputEncoding`].

use std::{borrow::Cow, fmt};

use bytes::Bytes;
use sphlib_utils::codec::checked_range;
use tracing::instrument;

use crate::{algorithm::Algorithm, engine::Digest, error::Error, hmac::Hmac};

/// Message or key handed to the one-shot functions.
#[derive(Debug, Clone)]
pub enum Input<'a> {
	/// UTF-8 encoded.
	Text(&'a str),
	/// UTF-16 code units, split into bytes without decoding: a unit below `0x100` becomes a single
	/// byte, any other unit its high byte followed by its low byte.
	Utf16(&'a [u16]),
	Bytes(&'a [u8]),
	Buffer(Bytes),
}

impl Input<'_> {
	/// The byte sequence this input hashes as.
	pub fn to_bytes(&self) -> Cow<'_, [u8]> {
		match self {
			Self::Text(text) => Cow::Borrowed(text.as_bytes()),
			Self::Utf16(units) => Cow::Owned(split_utf16(units)),
			Self::Bytes(bytes) => Cow::Borrowed(*bytes),
			Self::Buffer(buffer) => Cow::Borrowed(buffer.as_ref()),
		}
	}
}

fn split_utf16(units: &[u16]) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(units.len());
	for &unit in units {
		match u8::try_from(unit) {
			Ok(byte) => bytes.push(byte),
			Err(_) => bytes.extend_from_slice(&unit.to_be_bytes()),
		}
	}
	bytes
}

impl<'a> From<&'a str> for Input<'a> {
	fn from(text: &'a str) -> Self {
		Self::Text(text)
	}
}

impl<'a> From<&'a String> for Input<'a> {
	fn from(text: &'a String) -> Self {
		Self::Text(text)
	}
}

impl<'a> From<&'a [u16]> for Input<'a> {
	fn from(units: &'a [u16]) -> Self {
		Self::Utf16(units)
	}
}

impl<'a> From<&'a [u8]> for Input<'a> {
	fn from(bytes: &'a [u8]) -> Self {
		Self::Bytes(bytes)
	}
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
	fn from(bytes: &'a [u8; N]) -> Self {
		Self::Bytes(bytes)
	}
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
	fn from(bytes: &'a Vec<u8>) -> Self {
		Self::Bytes(bytes)
	}
}

impl From<Bytes> for Input<'_> {
	fn from(buffer: Bytes) -> Self {
		Self::Buffer(buffer)
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputEncoding {
	/// Lowercase hexadecimal string.
	#[default]
	Hex,
	Bytes,
	Buffer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
	Hex(String),
	Bytes(Vec<u8>),
	Buffer(Bytes),
}

impl Output {
	pub fn encode(digest: Vec<u8>, encoding: OutputEncoding) -> Self {
		match encoding {
			OutputEncoding::Hex => Self::Hex(hex::encode(digest)),
			OutputEncoding::Bytes => Self::Bytes(digest),
			OutputEncoding::Buffer => Self::Buffer(Bytes::from(digest)),
		}
	}
}

impl fmt::Display for Output {
	/// Always prints lowercase hex.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Hex(hex) => f.write_str(hex),
			Self::Bytes(bytes) => f.write_str(&hex::encode(bytes)),
			Self::Buffer(buffer) => f.write_str(&hex::encode(buffer)),
		}
	}
}

/// Hashes `input` with `algorithm`.
#[instrument(skip_all, level = "debug", fields(%algorithm))]
pub fn hash<'a>(
	algorithm: Algorithm,
	input: impl Into<Input<'a>>,
	encoding: OutputEncoding,
) -> Output {
	let input = input.into();
	let digest = algorithm.new_digest().digest_data(&input.to_bytes());
	Output::encode(digest, encoding)
}

/// Computes the HMAC of `input` under `key` over `algorithm`.
#[instrument(skip_all, level = "debug", fields(%algorithm))]
pub fn hmac<'a, 'k>(
	algorithm: Algorithm,
	key: impl Into<Input<'k>>,
	input: impl Into<Input<'a>>,
	encoding: OutputEncoding,
) -> Output {
	let key = key.into();
	let input = input.into();
	let mac = Hmac::with_key(algorithm.new_digest(), &key.to_bytes()).digest_data(&input.to_bytes());
	Output::encode(mac, encoding)
}

/// [`hash`] with the algorithm given by name.
pub fn hash_str<'a>(
	name: &str,
	input: impl Into<Input<'a>>,
	encoding: OutputEncoding,
) -> Result<Output, Error> {
	Ok(hash(name.parse()?, input, encoding))
}

/// [`hmac`] with the algorithm given by name.
pub fn hmac_str<'a, 'k>(
	name: &str,
	key: impl Into<Input<'k>>,
	input: impl Into<Input<'a>>,
	encoding: OutputEncoding,
) -> Result<Output, Error> {
	Ok(hmac(name.parse()?, key, input, encoding))
}

/// Finalizes `digest` into `buf[offset..offset + len]`, writing at most the natural digest length.
///
/// The range actually written is checked before finalizing, so on error `digest` keeps its state.
/// Returns the number of bytes written.
pub fn digest_at(
	digest: &mut dyn Digest,
	buf: &mut [u8],
	offset: usize,
	len: usize,
) -> Result<usize, Error> {
	let range = checked_range(offset, len.min(digest.digest_length()), buf.len())?;
	Ok(digest.digest_into(&mut buf[range]))
}
