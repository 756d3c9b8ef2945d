// Copyright 2025 Irreducible Inc.

//! Streaming hash functions built on a single generic digest engine, and HMAC over any of them.
//!
//! Each algorithm contributes only a [`DigestCore`]: its chaining state, its compression function
//! and its final padding. [`DigestEngine`] supplies the buffering, block counting and
//! self-resetting finalization, and [`Hmac`] is itself a digest engine whose core forwards to an
//! inner [`Digest`].

pub mod algorithm;
pub mod blake;
pub mod buffer;
pub mod engine;
mod error;
pub mod groestl;
pub mod hmac;
pub mod keccak;
pub mod md4;
pub mod md5;
pub mod oneshot;
pub mod ripemd;
pub mod sha1;
pub mod sha2;

pub use algorithm::Algorithm;
pub use blake::{Blake224, Blake256, Blake384, Blake512};
pub use buffer::BlockBuffer;
pub use engine::{BlockLength, Digest, DigestCore, DigestEngine};
pub use error::Error;
pub use groestl::{Groestl224, Groestl256, Groestl384, Groestl512};
pub use hmac::{Hmac, HmacCore};
pub use keccak::{Keccak224, Keccak256, Keccak384, Keccak512};
pub use md4::Md4;
pub use md5::Md5;
pub use oneshot::{hash, hash_str, hmac, hmac_str, Input, Output, OutputEncoding};
pub use ripemd::{Ripemd128, Ripemd160};
pub use sha1::{Sha0, Sha1};
pub use sha2::{Sha224, Sha256, Sha384, Sha512};
