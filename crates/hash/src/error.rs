// Copyright 2025 Irreducible Inc.

#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
	#[error("unknown hash algorithm {0:?}")]
	UnknownAlgorithm(String),
	#[error("codec error: {0}")]
	Codec(#[from] sphlib_utils::codec::Error),
}
