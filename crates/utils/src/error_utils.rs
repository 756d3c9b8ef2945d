// Copyright 2025 Irreducible Inc.

//! Early-return helpers for the few fallible operations in the workspace.
//!
//! With the `bail_panic` feature enabled, `bail!` panics at the failure site instead of returning,
//! which gives a backtrace pointing at the exact check that failed.

/// Returns `Err($err.into())` from the enclosing function.
#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into())
	};
}

/// Panics with the formatted error.
#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err)
	};
}

/// Bails out with `$err` unless `$cond` holds.
#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}
