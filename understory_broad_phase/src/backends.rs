// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in [`BoxIntersector`](crate::BoxIntersector) backends.

pub(crate) mod brute_force;
#[cfg(feature = "backend_grid")]
pub(crate) mod grid;
pub(crate) mod sweep;
