// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! File format implementations for sensor data.
//!
//! - [`h5`]: HDF5 drive recordings (reader behind the `hdf5` feature)
//! - [`pc5`]: PC5 random-access array container

pub mod h5;
pub mod pc5;
