// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod batch;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod parsers;
pub mod reports;
pub mod utils;
pub mod validator;
