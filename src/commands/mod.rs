// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod doctor;
pub mod exporter;
pub mod goals;
pub mod income;
pub mod months;
pub mod reports;
pub mod templates;
pub mod transactions;
