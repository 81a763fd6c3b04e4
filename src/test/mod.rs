// Copyright 2023-2025 StorSwift Inc.
// SPDX-License-Identifier: Apache-2.0

//! Beacons and chain infos published by the drand networks, shared by unit tests.
