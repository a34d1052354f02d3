//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

mod tree;
