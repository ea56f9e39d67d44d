// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Qt translation catalog (`.ts`) reader module.

pub mod catalog;
pub mod lines;
pub mod parser;
pub mod unit;
