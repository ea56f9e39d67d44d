// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Implementation of all rules.

pub mod empty;
pub mod header;
pub mod html;
pub mod placeholders;
pub mod rule;
