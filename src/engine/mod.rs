//! Data structures that support a move search: a result cache, a move-ordering history and a
//! background worker
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod cache;
pub mod history;
pub mod worker;

pub use cache::{ResultCache, CacheConfig, CacheEntry, CachedMove, ScoreType};
pub use history::MoveOrderingHistory;
pub use worker::{SearchWorker, StopSignal};
