//! Runs a search on a background thread against its own copy of a position
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::thread::{self, JoinHandle};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use log::{debug, info, error};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A flag shared between a worker and its owner, asking the worker to stop.
///
/// Searches poll it between complete moves, never in the middle of one, so a stopped search
/// always leaves its position consistent.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// Creates a signal which is not yet raised
    pub fn new() -> StopSignal {
        StopSignal::default()
    }

    /// Raises the signal
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once the signal has been raised
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A search running on its own thread.
///
/// The worker owns the position it searches, so the caller's position stays free for display and
/// for new moves. Before touching any data the search shares with the caller, call
/// [`cancel`](#method.cancel): it raises the stop signal and blocks until the search has returned.
/// Dropping a worker cancels it the same way.
#[derive(Debug)]
pub struct SearchWorker<T> {
    handle: Option<JoinHandle<T>>,
    stop: StopSignal,
    finished: Arc<AtomicBool>,
    started: Instant,
}

impl<T: Send + 'static> SearchWorker<T> {
    /// Starts `search(position, stop)` on a new thread
    pub fn spawn<P, F>(position: P, search: F) -> SearchWorker<T>
    where
        P: Send + 'static,
        F: FnOnce(P, StopSignal) -> T + Send + 'static,
    {
        let stop = StopSignal::new();
        let finished = Arc::new(AtomicBool::new(false));

        let handle = {
            let stop = stop.clone();
            let finished = Arc::clone(&finished);
            thread::spawn(move || {
                let result = search(position, stop);
                finished.store(true, Ordering::SeqCst);
                result
            })
        };
        debug!("search worker started");

        SearchWorker {
            handle: Some(handle),
            stop,
            finished,
            started: Instant::now(),
        }
    }
}

impl<T> SearchWorker<T> {
    /// Returns a handle to the worker's stop signal
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Returns `true` if the search has returned
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Asks the search to stop and waits until it has. Returns what the search returned, or `None`
    /// if it panicked.
    pub fn cancel(mut self) -> Option<T> {
        self.stop.stop();
        let result = self.join();
        info!("search worker cancelled after {:?}", self.started.elapsed());
        result
    }

    /// Waits for the search to finish on its own. Returns what the search returned, or `None` if
    /// it panicked.
    pub fn wait(mut self) -> Option<T> {
        let result = self.join();
        info!("search worker finished after {:?}", self.started.elapsed());
        result
    }

    fn join(&mut self) -> Option<T> {
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(result) => Some(result),
            Err(_) => {
                error!("search worker panicked");
                None
            },
        }
    }
}

impl<T> Drop for SearchWorker<T> {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.stop.stop();
            self.join();
        }
    }
}
