//! Shared helpers for delivery tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use ses_delivery::{DeliveryHandler, SesEngine};

/// Handler that records every delivery in order.
#[derive(Default)]
pub struct Recorder {
    log: Mutex<Vec<(usize, Vec<u8>)>>,
}

impl DeliveryHandler for Recorder {
    fn on_deliver(&self, sender: usize, payload: &[u8]) {
        self.log.lock().unwrap().push((sender, payload.to_vec()));
    }
}

impl Recorder {
    pub fn deliveries(&self) -> Vec<(usize, Vec<u8>)> {
        self.log.lock().unwrap().clone()
    }

    /// Delivered payloads as UTF-8 strings.
    pub fn payloads(&self) -> Vec<String> {
        self.deliveries()
            .into_iter()
            .map(|(_, p)| String::from_utf8(p).unwrap())
            .collect()
    }
}

/// A cluster of `n` engines, each with its own recorder.
pub fn cluster(n: usize) -> Vec<(SesEngine, Arc<Recorder>)> {
    (0..n)
        .map(|id| {
            let recorder = Arc::new(Recorder::default());
            let engine = SesEngine::new(n, id, recorder.clone()).unwrap();
            (engine, recorder)
        })
        .collect()
}
