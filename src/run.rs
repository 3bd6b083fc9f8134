use tracing::{debug, info};

use crate::event::Event;
use crate::generator::PrimaryGenerator;

/// Minimal event loop: asks the generator for primaries once per event.
///
/// Transport of the generated primaries belongs to the host simulation; the
/// manager only numbers events and hands them back.
#[derive(Debug)]
pub struct RunManager<G: PrimaryGenerator> {
    generator: G,
    run_id: u32,
    events_processed: u64,
}

impl<G: PrimaryGenerator> RunManager<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            run_id: 0,
            events_processed: 0,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    pub fn into_generator(self) -> G {
        self.generator
    }

    /// Total events generated over every run so far.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Number of completed runs.
    pub fn runs_completed(&self) -> u32 {
        self.run_id
    }

    /// Generate `n_events` events; event ids continue across runs.
    pub fn beam_on(&mut self, n_events: usize) -> Vec<Event> {
        info!(run = self.run_id, n_events, "run started");
        let mut events = Vec::with_capacity(n_events);
        for _ in 0..n_events {
            let mut event = Event::new(self.events_processed);
            self.generator.generate_primaries(&mut event);
            debug!(
                event = event.event_id,
                vertices = event.number_of_primary_vertices(),
                "primaries generated"
            );
            self.events_processed += 1;
            events.push(event);
        }
        info!(run = self.run_id, events = events.len(), "run finished");
        self.run_id += 1;
        events
    }
}
