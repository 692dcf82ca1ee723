// src/model/queues.rs

use std::collections::VecDeque;

/// An order that has been placed but not yet received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingOrder {
    pub arrival_day: usize,
    pub quantity: f64,
}

/// Orders in transit, kept in arrival order.
///
/// With a fixed lead time arrivals are scheduled in the order they are
/// placed, so the front of the queue is always the next to land.
#[derive(Debug, Clone, Default)]
pub struct ReplenishmentPipeline {
    buffer: VecDeque<PendingOrder>,
}

impl ReplenishmentPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items enter the pipeline.
    pub fn schedule(&mut self, arrival_day: usize, quantity: f64) {
        let order = PendingOrder {
            arrival_day,
            quantity,
        };
        // Keep the queue sorted even if a caller schedules out of order.
        let pos = self
            .buffer
            .iter()
            .rposition(|o| o.arrival_day <= arrival_day)
            .map_or(0, |i| i + 1);
        self.buffer.insert(pos, order);
    }

    /// Removes and totals everything due on or before `day`.
    /// Call this at the START of the day.
    pub fn take_arrivals(&mut self, day: usize) -> f64 {
        let mut arrived = 0.0;
        while let Some(front) = self.buffer.front() {
            if front.arrival_day > day {
                break;
            }
            arrived += front.quantity;
            self.buffer.pop_front();
        }
        arrived
    }

    /// Units ordered but not yet received.
    pub fn on_order(&self) -> f64 {
        self.buffer.iter().map(|o| o.quantity).sum()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
