//! Event sinks - how the engine reports changes to the outside world
//!
//! The engine holds no visual state. Whoever renders or animates tiles
//! registers an [`EventSink`] when the engine is built and receives logical
//! notifications from then on.

use std::sync::mpsc::Sender;

use crate::types::{CellPos, ColorId, GridEvent};

/// Receiver of grid notifications. Every method defaults to a no-op.
pub trait EventSink {
    /// A tile was populated at `pos`
    fn on_cell_created(&mut self, _pos: CellPos, _color: ColorId) {}

    /// A tile fell from `from_row` to `pos` during compaction
    fn on_cell_moved(&mut self, _pos: CellPos, _from_row: usize) {}

    /// A group was collected
    fn on_cells_removed(&mut self, _cells: &[CellPos]) {}

    /// Regeneration started (`true`) or ended (`false`)
    fn on_no_moves_state(&mut self, _active: bool) {}
}

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSink;

impl EventSink for NullSink {}

/// Sink that records every notification in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GridEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take all recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn push(&mut self, event: GridEvent) {
        self.events.push(event);
    }
}

impl EventSink for EventLog {
    fn on_cell_created(&mut self, pos: CellPos, color: ColorId) {
        self.push(GridEvent::CellCreated { pos, color });
    }

    fn on_cell_moved(&mut self, pos: CellPos, from_row: usize) {
        self.push(GridEvent::CellMoved { pos, from_row });
    }

    fn on_cells_removed(&mut self, cells: &[CellPos]) {
        self.push(GridEvent::CellsRemoved(cells.to_vec()));
    }

    fn on_no_moves_state(&mut self, active: bool) {
        self.push(GridEvent::NoMovesState(active));
    }
}

/// Channel sink: events are forwarded to the receiving end.
///
/// A dropped receiver is not an error for the engine; the event is discarded.
impl EventSink for Sender<GridEvent> {
    fn on_cell_created(&mut self, pos: CellPos, color: ColorId) {
        let _ = self.send(GridEvent::CellCreated { pos, color });
    }

    fn on_cell_moved(&mut self, pos: CellPos, from_row: usize) {
        let _ = self.send(GridEvent::CellMoved { pos, from_row });
    }

    fn on_cells_removed(&mut self, cells: &[CellPos]) {
        let _ = self.send(GridEvent::CellsRemoved(cells.to_vec()));
    }

    fn on_no_moves_state(&mut self, active: bool) {
        let _ = self.send(GridEvent::NoMovesState(active));
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_cell_created(&mut self, pos: CellPos, color: ColorId) {
        (**self).on_cell_created(pos, color);
    }

    fn on_cell_moved(&mut self, pos: CellPos, from_row: usize) {
        (**self).on_cell_moved(pos, from_row);
    }

    fn on_cells_removed(&mut self, cells: &[CellPos]) {
        (**self).on_cells_removed(cells);
    }

    fn on_no_moves_state(&mut self, active: bool) {
        (**self).on_no_moves_state(active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn event_log_records_in_order() {
        let mut log = EventLog::new();
        log.on_no_moves_state(true);
        log.on_cell_created(CellPos::new(0, 1), 2);
        log.on_cell_moved(CellPos::new(0, 0), 3);
        log.on_no_moves_state(false);

        assert_eq!(
            log.drain(),
            vec![
                GridEvent::NoMovesState(true),
                GridEvent::CellCreated {
                    pos: CellPos::new(0, 1),
                    color: 2
                },
                GridEvent::CellMoved {
                    pos: CellPos::new(0, 0),
                    from_row: 3
                },
                GridEvent::NoMovesState(false),
            ]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn channel_sink_forwards_events() {
        let (mut tx, rx) = mpsc::channel();
        tx.on_cells_removed(&[CellPos::new(1, 1)]);
        assert_eq!(
            rx.try_recv().unwrap(),
            GridEvent::CellsRemoved(vec![CellPos::new(1, 1)])
        );
    }

    #[test]
    fn channel_sink_survives_dropped_receiver() {
        let (mut tx, rx) = mpsc::channel::<GridEvent>();
        drop(rx);
        tx.on_no_moves_state(true);
    }
}
