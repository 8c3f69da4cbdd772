//! Event types for the TUI event loop.

use agentdesk_core::ProbeOutcome;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    /// Completion signal for a dropped document batch.
    DocumentsProcessed { batch: Vec<String> },
    /// Completion signal for an endpoint reachability probe.
    ProbeFinished { endpoint_id: String, outcome: ProbeOutcome },
}
