// Task-Modul: Enthält die Embassy Tasks
//
// Es gibt genau einen Task: den Portal-Loop. Alle Hardware gehört ihm,
// deshalb braucht es weder Channels noch Mutex.

pub mod portal;

// Re-export Tasks für einfachen Import
pub use portal::{portal_loop, portal_task};
