/// Input events the simulation understands.
/// Pointer coordinates are in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A drag began at screen coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// The pointer moved to screen coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The drag ended at screen coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// Scroll wheel: positive zooms in, negative zooms out.
    Scroll { delta: f32 },
    /// Scroll wheel anchored at a screen point that stays fixed.
    ScrollAt { delta: f32, x: f32, y: f32 },
    SpeedUp,
    SpeedDown,
    TogglePause,
    /// Restore the configured pan and zoom.
    ResetView,
}

/// A queue of input events.
/// The host pushes events as they arrive; the simulation drains them once per frame.
#[derive(Debug)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::TogglePause);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Scroll { delta: 1.0 });
        q.push(InputEvent::SpeedUp);
        q.push(InputEvent::ResetView);
        let seen: Vec<_> = q.iter().copied().collect();
        assert_eq!(seen, vec![InputEvent::Scroll { delta: 1.0 }, InputEvent::SpeedUp, InputEvent::ResetView]);
        assert_eq!(q.len(), 3);
    }
}
