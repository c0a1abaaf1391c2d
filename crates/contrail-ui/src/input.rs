use contrail_core::{PointerEvent, Vec2};
use contrail_platform::{InputSource, Result};
use egui::TouchPhase;
use tracing::info;

/// Collects pointer and touch movement from egui's raw event stream.
#[derive(Debug, Default)]
pub struct EguiInput {
    listening: bool,
    pending: Vec<PointerEvent>,
    /// Finger that drives the pointer until it lifts.
    primary_touch: Option<egui::TouchId>,
}

impl EguiInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn collect(&mut self, context: &egui::Context) {
        if !self.listening {
            return;
        }
        context.input(|input| {
            for event in &input.events {
                if let Some(pointer_event) = self.translate(event) {
                    self.pending.push(pointer_event);
                }
            }
        });
    }

    fn translate(&mut self, event: &egui::Event) -> Option<PointerEvent> {
        match event {
            egui::Event::PointerMoved(pos) => Some(PointerEvent::moved(pos.x, pos.y)),
            egui::Event::Touch { id, phase, pos, .. } => {
                let primary = *self.primary_touch.get_or_insert(*id);
                if primary != *id {
                    return None;
                }
                match phase {
                    TouchPhase::Start | TouchPhase::Move => Some(PointerEvent::Touch {
                        touches: vec![Vec2::new(pos.x, pos.y)],
                    }),
                    TouchPhase::End | TouchPhase::Cancel => {
                        self.primary_touch = None;
                        None
                    }
                }
            }
            _ => None,
        }
    }
}

impl InputSource for EguiInput {
    fn start(&mut self) -> Result<()> {
        info!("Pointer listener attached");
        self.listening = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        info!("Pointer listener detached");
        self.listening = false;
        self.pending.clear();
        self.primary_touch = None;
        Ok(())
    }

    fn poll(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.pending)
    }
}
