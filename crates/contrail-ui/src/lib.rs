//! eframe preview window hosting a contrail `Scene`.

use std::cell::Cell;
use std::rc::Rc;

use contrail_core::{
    ConfigError, ElementId, ParallaxTarget, PointerTracker, Scene, SceneConfig, SystemClock, Vec2,
};
use contrail_platform::{ContainerRect, InputSource, Result};
use crossbeam_channel::{Receiver, Sender};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

mod input;
mod paint;

pub use input::EguiInput;

pub enum PreviewCommand {
    /// Remount the scene with a new configuration.
    Reload(SceneConfig),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewEvent {
    Mounted { parallax_elements: usize },
    ReloadRejected(String),
    Unmounted { frames: u64, spawned: u64 },
}

/// A decorative hero element that drifts with the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub label: &'static str,
    /// Resting position as a fraction of the container size.
    pub anchor: Vec2,
    pub radius: f32,
    pub color: egui::Color32,
    pub offset: Vec2,
}

impl ParallaxTarget for Decoration {
    fn apply_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }
}

/// The hero's floating shapes paired with their parallax depth.
pub fn hero_decorations() -> Vec<(Decoration, f32)> {
    let shape = |label, x, y, radius, [r, g, b, a]: [u8; 4]| Decoration {
        label,
        anchor: Vec2::new(x, y),
        radius,
        color: egui::Color32::from_rgba_unmultiplied(r, g, b, a),
        offset: Vec2::ZERO,
    };
    vec![
        (shape("orb-violet", 0.2, 0.3, 48.0, [0x7A, 0x5C, 0xFA, 70]), 0.5),
        (shape("orb-teal", 0.75, 0.25, 36.0, [0x12, 0xFC, 0xD4, 60]), 1.0),
        (shape("orb-indigo", 0.6, 0.7, 64.0, [0x5A, 0x35, 0xF2, 50]), 2.0),
        (shape("orb-magenta", 0.3, 0.8, 24.0, [0xC1, 0x4D, 0xFF, 80]), 4.0),
    ]
}

fn mount_scene(
    config: SceneConfig,
    container: &Rc<Cell<Option<ContainerRect>>>,
) -> std::result::Result<(Scene<Decoration>, Vec<ElementId>), ConfigError> {
    let bounds = Rc::clone(container);
    let pointer = PointerTracker::relative_to(move || bounds.get().map(|rect| rect.top_left()));
    let mut scene = Scene::mount(
        config,
        pointer,
        Rc::new(SystemClock::new()),
        StdRng::from_entropy(),
    )?;
    let ids = hero_decorations()
        .into_iter()
        .map(|(decoration, depth)| scene.register_parallax(decoration, depth))
        .collect();
    Ok((scene, ids))
}

pub struct PreviewApp {
    scene: Option<Scene<Decoration>>,
    decoration_ids: Vec<ElementId>,
    container: Rc<Cell<Option<ContainerRect>>>,
    input: EguiInput,
    command_receiver: Receiver<PreviewCommand>,
    event_sender: Sender<PreviewEvent>,
}

impl PreviewApp {
    pub fn new(
        config: SceneConfig,
        command_receiver: Receiver<PreviewCommand>,
        event_sender: Sender<PreviewEvent>,
    ) -> std::result::Result<Self, ConfigError> {
        let container = Rc::new(Cell::new(None));
        let (scene, decoration_ids) = mount_scene(config, &container)?;
        let mut app = Self {
            scene: Some(scene),
            decoration_ids,
            container,
            input: EguiInput::new(),
            command_receiver,
            event_sender,
        };
        app.attach();
        Ok(app)
    }

    fn attach(&mut self) {
        if let Err(err) = self.input.start() {
            warn!("failed to attach pointer listener: {err}");
        }
        let _ = self.event_sender.send(PreviewEvent::Mounted {
            parallax_elements: self.decoration_ids.len(),
        });
    }

    fn unmount(&mut self) {
        let Some(scene) = self.scene.take() else {
            return;
        };
        if let Err(err) = self.input.stop() {
            warn!("failed to detach pointer listener: {err}");
        }
        let teardown = scene.unmount();
        self.decoration_ids.clear();
        let _ = self.event_sender.send(PreviewEvent::Unmounted {
            frames: teardown.frames,
            spawned: teardown.spawned_total,
        });
    }

    fn reload(&mut self, config: SceneConfig) {
        if let Err(err) = config.validate() {
            warn!("UI: rejected config reload: {err}");
            let _ = self.event_sender.send(PreviewEvent::ReloadRejected(err.to_string()));
            return;
        }
        self.unmount();
        match mount_scene(config, &self.container) {
            Ok((scene, ids)) => {
                info!("UI: scene remounted with new config");
                self.scene = Some(scene);
                self.decoration_ids = ids;
                self.attach();
            }
            Err(err) => {
                warn!("UI: remount failed: {err}");
                let _ = self.event_sender.send(PreviewEvent::ReloadRejected(err.to_string()));
            }
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, context: &egui::Context, _frame: &mut eframe::Frame) {
        if context.input(|i| i.viewport().close_requested()) {
            info!("UI: CloseRequested -> unmount scene");
            self.unmount();
            return;
        }
        while let Ok(command) = self.command_receiver.try_recv() {
            match command {
                PreviewCommand::Reload(config) => self.reload(config),
            }
        }

        self.input.collect(context);
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(context, |ui| {
                let rect = ui.max_rect();
                self.container.set(Some(ContainerRect::new(
                    rect.min.x,
                    rect.min.y,
                    rect.width(),
                    rect.height(),
                )));
                let painter = ui.painter();
                paint::backdrop(painter, rect);

                let Some(scene) = self.scene.as_mut() else {
                    return;
                };
                for event in self.input.poll() {
                    scene.handle_input(&event);
                }
                scene.tick();
                let frame = scene.render_list();

                paint::ambient(painter, rect, &frame.ambient);
                paint::decorations(
                    painter,
                    rect.min,
                    rect.size(),
                    self.decoration_ids
                        .iter()
                        .filter_map(|id| scene.parallax().handle(*id)),
                );
                paint::trail(painter, rect.min, &frame);
                paint::countdown(painter, rect, scene.time_left());
            });
        context.request_repaint();
    }
}

impl Drop for PreviewApp {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Opens the preview window and blocks until it closes. Must run on the main thread.
pub fn run_preview(
    config: SceneConfig,
    command_receiver: Receiver<PreviewCommand>,
    event_sender: Sender<PreviewEvent>,
) -> Result<()> {
    config.validate()?;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Contrail preview")
            .with_inner_size([config.ambient.viewport_width, config.ambient.viewport_height]),
        ..Default::default()
    };
    eframe::run_native(
        "Contrail",
        native_options,
        Box::new(move |_creation_context| {
            let app = PreviewApp::new(config, command_receiver, event_sender)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| format!("eframe failed to start: {err}"))?;
    Ok(())
}
