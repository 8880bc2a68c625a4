//! Core engine implementation

use std::time::{Duration, Instant};

use crate::{
    assets::{FontHandle, ResourceError, ResourceManager},
    core::{ConfigError, EngineConfig},
    ecs::components::FpsCounterModule,
    ecs::SceneError,
    foundation::{logging, time::{FrameContext, Timer}},
    render::RenderBackend,
    scene::SceneManager,
};
use thiserror::Error;

/// Main engine struct
///
/// The engine owns the scenes and shared resources and drives the main loop.
/// The render backend is borrowed per call so the caller keeps control of the
/// window and device behind it.
#[derive(Debug)]
pub struct Engine {
    /// All scenes, updated and rendered every frame
    pub scenes: SceneManager,

    /// Image and font cache
    pub resources: ResourceManager,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        logging::init_with_level(&config.log_level);
        log::info!("Initializing engine '{}'...", config.window.title);

        Ok(Self {
            scenes: SceneManager::new(),
            resources: ResourceManager::new(config.data_path.clone()),
            timer: Timer::new(),
            config,
            running: true,
        })
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frame timer
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Load the configured default font through the resource cache
    pub fn default_font(&mut self) -> Result<FontHandle, EngineError> {
        let font = &self.config.default_font;
        Ok(self.resources.load_font(&font.path, font.size)?)
    }

    /// FPS counter using the default font and configured refresh interval
    pub fn fps_counter(&mut self) -> Result<FpsCounterModule, EngineError> {
        let font = self.default_font()?;
        Ok(FpsCounterModule::new(font).with_interval(self.config.fps_interval))
    }

    /// Tick the clock, then update and draw every scene once
    pub fn run_frame(&mut self, backend: &mut dyn RenderBackend) -> Result<(), EngineError> {
        self.timer.update();
        self.step(self.timer.delta_time(), backend)
    }

    /// Update and draw every scene with an explicit delta time
    ///
    /// The frame is always rendered and presented, even if a module failed.
    pub fn step(&mut self, delta_time: f32, backend: &mut dyn RenderBackend) -> Result<(), EngineError> {
        let result = {
            let mut ctx = FrameContext::new(delta_time, backend);
            self.scenes.update(&mut ctx)
        };

        backend.begin_frame();
        self.scenes.render(backend);
        backend.present();

        result.map_err(EngineError::from)
    }

    /// Run the main loop
    ///
    /// Stops when the backend asks to close, [`quit`](Self::quit) is called,
    /// or `max_frames` frames have run. Module failures are logged and the
    /// loop continues with the next frame. Returns the number of frames run.
    pub fn run(&mut self, backend: &mut dyn RenderBackend, max_frames: Option<u64>) -> u64 {
        log::info!("Starting main loop...");
        let frame_budget = self
            .config
            .target_fps
            .map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps)));

        let mut frames = 0;
        self.running = true;
        while self.running && !backend.should_close() && max_frames.map_or(true, |max| frames < max) {
            let frame_start = Instant::now();

            if let Err(err) = self.run_frame(backend) {
                log::warn!("Frame {} finished with errors: {}", frames, err);
            }
            frames += 1;

            if let Some(budget) = frame_budget {
                let elapsed = frame_start.elapsed();
                if elapsed < budget {
                    std::thread::sleep(budget - elapsed);
                }
            }
        }

        log::info!(
            "Main loop stopped after {} frames ({:.1} FPS average)",
            frames,
            self.timer.average_fps()
        );
        frames
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop would keep running
    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resource loading failed
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// A scene failed to update
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Font;
    use crate::ecs::components::{RenderModule, TextRenderModule};
    use crate::ecs::Entity;
    use crate::render::HeadlessBackend;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn engine() -> Engine {
        Engine::new(EngineConfig::new().with_log_level("warn")).unwrap()
    }

    fn font() -> FontHandle {
        Arc::new(Font::from_bytes("Lingua.otf", 36, Vec::new()))
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = Engine::new(EngineConfig::new().with_target_fps(0));
        assert!(matches!(result, Err(EngineError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_step_renders_and_presents() {
        let mut engine = engine();
        let scene = engine.scenes.create_scene("Demo");
        let mut text = Entity::new();
        text.add_module(TextRenderModule::new("Programming 4 Assignment", font()));
        scene.add(text);

        let mut backend = HeadlessBackend::new();
        engine.step(0.016, &mut backend).unwrap();

        assert_eq!(backend.frames_presented(), 1);
        assert_eq!(backend.draw_calls().len(), 1);
        assert_eq!(backend.rasterized_text(), &["Programming 4 Assignment".to_string()]);
    }

    #[test]
    fn test_step_presents_even_when_a_module_fails() {
        let mut engine = engine();
        let mut counter = Entity::new();
        counter.add_module(FpsCounterModule::new(font()));
        engine.scenes.create_scene("Demo").add(counter);

        let mut backend = HeadlessBackend::new();
        backend.set_fail_rasterization(true);
        let err = engine.step(0.016, &mut backend).unwrap_err();

        assert!(matches!(err, EngineError::Scene(SceneError::ModuleUpdate { .. })));
        assert_eq!(backend.frames_presented(), 1);
    }

    #[test]
    fn test_run_stops_at_frame_limit_or_close() {
        let mut engine = engine();
        let mut backend = HeadlessBackend::new();
        assert_eq!(engine.run(&mut backend, Some(3)), 3);
        assert_eq!(backend.frames_presented(), 3);
        assert_eq!(engine.timer().frame_count(), 3);

        backend.request_close();
        assert_eq!(engine.run(&mut backend, Some(3)), 0);
    }

    #[test]
    fn test_run_keeps_going_after_module_errors() {
        let mut engine = engine();
        let mut text = Entity::new();
        text.add_module(TextRenderModule::new("a", font()));
        engine.scenes.create_scene("Demo").add(text);

        let mut backend = HeadlessBackend::new();
        backend.set_fail_rasterization(true);
        assert_eq!(engine.run(&mut backend, Some(2)), 2);
        assert_eq!(backend.frames_presented(), 2);
    }

    #[test]
    fn test_default_font_loads_from_data_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Lingua.otf"), b"font bytes").unwrap();
        let config = EngineConfig::new().with_data_path(dir.path()).with_log_level("warn");
        let mut engine = Engine::new(config).unwrap();

        let first = engine.default_font().unwrap();
        let second = engine.default_font().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.size, 36);

        let counter = engine.fps_counter().unwrap();
        assert_eq!(counter.interval(), 0.5);
        assert_eq!(engine.resources.stats().fonts, 1);

        let mut entity = Entity::new();
        entity.add_module(RenderModule::new());
        assert!(entity
            .get_module_mut::<RenderModule>()
            .unwrap()
            .set_image_from_path(&mut engine.resources, "missing.png")
            .is_err());
    }

    #[test]
    fn test_missing_default_font() {
        let dir = TempDir::new().unwrap();
        let config = EngineConfig::new().with_data_path(dir.path()).with_log_level("warn");
        let mut engine = Engine::new(config).unwrap();
        assert!(matches!(engine.default_font(), Err(EngineError::Resource(_))));
    }
}
