//! FPS counter module
//!
//! Writes the current frame rate into the entity's text module twice a second.

use crate::assets::FontHandle;
use crate::ecs::components::TextRenderModule;
use crate::ecs::module::{ModuleError, ModuleKind};
use crate::ecs::{EntityId, World};
use crate::foundation::math::round_to_hundredths;

/// Seconds between two text refreshes
pub const FPS_UPDATE_INTERVAL: f32 = 0.5;

/// Frame rate display
#[derive(Debug, Clone)]
pub struct FpsCounterModule {
    font: FontHandle,
    elapsed: f32,
    interval: f32,
    last_fps: f32,
}

impl FpsCounterModule {
    /// Counter whose auto-attached text uses `font`
    pub fn new(font: FontHandle) -> Self {
        Self {
            font,
            elapsed: 0.0,
            interval: FPS_UPDATE_INTERVAL,
            last_fps: 0.0,
        }
    }

    /// Builder pattern: set the refresh interval in seconds
    pub fn with_interval(mut self, interval: f32) -> Self {
        self.interval = interval;
        self
    }

    /// Text module attached when the entity has none
    pub fn default_text(&self) -> TextRenderModule {
        TextRenderModule::new("0 FPS", self.font.clone())
    }

    /// Most recently displayed value
    pub fn fps(&self) -> f32 {
        self.last_fps
    }

    /// Refresh interval in seconds
    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub(crate) fn update(
        &mut self,
        world: &mut World,
        owner: EntityId,
        delta_time: f32,
    ) -> Result<(), ModuleError> {
        self.elapsed += delta_time;
        if self.elapsed < self.interval {
            return Ok(());
        }
        self.elapsed = 0.0;

        self.last_fps = if delta_time > 0.0 {
            round_to_hundredths(1.0 / delta_time)
        } else {
            0.0
        };

        let text = world
            .get_module_mut::<TextRenderModule>(owner)
            .ok_or(ModuleError::MissingDependency(ModuleKind::TextRender))?;
        text.set_text(format!("{:.2} FPS", self.last_fps));
        Ok(())
    }
}
