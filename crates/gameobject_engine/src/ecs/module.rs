//! Module registry types
//!
//! Behavior modules form a closed set. Each entity stores them as [`Module`]
//! values tagged by [`ModuleKind`], and typed access goes through the
//! [`ModuleType`] trait instead of runtime type introspection.

use bitflags::bitflags;
use thiserror::Error;

use crate::ecs::components::{
    FpsCounterModule, RenderModule, RotatorModule, TextRenderModule, TransformModule,
};
use crate::ecs::{EntityId, World};
use crate::foundation::time::FrameContext;
use crate::render::BackendError;

/// Errors raised while a module updates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModuleError {
    /// The rendering backend failed (text rasterization, texture creation)
    #[error("Backend failure: {0}")]
    Backend(#[from] BackendError),

    /// A module this one writes to is not attached to the entity
    #[error("Required {0:?} module is missing")]
    MissingDependency(ModuleKind),
}

/// Tag identifying the concrete type of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// [`TransformModule`]
    Transform,
    /// [`RenderModule`]
    Render,
    /// [`TextRenderModule`]
    TextRender,
    /// [`RotatorModule`]
    Rotator,
    /// [`FpsCounterModule`]
    FpsCounter,
}

bitflags! {
    /// Set of module kinds attached to an entity
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModuleKinds: u8 {
        /// Transform module present
        const TRANSFORM = 1 << 0;
        /// Render module present
        const RENDER = 1 << 1;
        /// Text render module present
        const TEXT_RENDER = 1 << 2;
        /// Rotator module present
        const ROTATOR = 1 << 3;
        /// FPS counter module present
        const FPS_COUNTER = 1 << 4;
    }
}

impl ModuleKind {
    /// Single-bit set for this kind
    pub const fn flag(self) -> ModuleKinds {
        match self {
            Self::Transform => ModuleKinds::TRANSFORM,
            Self::Render => ModuleKinds::RENDER,
            Self::TextRender => ModuleKinds::TEXT_RENDER,
            Self::Rotator => ModuleKinds::ROTATOR,
            Self::FpsCounter => ModuleKinds::FPS_COUNTER,
        }
    }
}

/// A behavior module attached to an entity
#[derive(Debug, Clone)]
pub enum Module {
    /// Local/world position
    Transform(TransformModule),
    /// Image drawing
    Render(RenderModule),
    /// Text rasterization
    TextRender(TextRenderModule),
    /// Circular motion
    Rotator(RotatorModule),
    /// Frame rate display
    FpsCounter(FpsCounterModule),
}

impl Module {
    /// Kind tag of this module
    pub const fn kind(&self) -> ModuleKind {
        match self {
            Self::Transform(_) => ModuleKind::Transform,
            Self::Render(_) => ModuleKind::Render,
            Self::TextRender(_) => ModuleKind::TextRender,
            Self::Rotator(_) => ModuleKind::Rotator,
            Self::FpsCounter(_) => ModuleKind::FpsCounter,
        }
    }

    /// Default-constructed modules this one needs on the same entity
    ///
    /// The entity factory attaches whichever of these are missing before the
    /// module itself, so dependencies always precede their dependents in
    /// update order.
    pub fn dependencies(&self) -> Vec<Module> {
        match self {
            Self::Transform(_) => Vec::new(),
            Self::Render(_) | Self::Rotator(_) => vec![TransformModule::new().into()],
            Self::TextRender(_) => vec![RenderModule::new().into()],
            Self::FpsCounter(counter) => vec![counter.default_text().into()],
        }
    }

    /// Run this module's per-frame behavior
    ///
    /// The module has been taken out of its slot, so `world` can be used freely
    /// to reach sibling modules and other entities.
    pub(crate) fn update(
        &mut self,
        world: &mut World,
        owner: EntityId,
        ctx: &mut FrameContext<'_>,
    ) -> Result<(), ModuleError> {
        match self {
            Self::Transform(_) | Self::Render(_) => Ok(()),
            Self::TextRender(text) => text.update(world, owner, ctx),
            Self::Rotator(rotator) => {
                rotator.update(world, owner, ctx.delta_time);
                Ok(())
            }
            Self::FpsCounter(counter) => counter.update(world, owner, ctx.delta_time),
        }
    }
}

/// Typed view of one [`Module`] variant
pub trait ModuleType: Into<Module> + 'static {
    /// Kind tag of the implementing type
    const KIND: ModuleKind;

    /// Borrow the inner value if `module` is of this type
    fn from_module(module: &Module) -> Option<&Self>;

    /// Mutably borrow the inner value if `module` is of this type
    fn from_module_mut(module: &mut Module) -> Option<&mut Self>;
}

macro_rules! impl_module_type {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Module {
            fn from(module: $ty) -> Self {
                Module::$variant(module)
            }
        }

        impl ModuleType for $ty {
            const KIND: ModuleKind = ModuleKind::$variant;

            fn from_module(module: &Module) -> Option<&Self> {
                match module {
                    Module::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_module_mut(module: &mut Module) -> Option<&mut Self> {
                match module {
                    Module::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_module_type!(TransformModule, Transform);
impl_module_type!(RenderModule, Render);
impl_module_type!(TextRenderModule, TextRender);
impl_module_type!(RotatorModule, Rotator);
impl_module_type!(FpsCounterModule, FpsCounter);

/// Storage slot for one module on an entity
#[derive(Debug, Clone)]
pub(crate) struct ModuleSlot {
    pub(crate) kind: ModuleKind,
    /// `None` while the module is checked out for its own update
    pub(crate) module: Option<Module>,
    pub(crate) marked_for_delete: bool,
}

impl ModuleSlot {
    pub(crate) fn new(module: Module) -> Self {
        Self {
            kind: module.kind(),
            module: Some(module),
            marked_for_delete: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_flags_are_distinct() {
        let kinds = [
            ModuleKind::Transform,
            ModuleKind::Render,
            ModuleKind::TextRender,
            ModuleKind::Rotator,
            ModuleKind::FpsCounter,
        ];
        let all = kinds
            .iter()
            .fold(ModuleKinds::empty(), |acc, kind| acc | kind.flag());

        assert_eq!(all, ModuleKinds::all());
    }

    #[test]
    fn test_typed_access_matches_variant_only() {
        let mut module: Module = TransformModule::new().into();

        assert_eq!(module.kind(), ModuleKind::Transform);
        assert!(TransformModule::from_module(&module).is_some());
        assert!(RenderModule::from_module(&module).is_none());
        assert!(TransformModule::from_module_mut(&mut module).is_some());
    }

    #[test]
    fn test_dependency_declarations() {
        let render: Module = RenderModule::new().into();
        let deps: Vec<_> = render.dependencies().iter().map(Module::kind).collect();
        assert_eq!(deps, vec![ModuleKind::Transform]);

        let rotator: Module = RotatorModule::new(1.0, false).into();
        let deps: Vec<_> = rotator.dependencies().iter().map(Module::kind).collect();
        assert_eq!(deps, vec![ModuleKind::Transform]);

        let transform: Module = TransformModule::new().into();
        assert!(transform.dependencies().is_empty());
    }
}
