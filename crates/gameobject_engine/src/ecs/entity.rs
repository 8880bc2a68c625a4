//! Entity implementation
//!
//! An entity owns an ordered list of modules and records its place in the scene
//! graph. Graph edges are plain [`EntityId`]s and are only ever changed by the
//! [`World`](crate::ecs::World), which keeps both directions consistent.

use crate::ecs::module::{Module, ModuleKind, ModuleKinds, ModuleSlot, ModuleType};

slotmap::new_key_type! {
    /// Generation-checked entity identifier
    ///
    /// A removed entity's id never resolves again, even if its slot is reused.
    pub struct EntityId;
}

/// Scene graph node composed from behavior modules
#[derive(Debug, Clone, Default)]
pub struct Entity {
    pub(crate) modules: Vec<ModuleSlot>,
    kinds: ModuleKinds,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
}

impl Entity {
    /// Create an entity without modules
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `module`, first attaching any dependency it declares
    ///
    /// Returns `None` and leaves the entity untouched if a module of the same
    /// kind is already attached (even one marked for removal).
    pub fn add_module<T: ModuleType>(&mut self, module: T) -> Option<&mut T> {
        if !self.attach(module.into()) {
            return None;
        }
        self.modules
            .last_mut()
            .and_then(|slot| slot.module.as_mut())
            .and_then(T::from_module_mut)
    }

    /// Untyped attach with dependency resolution
    pub(crate) fn attach(&mut self, module: Module) -> bool {
        let kind = module.kind();
        if self.kinds.contains(kind.flag()) {
            log::trace!("Ignoring duplicate {:?} module", kind);
            return false;
        }

        for dependency in module.dependencies() {
            if self.attach(dependency) {
                log::debug!("Auto-attached {:?} module required by {:?}", self.last_kind(), kind);
            }
        }

        self.modules.push(ModuleSlot::new(module));
        self.kinds |= kind.flag();
        true
    }

    fn last_kind(&self) -> Option<ModuleKind> {
        self.modules.last().map(|slot| slot.kind)
    }

    /// First module of type `T`, if attached
    pub fn get_module<T: ModuleType>(&self) -> Option<&T> {
        self.modules
            .iter()
            .filter(|slot| slot.kind == T::KIND)
            .find_map(|slot| slot.module.as_ref().and_then(T::from_module))
    }

    /// Mutable access to the first module of type `T`
    pub fn get_module_mut<T: ModuleType>(&mut self) -> Option<&mut T> {
        self.modules
            .iter_mut()
            .filter(|slot| slot.kind == T::KIND)
            .find_map(|slot| slot.module.as_mut().and_then(T::from_module_mut))
    }

    /// Whether a module of type `T` is attached
    pub fn has_module<T: ModuleType>(&self) -> bool {
        self.has_kind(T::KIND)
    }

    /// Whether a module of `kind` is attached
    pub fn has_kind(&self, kind: ModuleKind) -> bool {
        self.kinds.contains(kind.flag())
    }

    /// Mark every module of type `T` for removal
    ///
    /// The module keeps working and stays visible to queries until the end of
    /// the entity's next update pass.
    pub fn remove_module<T: ModuleType>(&mut self) {
        for slot in self.modules.iter_mut().filter(|slot| slot.kind == T::KIND) {
            slot.marked_for_delete = true;
        }
    }

    /// Whether a module of type `T` is waiting to be removed
    pub fn is_marked_for_removal<T: ModuleType>(&self) -> bool {
        self.modules
            .iter()
            .any(|slot| slot.kind == T::KIND && slot.marked_for_delete)
    }

    /// Erase all modules marked for removal, keeping the order of the rest
    ///
    /// Returns the kinds that are no longer attached.
    pub(crate) fn purge_removed(&mut self) -> ModuleKinds {
        let before = self.modules.len();
        self.modules.retain(|slot| !slot.marked_for_delete);
        if self.modules.len() == before {
            return ModuleKinds::empty();
        }

        let remaining = self
            .modules
            .iter()
            .fold(ModuleKinds::empty(), |acc, slot| acc | slot.kind.flag());
        let removed = self.kinds.difference(remaining);
        self.kinds = remaining;
        log::debug!(
            "Removed {} module(s) {:?}, {} remaining",
            before - self.modules.len(),
            removed,
            self.modules.len()
        );
        removed
    }

    /// Number of attached modules, including ones marked for removal
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Kinds of the attached modules in update order
    pub fn module_kinds(&self) -> Vec<ModuleKind> {
        self.modules.iter().map(|slot| slot.kind).collect()
    }

    /// Parent in the scene graph
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Children in attachment order
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }
}
