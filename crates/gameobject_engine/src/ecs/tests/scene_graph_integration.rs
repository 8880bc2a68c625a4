//! Scene graph integration tests
//!
//! Reparenting policies, cycle guards and dirty propagation across several
//! levels of the hierarchy.

use crate::ecs::components::{RenderModule, TransformModule};
use crate::ecs::{Entity, EntityId, World};
use crate::foundation::math::Vec3;
use crate::foundation::time::FrameContext;
use crate::render::HeadlessBackend;
use approx::assert_relative_eq;

const EPSILON: f32 = 1e-4;

fn spawn_at(world: &mut World, position: Vec3) -> EntityId {
    let mut entity = Entity::new();
    entity.add_module(TransformModule::new());
    let id = world.spawn(entity);
    world.set_local_position(id, position);
    id
}

/// Graph edges plus local transform state of every listed entity
fn snapshot(world: &World, ids: &[EntityId]) -> Vec<(Option<EntityId>, Vec<EntityId>, Option<TransformModule>)> {
    ids.iter()
        .map(|&id| {
            (
                world.parent(id),
                world.children(id).to_vec(),
                world.get_module::<TransformModule>(id).cloned(),
            )
        })
        .collect()
}

#[test]
fn test_child_follows_parent_scenario() {
    let mut world = World::new();
    let a = spawn_at(&mut world, Vec3::zeros());
    let b = spawn_at(&mut world, Vec3::zeros());

    world.set_parent(b, Some(a), false);
    world.set_local_position(b, Vec3::new(10.0, 5.0, 0.0));
    assert_relative_eq!(world.world_position(b).unwrap(), Vec3::new(10.0, 5.0, 0.0));

    world.set_local_position(a, Vec3::new(1.0, 1.0, 0.0));
    assert_relative_eq!(world.world_position(b).unwrap(), Vec3::new(11.0, 6.0, 0.0));
}

#[test]
fn test_keep_world_position_across_reparent_sequence() {
    let mut world = World::new();
    let p1 = spawn_at(&mut world, Vec3::new(12.0, -3.0, 0.5));
    let p2 = spawn_at(&mut world, Vec3::new(-40.0, 7.5, 2.0));
    let p3 = spawn_at(&mut world, Vec3::new(3.0, 3.0, 3.0));
    world.set_parent(p3, Some(p2), false);
    let node = spawn_at(&mut world, Vec3::new(100.0, 200.0, 0.0));

    for target in [Some(p1), Some(p3), Some(p2), None, Some(p3)] {
        let before = world.world_position(node).unwrap();
        world.set_parent(node, target, true);
        let after = world.world_position(node).unwrap();
        assert_relative_eq!(before, after, epsilon = EPSILON);
        assert_eq!(world.parent(node), target);
    }
}

#[test]
fn test_keep_local_position_composes_with_parent() {
    let mut world = World::new();
    let p1 = spawn_at(&mut world, Vec3::new(12.0, -3.0, 0.5));
    let p2 = spawn_at(&mut world, Vec3::new(-40.0, 7.5, 2.0));
    let node = spawn_at(&mut world, Vec3::new(1.0, 2.0, 3.0));

    for target in [p1, p2] {
        let local = world.local_position(node).unwrap();
        world.set_parent(node, Some(target), false);

        assert_eq!(world.local_position(node).unwrap(), local);
        let expected = world.world_position(target).unwrap() + local;
        assert_relative_eq!(world.world_position(node).unwrap(), expected, epsilon = EPSILON);
    }
}

#[test]
fn test_illegal_reparents_change_nothing() {
    let mut world = World::new();
    let root = spawn_at(&mut world, Vec3::new(1.0, 2.0, 0.0));
    let middle = spawn_at(&mut world, Vec3::new(3.0, 4.0, 0.0));
    let leaf = spawn_at(&mut world, Vec3::new(5.0, 6.0, 0.0));
    world.set_parent(middle, Some(root), false);
    world.set_parent(leaf, Some(middle), false);
    world.world_position(leaf);

    let ids = [root, middle, leaf];
    let before = snapshot(&world, &ids);

    // Self
    world.set_parent(middle, Some(middle), true);
    // Current parent
    world.set_parent(middle, Some(root), true);
    // Descendants: direct child and grandchild
    world.set_parent(root, Some(middle), true);
    world.set_parent(root, Some(leaf), false);
    // Same requests from the other side
    world.add_child(leaf, root, true);
    world.add_child(middle, middle, false);
    world.remove_child(leaf, middle, true);

    assert_eq!(snapshot(&world, &ids), before);
}

#[test]
fn test_dirty_propagation_through_deep_chain() {
    let mut world = World::new();
    let mut chain = vec![spawn_at(&mut world, Vec3::new(1.0, 0.0, 0.0))];
    for depth in 1..5 {
        let node = spawn_at(&mut world, Vec3::new(1.0, depth as f32, 0.0));
        world.set_parent(node, chain.last().copied(), false);
        chain.push(node);
    }
    let leaf = *chain.last().unwrap();

    // Warm every cache on the chain
    assert_relative_eq!(world.world_position(leaf).unwrap(), Vec3::new(5.0, 10.0, 0.0));
    for &id in &chain {
        assert!(!world.get_module::<TransformModule>(id).unwrap().is_dirty());
    }

    world.set_local_position(chain[0], Vec3::new(-9.0, 0.0, 4.0));
    for &id in &chain {
        assert!(world.get_module::<TransformModule>(id).unwrap().is_dirty());
    }
    assert_relative_eq!(world.world_position(leaf).unwrap(), Vec3::new(-5.0, 10.0, 4.0));

    // A middle node change only affects its own subtree
    world.set_local_position(chain[2], Vec3::new(0.0, 0.0, 0.0));
    assert!(!world.get_module::<TransformModule>(chain[1]).unwrap().is_dirty());
    assert!(world.get_module::<TransformModule>(chain[3]).unwrap().is_dirty());
    assert_relative_eq!(world.world_position(leaf).unwrap(), Vec3::new(-6.0, 8.0, 4.0));
}

#[test]
fn test_dirty_propagation_skips_over_transformless_node() {
    let mut world = World::new();
    let root = spawn_at(&mut world, Vec3::new(2.0, 0.0, 0.0));
    let group = world.spawn(Entity::new());
    let leaf = spawn_at(&mut world, Vec3::new(1.0, 0.0, 0.0));
    world.set_parent(group, Some(root), false);
    world.set_parent(leaf, Some(group), false);

    assert_relative_eq!(world.world_position(leaf).unwrap(), Vec3::new(1.0, 0.0, 0.0));
    world.set_local_position(root, Vec3::new(5.0, 0.0, 0.0));
    assert!(world.get_module::<TransformModule>(leaf).unwrap().is_dirty());
}

#[test]
fn test_reparent_moves_whole_subtree() {
    let mut world = World::new();
    let old_root = spawn_at(&mut world, Vec3::new(10.0, 0.0, 0.0));
    let new_root = spawn_at(&mut world, Vec3::new(0.0, 20.0, 0.0));
    let node = spawn_at(&mut world, Vec3::new(1.0, 1.0, 0.0));
    let child = spawn_at(&mut world, Vec3::new(2.0, 2.0, 0.0));
    world.set_parent(node, Some(old_root), false);
    world.set_parent(child, Some(node), false);
    assert_relative_eq!(world.world_position(child).unwrap(), Vec3::new(13.0, 3.0, 0.0));

    world.set_parent(node, Some(new_root), false);
    assert_relative_eq!(world.world_position(child).unwrap(), Vec3::new(3.0, 23.0, 0.0));
    assert!(world.children(old_root).is_empty());
    assert_eq!(world.children(new_root), &[node]);
}

#[test]
fn test_transform_attached_under_parent_picks_up_offset() {
    let mut world = World::new();
    let parent = spawn_at(&mut world, Vec3::new(10.0, 0.0, 0.0));
    let child = world.spawn(Entity::new());
    world.set_parent(child, Some(parent), false);

    // Render pulls in a default transform for the child
    world.add_module(child, RenderModule::new());
    assert!(world.get_module::<TransformModule>(child).unwrap().is_dirty());
    assert_relative_eq!(world.world_position(child).unwrap(), Vec3::new(10.0, 0.0, 0.0));
}

#[test]
fn test_transform_attached_to_group_invalidates_descendants() {
    let mut world = World::new();
    let group = world.spawn(Entity::new());
    let leaf = spawn_at(&mut world, Vec3::new(1.0, 0.0, 0.0));
    world.set_parent(leaf, Some(group), false);
    assert_relative_eq!(world.world_position(leaf).unwrap(), Vec3::new(1.0, 0.0, 0.0));

    world.add_module(group, TransformModule::from_position(Vec3::new(0.0, 5.0, 0.0)));
    assert!(world.get_module::<TransformModule>(leaf).unwrap().is_dirty());
    assert_relative_eq!(world.world_position(leaf).unwrap(), Vec3::new(1.0, 5.0, 0.0));
}

#[test]
fn test_transform_attached_through_entity_starts_stale() {
    let mut world = World::new();
    let parent = spawn_at(&mut world, Vec3::new(3.0, 4.0, 0.0));
    let child = world.spawn(Entity::new());
    world.set_parent(child, Some(parent), false);

    world.get_mut(child).unwrap().add_module(TransformModule::new());
    assert_relative_eq!(world.world_position(child).unwrap(), Vec3::new(3.0, 4.0, 0.0));
}

#[test]
fn test_purged_parent_transform_invalidates_children() {
    let mut world = World::new();
    let parent = spawn_at(&mut world, Vec3::new(10.0, 0.0, 0.0));
    let child = spawn_at(&mut world, Vec3::zeros());
    world.set_parent(child, Some(parent), false);
    assert_relative_eq!(world.world_position(child).unwrap(), Vec3::new(10.0, 0.0, 0.0));

    world.remove_module::<TransformModule>(parent);
    let mut backend = HeadlessBackend::new();
    let mut ctx = FrameContext::new(0.016, &mut backend);
    world.update_entity(parent, &mut ctx).unwrap();

    assert!(!world.has_module::<TransformModule>(parent));
    assert!(world.get_module::<TransformModule>(child).unwrap().is_dirty());
    assert_relative_eq!(world.world_position(child).unwrap(), Vec3::zeros());
}
