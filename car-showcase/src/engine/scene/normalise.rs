use bevy::math::Affine3A;
use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;

/// Axis-aligned bounds in the model root's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ModelBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    /// Bounds of a mesh-local AABB after moving it by `affine`.
    /// All eight corners are transformed so rotated children stay enclosed.
    pub fn transformed(&self, affine: &Affine3A) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for corner in corners {
            let p = affine.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Bounds after a uniform scale about the root origin.
    pub fn scaled(&self, scale: f32) -> Self {
        Self::new(self.min * scale, self.max * scale)
    }
}

impl From<bevy::render::primitives::Aabb> for ModelBounds {
    fn from(aabb: bevy::render::primitives::Aabb) -> Self {
        let center = Vec3::from(aabb.center);
        let half = Vec3::from(aabb.half_extents);
        Self::new(center - half, center + half)
    }
}

/// Root transform that fits `bounds` into a cube of `target_size` centred on
/// the origin.
///
/// The scale is uniform (`target / largest dimension`). The centre is taken
/// from the bounds *after* scaling, then negated into the translation.
/// Returns `None` for empty or non-finite bounds.
pub fn normalise_transform(bounds: &ModelBounds, target_size: f32) -> Option<Transform> {
    let max_dimension = bounds.size().max_element();
    if !max_dimension.is_finite() || max_dimension <= f32::EPSILON {
        return None;
    }

    let scale = target_size / max_dimension;
    let scaled_center = bounds.scaled(scale).center();

    Some(Transform {
        translation: -scaled_center,
        rotation: Quat::IDENTITY,
        scale: Vec3::splat(scale),
    })
}

/// Every descendant of `root` with its transform relative to the root.
///
/// Composes local transforms down the hierarchy instead of reading
/// `GlobalTransform`, which is not yet propagated the frame a scene spawns.
pub fn descendants_with_transforms(
    root: Entity,
    children: &Query<&Children>,
    transforms: &Query<&Transform>,
) -> Vec<(Entity, Affine3A)> {
    let mut found = Vec::new();
    let mut stack = vec![(root, Affine3A::IDENTITY)];

    while let Some((entity, parent_affine)) = stack.pop() {
        let Ok(entity_children) = children.get(entity) else {
            continue;
        };

        for &child in &entity_children[..] {
            let local = transforms
                .get(child)
                .map(|t| t.compute_affine())
                .unwrap_or(Affine3A::IDENTITY);
            let affine = parent_affine * local;
            found.push((child, affine));
            stack.push((child, affine));
        }
    }

    found
}

/// Union of every mesh AABB under `root`, in root-local space.
pub fn collect_model_bounds(
    root: Entity,
    children: &Query<&Children>,
    transforms: &Query<&Transform>,
    mesh_handles: &Query<&Mesh3d>,
    meshes: &Assets<Mesh>,
) -> Option<ModelBounds> {
    descendants_with_transforms(root, children, transforms)
        .into_iter()
        .filter_map(|(entity, affine)| {
            let mesh = meshes.get(&mesh_handles.get(entity).ok()?.0)?;
            let aabb = mesh.compute_aabb()?;
            Some(ModelBounds::from(aabb).transformed(&affine))
        })
        .reduce(|acc, bounds| acc.union(&bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use constants::render_settings::{DEFAULT_TARGET_SIZE, TARGET_MODEL_SIZE};

    const TOLERANCE: f32 = 1e-4;

    fn assert_close(actual: f32, expected: f32, what: &str) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "{what}: expected {expected}, got {actual}"
        );
    }

    fn apply(transform: &Transform, bounds: &ModelBounds) -> ModelBounds {
        bounds.transformed(&transform.compute_affine())
    }

    #[test]
    fn largest_dimension_matches_target_after_normalising() {
        let samples = [
            ModelBounds::new(Vec3::new(-2.0, 0.0, -1.0), Vec3::new(2.0, 1.5, 1.0)),
            ModelBounds::new(Vec3::new(10.0, 20.0, 30.0), Vec3::new(10.5, 20.2, 34.0)),
            ModelBounds::new(Vec3::new(-300.0, -1.0, -80.0), Vec3::new(150.0, 120.0, 80.0)),
            ModelBounds::new(Vec3::splat(0.001), Vec3::splat(0.002)),
        ];

        for target in [TARGET_MODEL_SIZE, DEFAULT_TARGET_SIZE] {
            for bounds in &samples {
                let transform = normalise_transform(bounds, target).expect("finite bounds");
                let after = apply(&transform, bounds);

                assert_close(after.size().max_element(), target, "largest dimension");
                assert_close(after.center().length(), 0.0, "centroid distance");
            }
        }
    }

    #[test]
    fn scaling_is_uniform_and_preserves_aspect() {
        let bounds = ModelBounds::new(Vec3::ZERO, Vec3::new(4.0, 1.0, 2.0));
        let transform = normalise_transform(&bounds, DEFAULT_TARGET_SIZE).expect("finite bounds");

        assert_eq!(transform.scale, Vec3::splat(2.0));
        let after = apply(&transform, &bounds);
        assert_close(after.size().x, 8.0, "x");
        assert_close(after.size().y, 2.0, "y");
        assert_close(after.size().z, 4.0, "z");
    }

    #[test]
    fn translation_uses_post_scale_centre() {
        let bounds = ModelBounds::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(4.0, 4.0, 4.0));
        let transform = normalise_transform(&bounds, 4.0).expect("finite bounds");

        // Centre (3,3,3) scaled by 2 sits at (6,6,6).
        assert_eq!(transform.translation, Vec3::splat(-6.0));
    }

    #[test]
    fn degenerate_bounds_cannot_be_normalised() {
        let point = ModelBounds::new(Vec3::ONE, Vec3::ONE);
        assert!(normalise_transform(&point, 7.5).is_none());

        let broken = ModelBounds {
            min: Vec3::ZERO,
            max: Vec3::new(f32::NAN, 1.0, 1.0),
        };
        assert!(normalise_transform(&broken, 7.5).is_none());
    }

    #[test]
    fn rotated_child_bounds_enclose_all_corners() {
        let cube = ModelBounds::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let rotation = Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4));

        let rotated = apply(&rotation, &cube);
        assert_close(rotated.max.x, std::f32::consts::SQRT_2, "rotated half width");
        assert_close(rotated.max.y, 1.0, "height unchanged");
    }

    #[test]
    fn hierarchy_bounds_compose_nested_transforms() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>();

        let cuboid = app
            .world_mut()
            .resource_mut::<Assets<Mesh>>()
            .add(Mesh::from(Cuboid::new(2.0, 2.0, 2.0)));

        let world = app.world_mut();
        let root = world.spawn(Transform::from_xyz(100.0, 0.0, 0.0)).id();
        let body = world
            .spawn((Transform::from_xyz(0.0, 1.0, 0.0), ChildOf(root)))
            .id();
        world.spawn((
            Mesh3d(cuboid.clone()),
            Transform::from_xyz(3.0, 0.0, 0.0).with_scale(Vec3::splat(2.0)),
            ChildOf(body),
        ));
        world.spawn((Mesh3d(cuboid), Transform::IDENTITY, ChildOf(root)));

        let bounds = world
            .run_system_once(
                move |children: Query<&Children>,
                      transforms: Query<&Transform>,
                      mesh_handles: Query<&Mesh3d>,
                      meshes: Res<Assets<Mesh>>| {
                    collect_model_bounds(root, &children, &transforms, &mesh_handles, &meshes)
                },
            )
            .expect("system runs")
            .expect("meshes found");

        // Root's own transform is ignored; nested wheel spans x 1..5, y -1..3.
        assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(5.0, 3.0, 2.0));
    }

    #[test]
    fn hierarchy_without_meshes_has_no_bounds() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>();

        let world = app.world_mut();
        let root = world.spawn(Transform::IDENTITY).id();
        world.spawn((Transform::IDENTITY, ChildOf(root)));

        let bounds = world
            .run_system_once(
                move |children: Query<&Children>,
                      transforms: Query<&Transform>,
                      mesh_handles: Query<&Mesh3d>,
                      meshes: Res<Assets<Mesh>>| {
                    collect_model_bounds(root, &children, &transforms, &mesh_handles, &meshes)
                },
            )
            .expect("system runs");

        assert!(bounds.is_none());
    }
}
