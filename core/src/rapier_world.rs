//! Rapier-backed [`SceneQuery`] over immutable world geometry.
//!
//! Hosts describe their static colliders as [`WorldStaticDef`]s, build a
//! [`RapierQueryWorld`] once, and hand it to the controller and cameras every tick.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-focused: ray casts and shape sweeps, plus the Rapier `KinematicCharacterController`
//!   through [`RapierQueryWorld::query_pipeline`].
//! - Layer-aware: each collider carries its [`LayerMask`] memberships in `user_data`, and every
//!   query filters on them with a predicate.

// Re-export Rapier so hosts can use its types without depending on `rapier3d` directly.
pub use rapier3d;

use rapier3d::na::{Translation3, UnitQuaternion};
use rapier3d::parry::{bounding_volume::Aabb, query::ShapeCastOptions};
use rapier3d::prelude::*;

use crate::{
    constants::DIST_EPS,
    layers::{LayerBits, LayerMask},
    query::{CapsuleCast, RayHit, SceneBounds, SceneQuery},
    types::Vec3,
};

/// Definition of one immutable world collider.
///
/// Conventions
/// - Units are meters.
/// - Rotation is a unit quaternion.
/// - For planes the normal is `rotation * +Y` and the plane passes through `translation`
///   shifted by `offset_along_normal`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    pub translation: Vector<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
    /// Layers this collider belongs to.
    pub layers: LayerMask,
}

/// Supported static collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space).
    Plane { offset_along_normal: f32 },
    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },
    Sphere { radius: f32 },
    /// Y-aligned capsule (meters).
    CapsuleY { radius: f32, half_height: f32 },
}

/// In-memory Rapier structures needed for scene queries against a static world.
pub struct RapierQueryWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    /// `(def id, collider)` pairs sorted by id.
    ids: Vec<(u32, ColliderHandle)>,
}

impl RapierQueryWorld {
    /// Build a query world from a list of static collider definitions.
    ///
    /// The input is sorted by `id` before insertion. NaN/invalid values should be
    /// filtered by the caller.
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut ids = Vec::with_capacity(defs.len());

        for def in defs.iter() {
            let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);

            let rb = RigidBodyBuilder::fixed().pose(iso).build();
            let rb_handle = bodies.insert(rb);

            let collider = collider_from_def(def);
            let handle = colliders.insert_with_parent(collider, rb_handle, &mut bodies);
            ids.push((def.id, handle));
        }

        // Run collision detection only (no dynamics) so the broad-phase BVH is populated.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();

        let hooks = ();
        let events = ();

        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &hooks,
            &events,
        );

        log::debug!("Built static query world with {} colliders", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
            ids,
        }
    }

    /// World-space bounds of the collider built from the def with `id`.
    pub fn collider_bounds(&self, id: u32) -> Option<Aabb> {
        let idx = self.ids.binary_search_by_key(&id, |(def_id, _)| *def_id).ok()?;
        let (_, handle) = self.ids[idx];
        self.colliders.get(handle).map(|co| co.compute_aabb())
    }

    /// Create a borrowed `QueryPipeline` view for scene queries and KCC.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }
}

/// Layer bits stored on a collider by [`collider_from_def`].
#[inline]
pub fn collider_layers(collider: &Collider) -> LayerBits {
    collider.user_data as LayerBits
}

impl SceneQuery for RapierQueryWorld {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        if max_distance <= 0.0 || direction.norm_squared() <= DIST_EPS {
            return None;
        }

        let accepts = |_: ColliderHandle, co: &Collider| mask.accepts(collider_layers(co));
        let pipeline = self.query_pipeline(QueryFilter::new().predicate(&accepts));

        let ray = Ray::new(Point::from(origin), direction);
        pipeline
            .cast_ray_and_get_normal(&ray, max_distance, true)
            .map(|(_handle, hit)| RayHit {
                distance: hit.time_of_impact,
                normal: hit.normal,
            })
    }

    fn sweep_capsule(
        &self,
        capsule: CapsuleCast,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        if max_distance <= 0.0 || direction.norm_squared() <= DIST_EPS {
            return None;
        }

        let accepts = |_: ColliderHandle, co: &Collider| mask.accepts(collider_layers(co));
        let pipeline = self.query_pipeline(QueryFilter::new().predicate(&accepts));

        let center = capsule.center();
        let half_height = capsule.half_height();
        let options = ShapeCastOptions::with_max_time_of_impact(max_distance);

        // A zero-length segment is swept as a ball; otherwise align a Y capsule with a..b.
        let (shape, rotation): (SharedShape, UnitQuaternion<f32>) = if half_height <= DIST_EPS {
            (SharedShape::ball(capsule.radius), UnitQuaternion::identity())
        } else {
            let axis = capsule.b - capsule.a;
            let rotation = UnitQuaternion::rotation_between(&Vector::y(), &axis).unwrap_or_else(
                || UnitQuaternion::from_axis_angle(&Vector::x_axis(), std::f32::consts::PI),
            );
            (SharedShape::capsule_y(half_height, capsule.radius), rotation)
        };

        let shape_pos = Isometry::from_parts(Translation3::from(center), rotation);
        pipeline
            .cast_shape(&shape_pos, &direction, shape.as_ref(), options)
            .map(|(_handle, hit)| RayHit {
                distance: hit.time_of_impact,
                normal: hit.normal1.into_inner(),
            })
    }
}

impl SceneBounds for Aabb {
    #[inline]
    fn bounds_center(&self) -> Vec3 {
        self.center().coords
    }
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// The pose lives on the parent rigid body, so the collider has identity local transform
/// (except planes, see below). Layer memberships go into `user_data`.
fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let builder = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            // The half-space normal is local +Y; the parent body's rotation orients it.
            // Shift along the local normal by the configured offset.
            ColliderBuilder::halfspace(Vector::y_axis())
                .translation(Vector::y() * *offset_along_normal)
        }
        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius),
        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius),
    };

    builder.user_data(def.layers.bits as u128).build()
}
