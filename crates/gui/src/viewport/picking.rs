use glam::{Mat4, Vec3};

use super::mesh::MeshData;

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Express the ray in the local frame of a rigid `model` transform.
    /// Distances along the ray are preserved.
    pub fn to_local(&self, model: &Mat4) -> Ray {
        let inv = model.inverse();
        Ray {
            origin: inv.transform_point3(self.origin),
            direction: inv.transform_vector3(self.direction),
        }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from MeshData (9 floats per vertex: pos+normal+color)
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for p in data.positions() {
            min = min.min(p);
            max = max.max(p);
        }

        Self { min, max }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Width, height, depth
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Ray against a box given in the local frame of a rigid `model` transform.
pub fn ray_oriented_box(ray: &Ray, model: &Mat4, local: &Aabb) -> Option<f32> {
    ray_aabb(&ray.to_local(model), local)
}

/// Pick the nearest candidate hit by the ray.
pub fn pick_nearest<'a, K: Clone + 'a>(
    ray: &Ray,
    candidates: impl IntoIterator<Item = (K, Mat4, &'a Aabb)>,
) -> Option<(K, f32)> {
    let mut best: Option<(K, f32)> = None;

    for (key, model, aabb) in candidates {
        if let Some(dist) = ray_oriented_box(ray, &model, aabb) {
            if best.as_ref().is_none_or(|(_, d)| dist < *d) {
                best = Some((key, dist));
            }
        }
    }

    best
}

/// Intersection of the ray with the horizontal plane `y = height`.
/// None when the ray is parallel to the plane or points away from it.
pub fn ray_plane_y(ray: &Ray, height: f32) -> Option<Vec3> {
    const EPSILON: f32 = 1e-7;

    if ray.direction.y.abs() < EPSILON {
        return None;
    }
    let t = (height - ray.origin.y) / ray.direction.y;
    if !t.is_finite() || t < 0.0 {
        return None;
    }
    Some(ray.at(t))
}
