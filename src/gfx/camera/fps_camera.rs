use cgmath::*;

use super::camera_utils::{convert_matrix4_to_array, CameraUniform, OPENGL_TO_WGPU_MATRIX};

/// Largest pitch magnitude; keeps the view direction off the world up axis
pub const PITCH_LIMIT: Deg<f32> = Deg(89.0);

/// First-person camera driven by yaw and pitch angles
///
/// `front`, `right` and `up` are derived from the angles and recomputed on
/// every [`FpsCamera::update_angle`] call. Yaw accumulates without bound;
/// pitch stays inside (-90°, 90°).
#[derive(Debug, Clone, Copy)]
pub struct FpsCamera {
    position: Point3<f32>,
    yaw: Rad<f32>,
    pitch: Rad<f32>,
    front: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl FpsCamera {
    pub const WORLD_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

    /// Creates a camera at `position` looking down -Z
    pub fn new(position: Point3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            yaw: Deg(-90.0).into(),
            pitch: Rad(0.0),
            front: -Vector3::unit_z(),
            right: Vector3::unit_x(),
            up: Self::WORLD_UP,
            aspect,
            fovy: Deg(45.0).into(),
            znear: 0.1,
            zfar: 1000.0,
        };
        camera.update_vectors();
        camera
    }

    /// Adds the deltas (radians) to yaw and pitch and rederives the basis
    pub fn update_angle(&mut self, delta_yaw: f32, delta_pitch: f32) {
        let limit: Rad<f32> = PITCH_LIMIT.into();
        self.yaw += Rad(delta_yaw);
        self.pitch = Rad((self.pitch.0 + delta_pitch).clamp(-limit.0, limit.0));
        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        self.front = Vector3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize();
        self.right = self.front.cross(Self::WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.position += offset;
    }

    pub fn yaw(&self) -> Rad<f32> {
        self.yaw
    }

    pub fn pitch(&self) -> Rad<f32> {
        self.pitch
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    /// The view direction projected onto the XZ plane, renormalised
    pub fn horizontal_front(&self) -> Vector3<f32> {
        Vector3::new(self.front.x, 0.0, self.front.z).normalize()
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: convert_matrix4_to_array(self.view_matrix()),
            projection: convert_matrix4_to_array(self.projection_matrix()),
            view_position: self.position.to_homogeneous().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::assert_abs_diff_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const EPS: f32 = 1e-5;

    fn camera() -> FpsCamera {
        FpsCamera::new(Point3::new(0.0, 0.0, 3.0), 16.0 / 9.0)
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = camera();
        assert_abs_diff_eq!(camera.front(), -Vector3::unit_z(), epsilon = EPS);
        assert_abs_diff_eq!(camera.right(), Vector3::unit_x(), epsilon = EPS);
        assert_abs_diff_eq!(camera.up(), Vector3::unit_y(), epsilon = EPS);
    }

    #[test]
    fn pitch_stays_clamped_and_front_stays_unit() {
        let mut camera = camera();
        let limit: Rad<f32> = PITCH_LIMIT.into();

        // Seeded random walk with large swings
        let mut rng = StdRng::seed_from_u64(0x1234_5678);
        for _ in 0..5_000 {
            let delta_yaw: f32 = rng.random_range(-2.0..2.0);
            let delta_pitch: f32 = rng.random_range(-2.0..2.0);

            camera.update_angle(delta_yaw, delta_pitch);

            assert!(camera.pitch().0.abs() <= limit.0);
            assert!(camera.pitch().0.abs() < std::f32::consts::FRAC_PI_2);
            assert_abs_diff_eq!(camera.front().magnitude(), 1.0, epsilon = EPS);
        }
    }

    #[test]
    fn basis_is_orthonormal_after_rotation() {
        let mut camera = camera();
        camera.update_angle(0.7, 0.4);
        assert_abs_diff_eq!(camera.front().dot(camera.right()), 0.0, epsilon = EPS);
        assert_abs_diff_eq!(camera.front().dot(camera.up()), 0.0, epsilon = EPS);
        assert_abs_diff_eq!(camera.right().dot(camera.up()), 0.0, epsilon = EPS);
        assert_abs_diff_eq!(camera.right().y, 0.0, epsilon = EPS);
    }

    #[test]
    fn yaw_accumulates_without_wrapping() {
        let mut camera = camera();
        for _ in 0..10 {
            camera.update_angle(1.0, 0.0);
        }
        let expected = Rad::from(Deg(-90.0f32)).0 + 10.0;
        assert_abs_diff_eq!(camera.yaw().0, expected, epsilon = 1e-4);
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let camera = camera();
        let eye = camera.view_matrix() * camera.position().to_homogeneous();
        assert_abs_diff_eq!(eye.truncate(), Vector3::new(0.0, 0.0, 0.0), epsilon = EPS);
    }

    #[test]
    fn projection_maps_near_plane_to_zero_depth() {
        let camera = camera();
        let clip = camera.projection_matrix() * Vector4::new(0.0, 0.0, -camera.znear, 1.0);
        assert_abs_diff_eq!(clip.z / clip.w, 0.0, epsilon = 1e-4);
    }
}
