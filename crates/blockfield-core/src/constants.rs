use glam::Vec3;

// Shared scene tuning constants used by both web and native frontends.

// Reference population
pub const DEFAULT_BLOCK_COUNT: usize = 150;
pub const DEFAULT_PARTICLE_COUNT: usize = 300;

// Block placement
pub const CLUSTER_CENTER_HALF_EXTENT: f32 = 5.0; // cluster centers live in [-5, 5) per axis
pub const DEFAULT_CLUSTER_RADIUS: f32 = 2.0; // offset from a center spans [-R/2, R/2)
pub const BLOCK_SIZE_MIN: f32 = 0.5;
pub const BLOCK_SIZE_MAX: f32 = 1.0; // exclusive

// Particle drift
pub const PARTICLE_SPAWN_HALF_EXTENT: f32 = 15.0;
pub const PARTICLE_RESEED_HALF_EXTENT: f32 = 5.0; // smaller than spawn on purpose
pub const PARTICLE_MAX_SPEED: f32 = 0.01; // per axis, per frame
pub const PARTICLE_DRIFT_RADIUS: f32 = 20.0;

// Interaction
pub const HOVER_SCALE: f32 = 1.1;
pub const REST_SCALE: f32 = 1.0;

// Per-frame group rotation (radians per callback, not time-scaled)
pub const GROUP_ROTATION_STEP: f32 = 0.002;

// Camera
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 15.0);
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.45;
pub const DIRECTIONAL_INTENSITY: f32 = 0.9;
pub const DIRECTIONAL_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 10.0, 7.5);

// Visual sizing and colors
pub const PARTICLE_SIZE: f32 = 0.08;
pub const PARTICLE_COLOR: [f32; 3] = [0.85, 0.9, 1.0];
pub const CLEAR_COLOR: [f64; 3] = [0.02, 0.02, 0.05];

// Frame statistics reporting interval
pub const FRAME_STATS_INTERVAL_SEC: f32 = 5.0;
