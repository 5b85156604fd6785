// Shared layout, material, interaction and asset constants for the web frontend.

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 10.0; // home position is (0, 0, CAMERA_Z)
pub const ZOOM_STANDOFF_Z: f32 = 2.0; // camera stops this far in front of a clicked sphere

// Profile spheres
pub const PROFILE_COUNT: usize = 4;
pub const PROFILE_RADIUS: f32 = 1.0;
pub const PROFILE_OFFSET: f32 = 1.05; // slightly more than the radius so neighbours touch
pub const PROFILE_SEGMENTS: u32 = 32;
pub const SPIN_STEP_RAD: f32 = 0.01; // per frame, multiplied by (index + 1)

// Glassy profile material
pub const PROFILE_ROUGHNESS: f32 = 0.2;
pub const PROFILE_METALNESS: f32 = 0.1;
pub const PROFILE_REFLECTIVITY: f32 = 0.9;
pub const PROFILE_CLEARCOAT: f32 = 1.0;
pub const PROFILE_CLEARCOAT_ROUGHNESS: f32 = 0.1;
pub const PROFILE_OPACITY: f32 = 0.6;

// Orbit markers
pub const MARKER_COUNT: usize = 4;
pub const MARKER_RADIUS: f32 = 0.2;
pub const MARKER_SEGMENTS: u32 = 16;
pub const MARKER_ORBIT_RADIUS: f32 = 4.5;
pub const MARKER_DIAGONAL_SCALE: f32 = 0.7;
pub const MARKER_EMISSIVE_INTENSITY: f32 = 0.5;
pub const MARKER_COLORS: [[f32; 3]; MARKER_COUNT] = [
    [1.0, 0.412, 0.706],   // hot pink
    [0.0, 1.0, 1.0],       // cyan
    [1.0, 0.647, 0.0],     // orange
    [0.541, 0.169, 0.886], // blue violet
];

// Lighting
pub const POINT_LIGHT_POSITION: [f32; 3] = [0.0, 0.0, 5.0];
pub const POINT_LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const POINT_LIGHT_INTENSITY: f32 = 1.0;
pub const POINT_LIGHT_RANGE: f32 = 100.0;
pub const AMBIENT_LIGHT_COLOR: [f32; 3] = [0.251, 0.251, 0.251]; // 0x404040

// Interaction
pub const DRAG_DEG_PER_PIXEL: f32 = 0.5;
pub const CLICK_DEAD_ZONE_PX: f32 = 4.0; // presses travelling further are drags, not clicks
pub const ZOOM_DURATION_SEC: f32 = 2.0;

// Assets (relative to the page)
pub const BACKGROUND_IMAGE: &str = "background.jpg";
pub const THUMBNAIL_IMAGES: [&str; PROFILE_COUNT] = [
    "thumbnail.jpg",
    "thumbnail2.gif",
    "thumbnail3.gif",
    "thumbnail4.gif",
];

// One embedded video per profile sphere, by index
pub const VIDEO_URLS: [&str; PROFILE_COUNT] = [
    "https://www.youtube.com/embed/3I9MpV3nZco?autoplay=1",
    "https://www.youtube.com/embed/6KN8nZKI1vE?autoplay=1",
    "https://www.youtube.com/embed/HsHhoJvsJog?autoplay=1",
    "https://www.youtube.com/embed/9r7R0iLS_9k?autoplay=1",
];

// Video overlay
pub const VIDEO_OVERLAY_ID: &str = "videoContainer";
pub const VIDEO_WIDTH_PX: u32 = 560;
pub const VIDEO_HEIGHT_PX: u32 = 315;
pub const VIDEO_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.5;
pub const BLOOM_THRESHOLD: f32 = 1.0; // only over-range light (emissive, highlights) glows
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];
