//! Shared helpers for the integration tests
#![allow(dead_code)]

use nalgebra_glm as glm;
use skelanim::{skeleton::ImportJoint, types::NO_PARENT};
use std::sync::Once;

pub const EPSILON: f32 = 0.0001f32; // Small value for float comparisons
static INIT: Once = Once::new();

/// Initializes logging in a "once per test run" manner. Call at the start of
/// each test that needs logging.
pub fn init_tests() {
    INIT.call_once(|| {
        env_logger::init();
    });
}

pub fn joint(name: &str, parent: i32, node_id: usize) -> ImportJoint {
    ImportJoint {
        name: name.to_string(),
        inverse_bind: glm::Mat4::identity(),
        parent,
        node_id,
    }
}

/// root -> upper -> lower, one joint per node with identity inverse binds
pub fn chain() -> Vec<ImportJoint> {
    vec![
        joint("root", NO_PARENT, 10),
        joint("upper", 0, 11),
        joint("lower", 1, 12),
    ]
}

pub fn assert_vec3_eq(a: &glm::Vec3, b: &glm::Vec3) {
    let c = glm::equal_eps(a, b, EPSILON);
    assert!(c.x && c.y && c.z, "{a:?} != {b:?}");
}

pub fn assert_mat4_eq(a: &glm::Mat4, b: &glm::Mat4) {
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() < EPSILON, "{a:?} != {b:?}");
    }
}

pub fn translation_of(m: &glm::Mat4) -> glm::Vec3 {
    glm::vec3(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}
