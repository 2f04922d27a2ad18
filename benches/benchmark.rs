//! Recommend using with
//! `RUSTFLAGS="-C target-cpu=x86-64-v2" cargo bench`
//! and that end users compile their applications in this way. That enables
//! SSE4.2 support which helps the matrix heavy code here.
//!
//! Add `--features rayon` to see the parallel skinning path on the larger
//! vertex buffer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra_glm as glm;
use skelanim::{
    animation::{AnimationClip, Channel, Interpolation, Property, Sampler},
    skeleton::{ImportJoint, Skeleton},
    skinning::{self, SkinningInput},
    types::{NO_PARENT, PARALLEL_MIN_VERTICES},
};

const JOINTS: usize = 64;
const KEYFRAMES: usize = 100;

/// Counters here all stay well inside `u16`
fn to_f32(i: usize) -> f32 {
    f32::from(u16::try_from(i).unwrap_or(u16::MAX))
}

/// A skeleton with a spine of four joints and the rest hanging off it in
/// short chains, roughly the shape of a character rig
fn make_skeleton() -> Skeleton {
    let mut import = Vec::with_capacity(JOINTS);
    for i in 0..JOINTS {
        let parent = match i {
            0 => NO_PARENT,
            1..=3 => i32::try_from(i - 1).unwrap_or(NO_PARENT),
            _ if i % 3 == 1 => i32::try_from(i % 4).unwrap_or(NO_PARENT),
            _ => i32::try_from(i - 1).unwrap_or(NO_PARENT),
        };
        import.push(ImportJoint {
            name: format!("joint{i}"),
            inverse_bind: glm::translation(&glm::vec3(0.0, -to_f32(i), 0.0)),
            parent,
            node_id: i,
        });
    }
    Skeleton::new("bench", import).unwrap_or_else(|e| panic!("{e}"))
}

fn make_clip() -> AnimationClip {
    let times: Vec<f32> = (0..KEYFRAMES).map(|i| to_f32(i) * 0.1).collect();
    let rotations: Vec<glm::Quat> = (0..KEYFRAMES)
        .map(|i| {
            glm::quat_angle_axis(to_f32(i) * 0.05, &glm::vec3(0.0, 0.0, 1.0))
        })
        .collect();
    let translations: Vec<glm::Vec3> = (0..KEYFRAMES)
        .map(|i| glm::vec3(0.0, 1.0 + (to_f32(i) * 0.1).sin(), 0.0))
        .collect();
    let samplers = vec![
        Sampler::from_quat(times.clone(), &rotations, Interpolation::Linear),
        Sampler::from_vec3(times, &translations, Interpolation::Linear),
    ];
    let mut channels = Vec::with_capacity(JOINTS * 2);
    for joint in 0..JOINTS {
        channels.push(Channel::new(0, joint, Property::Rotation));
        channels.push(Channel::new(1, joint, Property::Translation));
    }
    let mut clip = AnimationClip::new("wave", samplers, channels)
        .unwrap_or_else(|e| panic!("{e}"));
    clip.set_repeat(true);
    clip.start();
    clip
}

fn make_vertices(count: usize) -> Vec<SkinningInput> {
    (0..count)
        .map(|i| {
            let j = u16::try_from(i % JOINTS).unwrap_or(0);
            SkinningInput {
                joint_indices: [j, (j + 1) % 64, 0, 0],
                joint_weights: [0.75, 0.25, 0.0, 0.0],
                position: glm::vec3(to_f32(i) * 0.01, 1.0, -0.5),
            }
        })
        .collect()
}

fn skeleton_update(c: &mut Criterion) {
    let mut skeleton = make_skeleton();
    c.bench_function(
        "skeleton update", //
        |b| b.iter(|| black_box(&mut skeleton).update()),
    );
}

fn clip_update(c: &mut Criterion) {
    let mut skeleton = make_skeleton();
    let mut clip = make_clip();
    c.bench_function(
        "clip update", //
        |b| b.iter(|| clip.update(black_box(0.016), &mut skeleton)),
    );
}

fn skin_small(c: &mut Criterion) {
    let mut skeleton = make_skeleton();
    skeleton.update();
    let vertices = black_box(make_vertices(1000));
    c.bench_function(
        "skin 1000 vertices", //
        |b| b.iter(|| skinning::skin_mesh(&vertices, &skeleton)),
    );
}

fn skin_large(c: &mut Criterion) {
    let mut skeleton = make_skeleton();
    skeleton.update();
    let vertices = black_box(make_vertices(PARALLEL_MIN_VERTICES * 8));
    c.bench_function(
        "skin large buffer", //
        |b| b.iter(|| skinning::skin_mesh(&vertices, &skeleton)),
    );
}

criterion_group!(benches, skeleton_update, clip_update, skin_small, skin_large);
criterion_main!(benches);
