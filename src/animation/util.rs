use super::types::{Interpolation, Sampler};
use nalgebra::UnitQuaternion;
use nalgebra_glm as glm;

/// Helper to calculate the parameter used for interpolation
fn weight(start: f32, end: f32, current: f32) -> f32 {
    ((current - start) / (end - start)).clamp(0.0_f32, 1.0_f32)
}

/// Finds the keyframe pair `[i, i + 1]` with
/// `timestamps[i] <= time <= timestamps[i + 1]` and returns `i` with the
/// interpolation parameter. When `time` lands exactly on an inner keyframe
/// the later pair wins, so the parameter is 0 rather than 1.
///
/// Returns `None` if there are fewer than two keyframes or `time` is outside
/// the curve.
#[must_use]
pub fn bracket(timestamps: &[f32], time: f32) -> Option<(usize, f32)> {
    let (first, last) = (timestamps.first()?, timestamps.last()?);
    if timestamps.len() < 2 || !(*first..=*last).contains(&time) {
        return None;
    }
    // At least one timestamp is <= time so `next` is at least 1
    let next = timestamps.partition_point(|t| *t <= time);
    let i = (next - 1).min(timestamps.len() - 2);
    Some((i, weight(timestamps[i], timestamps[i + 1], time)))
}

/// Values of keyframes `i` and `i + 1`. `None` for a sampler that was never
/// validated and has fewer values than timestamps.
fn keyframe_pair(
    values: &[glm::Vec4],
    i: usize,
) -> Option<(&glm::Vec4, &glm::Vec4)> {
    Some((values.get(i)?, values.get(i + 1)?))
}

/// Step curves hold a value until the next keyframe is reached
fn step_value<'a>(
    v1: &'a glm::Vec4,
    v2: &'a glm::Vec4,
    a: f32,
) -> &'a glm::Vec4 {
    if a >= 1.0_f32 {
        v2
    } else {
        v1
    }
}

fn to_quat(v: &glm::Vec4) -> glm::Quat {
    glm::quat(v.x, v.y, v.z, v.w)
}

/// Spherical linear interpolation, taking the short way round. The result is
/// normalized again to remove drift. The inputs do not need to be unit
/// length.
#[must_use]
pub fn slerp(q1: &glm::Quat, q2: &glm::Quat, a: f32) -> glm::Quat {
    let u1 = UnitQuaternion::new_normalize(*q1);
    let u2 = UnitQuaternion::new_normalize(*q2);
    // `try_slerp` only gives up when the rotations are opposite, where
    // any path is as good as another, so fall back to normalized lerp.
    let q = u1
        .try_slerp(&u2, a, f32::EPSILON)
        .unwrap_or_else(|| u1.nlerp(&u2, a));
    glm::quat_normalize(q.quaternion())
}

/// Evaluates a translation or scale curve at `time`
///
/// Returns `None` when nothing should be written: `time` is outside the curve,
/// the interpolation is not supported, or the sampler lacks the values for
/// the keyframes around `time`.
#[must_use]
pub fn sample_vec3(sampler: &Sampler, time: f32) -> Option<glm::Vec3> {
    let (i, a) = bracket(sampler.timestamps(), time)?;
    let (v1, v2) = keyframe_pair(sampler.values(), i)?;
    match sampler.interpolation() {
        Interpolation::Linear => Some(glm::mix(&v1.xyz(), &v2.xyz(), a)),
        Interpolation::Step => Some(step_value(v1, v2, a).xyz()),
        Interpolation::CubicSpline => None,
    }
}

/// Evaluates a rotation curve at `time`
///
/// Linear curves are interpolated with `slerp`. Step curves return the stored
/// quaternion as it is.
#[must_use]
pub fn sample_rotation(sampler: &Sampler, time: f32) -> Option<glm::Quat> {
    let (i, a) = bracket(sampler.timestamps(), time)?;
    let (v1, v2) = keyframe_pair(sampler.values(), i)?;
    match sampler.interpolation() {
        Interpolation::Linear => Some(slerp(&to_quat(v1), &to_quat(v2), a)),
        Interpolation::Step => Some(to_quat(step_value(v1, v2, a))),
        Interpolation::CubicSpline => None,
    }
}
