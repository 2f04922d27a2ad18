//! Tests for per instance playback through `Rig`

mod common;

use common::{assert_vec3_eq, chain, init_tests, EPSILON};
use nalgebra_glm as glm;
use skelanim::{
    animation::{AnimationClip, Channel, Interpolation, Property, Sampler},
    options::PlaybackOptions,
    rig::Rig,
    sk_error::SkError,
    skeleton::Skeleton,
    skinning::SkinningInput,
};

fn clips() -> Vec<AnimationClip> {
    let sampler = Sampler::from_vec3(
        vec![0.0, 1.0],
        &[glm::Vec3::zeros(), glm::vec3(0.0, 4.0, 0.0)],
        Interpolation::Linear,
    );
    let rise = AnimationClip::new(
        "rise",
        vec![sampler.clone()],
        vec![Channel::new(0, 0, Property::Translation)],
    )
    .unwrap();
    let broken = AnimationClip::new(
        "broken",
        vec![sampler],
        vec![Channel::new(0, 5, Property::Translation)],
    )
    .unwrap();
    vec![rise, broken]
}

fn rig(options: PlaybackOptions) -> Rig {
    Rig::new(Skeleton::new("arm", chain()).unwrap(), clips(), options)
}

fn origin() -> Vec<SkinningInput> {
    vec![SkinningInput {
        joint_indices: [2, 0, 0, 0],
        joint_weights: [1.0, 0.0, 0.0, 0.0],
        position: glm::Vec3::zeros(),
    }]
}

#[test]
fn frame_pipeline() {
    init_tests();
    let mut rig = rig(PlaybackOptions::default());
    rig.play("rise").unwrap();
    assert!(rig.animator().active().unwrap().repeat());
    rig.update(0.25);
    let out = rig.skin(&origin());
    assert_vec3_eq(&out[0], &glm::vec3(0.0, 1.0, 0.0));
    assert_eq!(rig.joint_matrices().len(), 3);
}

#[test]
fn speed_and_limit() {
    init_tests();
    let options = PlaybackOptions {
        speed: 0.5,
        max_delta: Some(0.1),
        repeat: false,
        ..PlaybackOptions::default()
    };
    let mut rig = rig(options);
    rig.play("rise").unwrap();
    rig.update(0.1);
    let clip = rig.animator().active().unwrap();
    assert!(!clip.repeat());
    assert!((clip.current_time() - 0.05).abs() < EPSILON);

    // A stalled frame is limited
    rig.update(2.0);
    let clip = rig.animator().active().unwrap();
    assert!((clip.current_time() - 0.15).abs() < EPSILON);
}

#[test]
fn bind_pose_when_not_animated() {
    init_tests();
    let options = PlaybackOptions {
        animated: false,
        ..PlaybackOptions::default()
    };
    let mut rig = rig(options);
    rig.play("rise").unwrap();
    rig.update(0.5);
    assert_eq!(rig.skin(&origin())[0], glm::Vec3::zeros());

    rig.set_options(PlaybackOptions::default());
    rig.update(0.25);
    assert_vec3_eq(&rig.skin(&origin())[0], &glm::vec3(0.0, 3.0, 0.0));
}

#[test]
fn play_checks_targets() {
    init_tests();
    let mut rig = rig(PlaybackOptions::default());
    rig.play("rise").unwrap();
    assert!(matches!(
        rig.play("broken"),
        Err(SkError::TargetOutOfRange { .. })
    ));
    assert_eq!(rig.animator().active().unwrap().name(), "rise");
    assert!(matches!(rig.play("fly"), Err(SkError::ClipNotFound(_))));

    rig.stop();
    assert!(!rig.animator().is_playing());
}

#[test]
fn instances_are_independent() {
    init_tests();
    let mut a = rig(PlaybackOptions::default());
    let mut b = a.clone();
    a.play("rise").unwrap();
    b.play("rise").unwrap();
    a.update(0.5);
    b.update(0.25);
    assert_vec3_eq(&a.skin(&origin())[0], &glm::vec3(0.0, 2.0, 0.0));
    assert_vec3_eq(&b.skin(&origin())[0], &glm::vec3(0.0, 1.0, 0.0));
}

#[test]
fn options_from_yaml() {
    init_tests();
    let options = PlaybackOptions::from_yaml("repeat: false\n").unwrap();
    assert!(!options.repeat);
    assert!(options.animated);
    let text = options.to_yaml().unwrap();
    assert_eq!(PlaybackOptions::from_yaml(&text).unwrap(), options);
    assert!(matches!(
        PlaybackOptions::from_yaml("speed: fast\n"),
        Err(SkError::SerdeYamlError(_))
    ));
}
