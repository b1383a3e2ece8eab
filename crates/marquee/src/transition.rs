//! Camera and fade animations between screens.
//!
//! Every animation targets a [`Stage`]: the camera, the fade overlay and the
//! input latch. The view controller owns one `Stage` and one
//! `Animator<Stage>` and drives both from its `update`.

use crate::config::TransitionStyle;
use marquee_core::{
    animation::lerp, Animation, Animator, Easing, FinishedCallback, LambdaAnimation, Point, Size,
    Transform2D, SLOT_PRIMARY, SLOT_SECONDARY,
};
use std::path::PathBuf;

/// Fade out/in time.
pub const FADE_DURATION_MS: u32 = 240;
/// Black screen between fade out and fade in.
pub const FADE_WAIT_MS: u32 = 320;
/// Camera slide time.
pub const SLIDE_DURATION_MS: u32 = 400;
/// Instant cut, one tick.
pub const INSTANT_DURATION_MS: u32 = 1;
/// Zoom reached at the end of a launch.
pub const LAUNCH_ZOOM: f32 = 4.25;

/// Where a fade transition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadePhase {
    /// No fade running
    #[default]
    Idle,
    /// Darkening toward black
    FadingOut,
    /// Black, camera moved, waiting to fade in
    Waiting,
    /// Lightening back to the new screen
    FadingIn,
}

/// Animation target shared by every screen transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// World-to-screen camera
    pub camera: Transform2D,
    /// Black overlay alpha, 0 to 1
    pub fade_opacity: f32,
    /// Fade progress
    pub fade_phase: FadePhase,
    /// Swallow all input while set
    pub input_locked: bool,
    /// `(system, game)` pairs whose metadata changed, drained by the owner
    pub changed_files: Vec<(String, PathBuf)>,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            camera: Transform2D::identity(),
            fade_opacity: 0.0,
            fade_phase: FadePhase::Idle,
            input_locked: false,
            changed_files: Vec::new(),
        }
    }
}

impl Stage {
    /// Camera position in world space, the negated camera translation.
    #[must_use]
    pub fn camera_position(&self) -> Point {
        -self.camera.translation()
    }

    fn look_at(&mut self, target: Point) {
        self.camera.set_translation(-target);
    }
}

// =============================================================================
// View transitions
// =============================================================================

fn fade(phase: FadePhase) -> Box<dyn Animation<Stage>> {
    Box::new(LambdaAnimation::new(FADE_DURATION_MS, move |stage: &mut Stage, t| {
        stage.fade_opacity = lerp(0.0, 1.0, t);
        stage.fade_phase = phase;
    }))
}

/// Animate the camera so that `target` (a view position) fills the screen.
///
/// Returns `false` when the camera is already there and nothing is playing.
pub fn play_view_transition(
    animator: &mut Animator<Stage>,
    stage: &mut Stage,
    target: Point,
    style: TransitionStyle,
) -> bool {
    if target == stage.camera_position() && !animator.is_playing(SLOT_PRIMARY) {
        return false;
    }
    log::debug!("view transition {style:?} to ({}, {})", target.x, target.y);

    match style {
        TransitionStyle::Fade => play_fade(animator, stage, target),
        TransitionStyle::Slide | TransitionStyle::SimpleSlide => {
            reset_fade(stage);
            animator.set_animation(SLOT_PRIMARY, Box::new(MoveCamera::new(stage, target)), 0, None, false);
        }
        TransitionStyle::Instant => {
            reset_fade(stage);
            let cut = LambdaAnimation::new(INSTANT_DURATION_MS, move |stage: &mut Stage, _t| {
                stage.look_at(target);
            });
            animator.set_animation(SLOT_PRIMARY, Box::new(cut), 0, None, false);
        }
    }
    true
}

fn reset_fade(stage: &mut Stage) {
    stage.fade_opacity = 0.0;
    stage.fade_phase = FadePhase::Idle;
}

fn play_fade(animator: &mut Animator<Stage>, stage: &mut Stage, target: Point) {
    // leave the opacity wherever a previous fade put it
    animator.cancel(SLOT_SECONDARY);
    let opacity = stage.fade_opacity;

    let cut: FinishedCallback<Stage> = Box::new(move |stage, animator| {
        stage.look_at(target);
        stage.fade_phase = FadePhase::Waiting;
        let fade_in: FinishedCallback<Stage> = Box::new(|stage, _| {
            stage.fade_phase = FadePhase::Idle;
        });
        animator.set_animation(
            SLOT_PRIMARY,
            fade(FadePhase::FadingIn),
            FADE_WAIT_MS,
            Some(fade_in),
            true,
        );
    });
    animator.set_animation(SLOT_PRIMARY, fade(FadePhase::FadingOut), 0, Some(cut), false);

    let partial = (opacity * FADE_DURATION_MS as f32) as u32;
    if target == stage.camera_position() {
        // same screen: skip the dark half, resume fading in from here
        animator.advance(SLOT_PRIMARY, stage, FADE_DURATION_MS);
        animator.advance(SLOT_PRIMARY, stage, FADE_WAIT_MS);
        animator.advance(SLOT_PRIMARY, stage, FADE_DURATION_MS - partial);
    } else {
        animator.advance(SLOT_PRIMARY, stage, partial);
    }
}

/// Camera slide with cubic ease-out.
#[derive(Debug, Clone)]
pub struct MoveCamera {
    start: Point,
    target: Point,
}

impl MoveCamera {
    /// Slide from the stage's current camera to `target`.
    #[must_use]
    pub fn new(stage: &Stage, target: Point) -> Self {
        Self {
            start: stage.camera_position(),
            target,
        }
    }
}

impl Animation<Stage> for MoveCamera {
    fn duration_ms(&self) -> u32 {
        SLIDE_DURATION_MS
    }

    fn apply(&mut self, stage: &mut Stage, t: f32) {
        let eased = Easing::CubicOut.apply(t);
        stage.look_at(self.start.lerp(&self.target, eased));
    }
}

// =============================================================================
// Launch
// =============================================================================

/// Zoom toward a point while fading out.
#[derive(Debug, Clone)]
pub struct LaunchZoom {
    start: Point,
    center: Point,
    screen: Size,
    duration_ms: u32,
}

impl LaunchZoom {
    /// Zoom from the stage's current camera toward `center` (world space).
    #[must_use]
    pub fn new(stage: &Stage, center: Point, screen: Size, duration_ms: u32) -> Self {
        Self {
            start: stage.camera.translation(),
            center,
            screen,
            duration_ms,
        }
    }
}

impl Animation<Stage> for LaunchZoom {
    fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    fn apply(&mut self, stage: &mut Stage, t: f32) {
        let zoom = lerp(1.0, LAUNCH_ZOOM, t * t);
        let view_w = self.screen.width / zoom;
        let view_h = self.screen.height / zoom;

        let screen_center = Point::new(self.screen.width / 2.0, self.screen.height / 2.0);
        let from = -self.start + screen_center;
        let focus = from.lerp(&self.center, Easing::SmoothStep.apply(t));

        stage.camera = Transform2D::translate(view_w / 2.0 - focus.x, view_h / 2.0 - focus.y)
            .then(&Transform2D::scale(zoom, zoom));
        stage.fade_opacity = lerp(0.0, 1.0, t * t);
    }
}

/// Forward and return durations of the launch animation.
#[must_use]
pub const fn launch_durations(style: TransitionStyle) -> (u32, u32) {
    match style {
        TransitionStyle::Fade => (800, 800),
        TransitionStyle::Slide | TransitionStyle::SimpleSlide => (800, 600),
        TransitionStyle::Instant => (10, 10),
    }
}

/// One half of the launch animation. Play it reversed for the return.
#[must_use]
pub fn launch_animation(
    style: TransitionStyle,
    stage: &Stage,
    center: Point,
    screen: Size,
    duration_ms: u32,
) -> Box<dyn Animation<Stage>> {
    match style {
        TransitionStyle::Fade => Box::new(LambdaAnimation::new(duration_ms, |stage: &mut Stage, t| {
            stage.fade_opacity = lerp(0.0, 1.0, t);
        })),
        _ => Box::new(LaunchZoom::new(stage, center, screen, duration_ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Size = Size::new(1280.0, 720.0);

    fn run(animator: &mut Animator<Stage>, stage: &mut Stage, ms: u32) {
        animator.update(stage, ms);
    }

    #[test]
    fn test_no_op_when_already_there() {
        let mut animator = Animator::new();
        let mut stage = Stage::default();
        assert!(!play_view_transition(&mut animator, &mut stage, Point::ORIGIN, TransitionStyle::Fade));
        assert!(!animator.is_playing(SLOT_PRIMARY));
    }

    #[test]
    fn test_fade_phases() {
        let mut animator = Animator::new();
        let mut stage = Stage::default();
        let target = Point::new(0.0, 720.0);
        assert!(play_view_transition(&mut animator, &mut stage, target, TransitionStyle::Fade));

        run(&mut animator, &mut stage, 120);
        assert_eq!(stage.fade_phase, FadePhase::FadingOut);
        assert!((stage.fade_opacity - 0.5).abs() < 1e-5);
        assert_eq!(stage.camera_position(), Point::ORIGIN);

        run(&mut animator, &mut stage, 120);
        assert_eq!(stage.fade_phase, FadePhase::Waiting);
        assert_eq!(stage.camera_position(), target);
        assert_eq!(stage.fade_opacity, 1.0);

        run(&mut animator, &mut stage, FADE_WAIT_MS);
        assert_eq!(stage.fade_phase, FadePhase::FadingIn);
        run(&mut animator, &mut stage, FADE_DURATION_MS);
        assert_eq!(stage.fade_phase, FadePhase::Idle);
        assert_eq!(stage.fade_opacity, 0.0);
        assert!(!animator.is_playing(SLOT_PRIMARY));
    }

    #[test]
    fn test_fade_retrigger_same_target_keeps_opacity() {
        let mut animator = Animator::new();
        let mut stage = Stage::default();
        let target = Point::new(1280.0, 1440.0);
        play_view_transition(&mut animator, &mut stage, target, TransitionStyle::Fade);
        run(&mut animator, &mut stage, FADE_DURATION_MS);
        run(&mut animator, &mut stage, FADE_WAIT_MS);
        run(&mut animator, &mut stage, 60);
        let opacity = stage.fade_opacity;
        assert_eq!(stage.fade_phase, FadePhase::FadingIn);
        assert!((opacity - 0.75).abs() < 1e-5);

        // camera already at target, so the fade-in carries on from 0.75
        assert!(play_view_transition(&mut animator, &mut stage, target, TransitionStyle::Fade));
        assert_eq!(stage.fade_phase, FadePhase::FadingIn);
        assert!((stage.fade_opacity - opacity).abs() < 0.01);
        run(&mut animator, &mut stage, 180);
        assert_eq!(stage.fade_phase, FadePhase::Idle);
    }

    #[test]
    fn test_fade_retrigger_new_target_resumes_fade_out() {
        let mut animator = Animator::new();
        let mut stage = Stage::default();
        play_view_transition(&mut animator, &mut stage, Point::new(0.0, 720.0), TransitionStyle::Fade);
        run(&mut animator, &mut stage, 60);

        let other = Point::new(1280.0, 1440.0);
        play_view_transition(&mut animator, &mut stage, other, TransitionStyle::Fade);
        assert!((stage.fade_opacity - 0.25).abs() < 0.01);
        run(&mut animator, &mut stage, 180);
        assert_eq!(stage.camera_position(), other);
    }

    #[test]
    fn test_slide_eases_out() {
        let mut animator = Animator::new();
        let mut stage = Stage::default();
        let target = Point::new(1280.0, 0.0);
        play_view_transition(&mut animator, &mut stage, target, TransitionStyle::Slide);
        run(&mut animator, &mut stage, 200);
        // cubic ease-out at t = 0.5 is 0.875
        assert!((stage.camera_position().x - 1120.0).abs() < 0.01);
        run(&mut animator, &mut stage, 200);
        assert_eq!(stage.camera_position(), target);
    }

    #[test]
    fn test_instant_cuts_next_tick() {
        let mut animator = Animator::new();
        let mut stage = Stage::default();
        stage.fade_opacity = 0.4;
        let target = Point::new(2560.0, 1440.0);
        play_view_transition(&mut animator, &mut stage, target, TransitionStyle::Instant);
        assert_eq!(stage.fade_opacity, 0.0);
        run(&mut animator, &mut stage, 16);
        assert_eq!(stage.camera_position(), target);
        assert!(!animator.is_playing(SLOT_PRIMARY));
    }

    #[test]
    fn test_launch_zoom_endpoints() {
        let mut stage = Stage::default();
        stage.camera = Transform2D::translate(-1280.0, -1440.0);
        let center = Point::new(1280.0 + 300.0, 1440.0 + 200.0);
        let mut zoom = LaunchZoom::new(&stage, center, SCREEN, 800);

        zoom.apply(&mut stage, 0.0);
        assert_eq!(stage.camera, Transform2D::translate(-1280.0, -1440.0));
        assert_eq!(stage.fade_opacity, 0.0);

        zoom.apply(&mut stage, 1.0);
        assert_eq!(stage.fade_opacity, 1.0);
        assert!((stage.camera.scale_x() - LAUNCH_ZOOM).abs() < 1e-5);
        // the focus point ends up in the middle of the screen
        let on_screen = stage.camera.apply(center);
        assert!(on_screen.approx_eq(&Point::new(640.0, 360.0), 0.01));
    }

    #[test]
    fn test_launch_durations() {
        assert_eq!(launch_durations(TransitionStyle::Fade), (800, 800));
        assert_eq!(launch_durations(TransitionStyle::SimpleSlide), (800, 600));
        assert_eq!(launch_durations(TransitionStyle::Instant), (10, 10));
    }
}
