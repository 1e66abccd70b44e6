use super::*;
use crate::host::scheduler::ManualScheduler;
use crate::render::recording::RecordingSurface;

fn registry() -> SurfaceRegistry<RecordingSurface> {
    let mut reg = SurfaceRegistry::new();
    reg.insert("spiral-canvas", RecordingSurface::new(0, 0));
    reg
}

fn attach<'a>(
    reg: &mut SurfaceRegistry<RecordingSurface>,
    sched: &'a mut ManualScheduler,
) -> SpiralInstance<RecordingSurface, &'a mut ManualScheduler> {
    SpiralInstance::attach(
        reg,
        "spiral-canvas",
        SurfaceSize::new(280, 280),
        SpiralConfig::default(),
        sched,
    )
    .unwrap()
    .expect("surface is registered")
}

#[test]
fn missing_surface_is_a_silent_no_op() {
    let mut reg = registry();
    let mut sched = ManualScheduler::new();
    let inst = SpiralInstance::attach(
        &mut reg,
        "nope",
        SurfaceSize::new(280, 280),
        SpiralConfig::default(),
        &mut sched,
    )
    .unwrap();
    assert!(inst.is_none());
    assert_eq!(sched.requested_total(), 0);
    assert_eq!(reg.len(), 1);
}

#[test]
fn attach_sizes_the_surface_and_requests_one_frame() {
    let mut reg = registry();
    let mut sched = ManualScheduler::new();
    let inst = attach(&mut reg, &mut sched);
    assert_eq!(inst.surface().size(), (280, 280));
    assert_eq!(inst.renderer().segments().len(), 900);
    assert!(inst.pending().is_some());
    assert_eq!(inst.scheduler().outstanding(), 1);
    assert!(reg.is_empty());
}

#[test]
fn each_callback_renders_once_and_reschedules() {
    let mut reg = registry();
    let mut sched = ManualScheduler::new();
    let mut inst = attach(&mut reg, &mut sched);
    for n in 1..=10u64 {
        let due = inst.scheduler_mut().take_due();
        assert_eq!(due.len(), 1);
        let stats = inst.on_frame(due[0]).expect("pending id renders");
        assert!(stats.painted > 0);
        assert_eq!(inst.scheduler().outstanding(), 1);
        assert_eq!(inst.renderer().frames_rendered(), n);
    }
    assert_eq!(inst.surface().frames_presented(), 10);
}

#[test]
fn visibility_toggles_keep_exactly_one_request() {
    let mut reg = registry();
    let mut sched = ManualScheduler::new();
    let mut inst = attach(&mut reg, &mut sched);

    for _ in 0..5 {
        inst.set_visible(false);
        assert_eq!(inst.scheduler().outstanding(), 0);
        assert!(inst.pending().is_none());
        inst.set_visible(false);
        assert_eq!(inst.scheduler().outstanding(), 0);

        inst.set_visible(true);
        assert_eq!(inst.scheduler().outstanding(), 1);
        inst.set_visible(true);
        assert_eq!(inst.scheduler().outstanding(), 1);
    }

    let due = inst.scheduler_mut().take_due();
    assert_eq!(due.len(), 1);
    assert!(inst.on_frame(due[0]).is_some());
    assert_eq!(inst.scheduler().outstanding(), 1);
}

#[test]
fn hidden_instance_does_not_advance_time() {
    let mut reg = registry();
    let mut sched = ManualScheduler::new();
    let mut inst = attach(&mut reg, &mut sched);

    let first = inst.scheduler_mut().take_due()[0];
    inst.on_frame(first).unwrap();
    let t = inst.renderer().time();
    let queued = inst.pending().unwrap();

    inst.set_visible(false);
    // A callback that raced the cancellation must not paint.
    assert!(inst.on_frame(queued).is_none());
    assert!(inst.scheduler_mut().take_due().is_empty());
    assert_eq!(inst.renderer().time(), t);

    inst.set_visible(true);
    assert!(inst.on_frame(queued).is_none(), "old id stays stale");
    let fresh = inst.scheduler_mut().take_due()[0];
    assert_ne!(fresh, queued);
    inst.on_frame(fresh).unwrap();
    assert!((inst.renderer().time() - 2.0 * inst.renderer().config().time_step).abs() < 1e-12);
}

#[test]
fn resize_rebuilds_from_scratch() {
    let mut reg = registry();
    let mut sched = ManualScheduler::new();
    let mut inst = attach(&mut reg, &mut sched);
    let id = inst.scheduler_mut().take_due()[0];
    inst.on_frame(id).unwrap();

    inst.resize(SurfaceSize::new(0, 0)).unwrap();
    assert_eq!(inst.renderer().segments().len(), 0);
    assert_eq!(inst.surface().size(), (0, 0));

    inst.resize(SurfaceSize::new(400, 300).with_dpr(2.0)).unwrap();
    assert_eq!(inst.surface().size(), (800, 600));
    assert_eq!(inst.renderer().geometry().side, 600.0);
    assert_eq!(inst.renderer().segments().len(), 900);
    assert_eq!(inst.renderer().time(), 0.0);
    // Resizing does not disturb scheduling.
    assert_eq!(inst.scheduler().outstanding(), 1);

    assert!(inst.resize(SurfaceSize::new(10, 10).with_dpr(-1.0)).is_err());
}

#[test]
fn detach_cancels_the_pending_request() {
    let mut reg = registry();
    let mut sched = ManualScheduler::new();
    let inst = attach(&mut reg, &mut sched);
    let (_surface, sched_ref) = inst.detach();
    assert_eq!(sched_ref.outstanding(), 0);
    assert_eq!(sched_ref.cancelled_total(), 1);
}

#[test]
fn two_instances_are_independent() {
    let mut reg = SurfaceRegistry::new();
    reg.insert("a", RecordingSurface::new(0, 0));
    reg.insert("b", RecordingSurface::new(0, 0));
    let mut sa = ManualScheduler::new();
    let mut sb = ManualScheduler::new();
    let size = SurfaceSize::new(280, 280);
    let mut a = SpiralInstance::attach(&mut reg, "a", size, SpiralConfig::default(), &mut sa)
        .unwrap()
        .unwrap();
    let b = SpiralInstance::attach(&mut reg, "b", size, SpiralConfig::default(), &mut sb)
        .unwrap()
        .unwrap();

    for _ in 0..20 {
        let id = a.scheduler_mut().take_due()[0];
        a.on_frame(id).unwrap();
    }
    a.set_visible(false);

    assert_eq!(b.renderer().time(), 0.0);
    assert!(b.is_visible());
    assert_eq!(b.scheduler().outstanding(), 1);
    assert_eq!(b.surface().frames_presented(), 0);
}

#[test]
fn rejected_config_leaves_the_surface_registered() {
    let mut reg = registry();
    let mut sched = ManualScheduler::new();
    let bad = SpiralConfig {
        glyph_budget: 0,
        ..SpiralConfig::default()
    };
    assert!(
        SpiralInstance::attach(
            &mut reg,
            "spiral-canvas",
            SurfaceSize::new(280, 280),
            bad,
            &mut sched,
        )
        .is_err()
    );
    assert_eq!(reg.len(), 1);
    assert_eq!(sched.requested_total(), 0);

    assert!(
        SpiralInstance::attach(
            &mut reg,
            "spiral-canvas",
            SurfaceSize::new(280, 280).with_dpr(f64::NAN),
            SpiralConfig::default(),
            &mut sched,
        )
        .is_err()
    );
    assert_eq!(reg.len(), 1);

    let inst = attach(&mut reg, &mut sched);
    assert_eq!(inst.surface().size(), (280, 280));
    assert!(reg.is_empty());
}

#[test]
fn surface_that_cannot_resize_is_given_back() {
    use crate::render::cpu::CpuSurface;

    let mut reg = SurfaceRegistry::new();
    reg.insert("spiral-canvas", CpuSurface::new(4, 4).unwrap());
    let mut sched = ManualScheduler::new();

    assert!(
        SpiralInstance::attach(
            &mut reg,
            "spiral-canvas",
            SurfaceSize::new(70_000, 10),
            SpiralConfig::default(),
            &mut sched,
        )
        .is_err()
    );
    assert_eq!(reg.len(), 1);
    assert_eq!(sched.requested_total(), 0);

    let inst = SpiralInstance::attach(
        &mut reg,
        "spiral-canvas",
        SurfaceSize::new(64, 48),
        SpiralConfig::default(),
        &mut sched,
    )
    .unwrap()
    .expect("surface was restored");
    assert_eq!(inst.surface().size(), (64, 48));
}
