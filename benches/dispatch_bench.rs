use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shellactions::{
    ActionDispatcher, ActionsSource, Containment, ContainmentKind, DispatchMode, InputEvent,
    Modifiers, MouseButton, PluginLoader, PluginRegistry, Scope, Signature, WheelOrientation,
};

fn bench_canonicalize(c: &mut Criterion) {
    let event = InputEvent::Mouse {
        button: MouseButton::Right,
        modifiers: Modifiers::CONTROL | Modifiers::SHIFT,
    };

    c.bench_function("canonicalize_mouse_event", |b| {
        b.iter(|| Signature::from_event(black_box(&event)))
    });

    let wheel = InputEvent::Wheel {
        delta: -120,
        orientation: WheelOrientation::Vertical,
        modifiers: Modifiers::ALT,
    };
    c.bench_function("canonicalize_wheel_event", |b| {
        b.iter(|| Signature::from_event(black_box(&wheel)))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let mut registry = PluginRegistry::new(PluginLoader::with_builtins());
    let containment =
        Containment::new(1, "work", ContainmentKind::Desktop).with_source(ActionsSource::Local);

    // local miss falls through activity to a global hit
    registry.bind(
        Scope::Global,
        Signature::from_mouse(MouseButton::Right, Modifiers::empty()),
        "contextmenu",
    );
    registry.bind(
        Scope::Local(1),
        Signature::from_wheel(WheelOrientation::Vertical, Modifiers::empty()),
        "switchdesktop",
    );

    let signature = Signature::from_mouse(MouseButton::Right, Modifiers::empty());
    c.bench_function("resolve_through_scope_fallback", |b| {
        b.iter(|| registry.resolve(black_box(&containment), black_box(&signature)))
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let mut registry = PluginRegistry::new(PluginLoader::with_builtins());
    let containment = Containment::new(1, "work", ContainmentKind::Desktop);
    registry.bind(
        Scope::Global,
        Signature::from_mouse(MouseButton::Middle, Modifiers::empty()),
        "paste",
    );

    let dispatcher = ActionDispatcher::new();
    let event = InputEvent::Mouse {
        button: MouseButton::Middle,
        modifiers: Modifiers::empty(),
    };

    c.bench_function("dispatch_trigger", |b| {
        b.iter(|| {
            dispatcher.dispatch(
                black_box(&mut registry),
                black_box(&containment),
                black_box(&event),
                DispatchMode::Trigger,
            )
        })
    });
}

criterion_group!(benches, bench_canonicalize, bench_resolve, bench_dispatch);
criterion_main!(benches);
