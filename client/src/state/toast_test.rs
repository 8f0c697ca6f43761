use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Success, "one");
    let b = state.push(ToastKind::Failure, "two");
    assert!(b > a);
    assert_eq!(state.toasts.len(), 2);
    assert_eq!(state.toasts[1].kind, ToastKind::Failure);
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push(ToastKind::Success, "one");
    let b = state.push(ToastKind::Success, "two");
    assert!(state.dismiss(a));
    assert!(!state.dismiss(a));
    assert_eq!(state.toasts.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b]);
}

#[test]
fn oldest_toasts_are_dropped_past_the_cap() {
    let mut state = ToastState::default();
    for i in 0..(MAX_VISIBLE_TOASTS + 2) {
        state.push(ToastKind::Success, format!("toast {i}"));
    }
    assert_eq!(state.toasts.len(), MAX_VISIBLE_TOASTS);
    assert_eq!(state.toasts[0].message, "toast 2");
}

#[test]
fn sink_pushes_into_signal() {
    let owner = Owner::new();
    owner.with(|| {
        let toasts = RwSignal::new(ToastState::default());
        let sink = ToastSink::new(toasts);
        sink.notify_success("Signed in successfully!");
        sink.notify_failure("Invalid email or password");

        let state = toasts.get_untracked();
        assert_eq!(state.toasts.len(), 2);
        assert_eq!(state.toasts[0].kind, ToastKind::Success);
        assert_eq!(state.toasts[1].message, "Invalid email or password");
    });
}
