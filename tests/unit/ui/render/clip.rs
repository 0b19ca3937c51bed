use super::*;

#[test]
fn push_narrows_and_pop_restores() {
    let mut clip = ClipStack::new(Rect::new(0, 0, 100, 100));
    assert_eq!(clip.current(), Rect::new(0, 0, 100, 100));

    assert_eq!(clip.push(Rect::new(50, 50, 100, 100)), Rect::new(50, 50, 50, 50));
    assert_eq!(clip.push(Rect::new(0, 0, 60, 60)), Rect::new(50, 50, 10, 10));
    assert_eq!(clip.depth(), 2);

    assert_eq!(clip.pop().unwrap(), Rect::new(50, 50, 50, 50));
    assert_eq!(clip.pop().unwrap(), Rect::new(0, 0, 100, 100));
}

#[test]
fn unbalanced_pop_is_an_error() {
    let mut clip = ClipStack::new(Rect::new(0, 0, 10, 10));
    assert!(matches!(clip.pop(), Err(UiError::UnbalancedClip)));
}

#[test]
fn disjoint_push_yields_empty_clip() {
    let mut clip = ClipStack::new(Rect::new(0, 0, 10, 10));
    assert!(clip.push(Rect::new(20, 20, 5, 5)).is_empty());
}

#[test]
fn damage_skips_empty_rects() {
    let mut damage = Damage::default();
    damage.add(Rect::ZERO);
    damage.add(Rect::new(1, 1, 2, 2));
    assert_eq!(damage.rects(), &[Rect::new(1, 1, 2, 2)]);
    damage.clear();
    assert!(damage.is_empty());
}
