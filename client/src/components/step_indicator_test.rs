use super::*;

#[test]
fn completed_steps_are_marked_done() {
    assert_eq!(step_class(1, 2), "step step--done");
    assert_eq!(step_class(2, 2), "step step--current");
    assert_eq!(step_class(3, 2), "step");
}
